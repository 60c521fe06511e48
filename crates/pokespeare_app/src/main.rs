use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use engine_logging::LogDestination;
use pokespeare_app::{AppConfig, Store};
use pokespeare_core::Action;

const STORAGE_DIR: &str = "pokespeare_state";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> ExitCode {
    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        eprintln!("usage: pokespeare_app <name> [<name>...]");
        return ExitCode::from(2);
    }

    let mut config = AppConfig::default_with_storage(PathBuf::from(STORAGE_DIR));
    config.log_destination = LogDestination::default_file();

    let mut store = match Store::start(&config) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to start: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for name in names {
        store.dispatch(Action::Search(name.clone()));
        while store.state().in_flight() {
            if !store.wait_for_result(LOOKUP_TIMEOUT) {
                store.dispatch(Action::DismissLoader);
                eprintln!("{name}: timed out");
                failed = true;
            }
        }

        let view = store.view();
        match (view.found, view.search_error) {
            (Some(found), _) => {
                println!("{}\n  {}", found.name, found.description);
                if let Some(sprite) = found.sprite {
                    println!("  sprite: {sprite}");
                }
                if let Some(artwork) = found.artwork {
                    println!("  artwork: {artwork}");
                }
            }
            (None, Some(message)) => {
                eprintln!("{name}: {message}");
                failed = true;
            }
            (None, None) => {}
        }
        store.dispatch(Action::ClearFound);
        store.dispatch(Action::ClearError);
    }

    let favorites = store.state().favorites();
    if !favorites.is_empty() {
        let names: Vec<&str> = favorites.iter().map(|f| f.name.as_str()).collect();
        println!("favorites: {}", names.join(", "));
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
