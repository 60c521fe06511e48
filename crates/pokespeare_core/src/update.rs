use crate::{Action, AppState, Effect};

/// Pure update function: applies an action to state and returns any effects.
///
/// The last effect is always `Effect::Persist` carrying the current favorites.
pub fn update(mut state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    let mut effects = match action {
        Action::Search(raw) => {
            let name = normalize_query(&raw);
            let request_id = state.begin_search();
            vec![Effect::Compose { request_id, name }]
        }
        Action::ResultReceived { request_id, result } => {
            // Results of superseded searches are dropped.
            if request_id == state.latest_request() {
                match result {
                    Ok(found) => state.apply_found(found),
                    Err(err) => state.apply_error(err.to_string()),
                }
            }
            Vec::new()
        }
        Action::ClearFound => {
            state.clear_found();
            Vec::new()
        }
        Action::ClearError => {
            state.clear_error();
            Vec::new()
        }
        Action::ToggleFavorite(result) => {
            state.toggle_favorite(result);
            Vec::new()
        }
        Action::DismissFound => {
            state.dismiss_found();
            Vec::new()
        }
        Action::DismissLoader => {
            state.dismiss_loader();
            Vec::new()
        }
    };

    effects.push(Effect::Persist {
        favorites: state.favorites(),
    });
    (state, effects)
}

fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}
