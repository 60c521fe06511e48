use std::path::PathBuf;

use engine_logging::LogDestination;
use log::LevelFilter;
use pokespeare_engine::ClientSettings;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the persisted state blob.
    pub storage_dir: PathBuf,
    pub client: ClientSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn default_with_storage(storage_dir: PathBuf) -> Self {
        Self {
            storage_dir,
            client: ClientSettings::default(),
            log_destination: LogDestination::Terminal,
            log_level: LevelFilter::Info,
        }
    }
}
