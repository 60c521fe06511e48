//! Pokespeare engine: API clients, lookup orchestration and effect execution.
mod cache;
mod catalog;
mod engine;
mod error;
mod fetch;
mod orchestrator;
mod persist;
mod translate;
mod types;

pub use cache::RecordCache;
pub use catalog::{CatalogClient, DEFAULT_CATALOG_BASE_URL};
pub use engine::EngineHandle;
pub use error::{CatalogError, TranslationError};
pub use fetch::{HttpTransport, ReqwestTransport, TransportSettings};
pub use orchestrator::{ClientSettings, Orchestrator};
pub use persist::{ensure_storage_dir, BlobWriter, PersistError};
pub use translate::{TranslationClient, DEFAULT_TRANSLATION_BASE_URL, DEFAULT_TRANSLATION_STYLE};
pub use types::{CreatureRecord, EngineEvent, HttpResponse, TransportError, TransportFailure};
