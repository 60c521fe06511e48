//! Pokespeare application driver: sequential store, effect execution and persistence.
mod config;
mod persistence;
mod store;

pub use config::AppConfig;
pub use persistence::{
    decode_favorites, encode_favorites, load_favorites, save_favorites, CodecError, FileStorage,
    MemoryStorage, Storage, STATE_KEY,
};
pub use store::Store;
