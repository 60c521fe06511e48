//! Pokespeare core: pure state machine and view-model helpers.
mod action;
mod composed;
mod effect;
mod error;
mod state;
mod update;
mod view_model;

pub use action::Action;
pub use composed::{capitalize_words, ComposedResult};
pub use effect::Effect;
pub use error::ErrorKind;
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::AppViewModel;
