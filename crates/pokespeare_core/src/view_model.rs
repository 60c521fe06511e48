use crate::ComposedResult;

/// Snapshot of everything the UI layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Sorted by name.
    pub favorites: Vec<ComposedResult>,
    pub found: Option<ComposedResult>,
    pub show_found: bool,
    pub search_error: Option<String>,
    pub in_flight: bool,
    pub dirty: bool,
}
