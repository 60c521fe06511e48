use std::collections::BTreeMap;

use crate::view_model::AppViewModel;
use crate::ComposedResult;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    // Keyed by display name: at most one favorite per name.
    favorites: BTreeMap<String, ComposedResult>,
    found: Option<ComposedResult>,
    show_found: bool,
    search_error: Option<String>,
    in_flight: bool,
    latest_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state with favorites restored from storage. Later duplicates by name win.
    pub fn with_favorites(favorites: impl IntoIterator<Item = ComposedResult>) -> Self {
        let mut state = Self::new();
        for favorite in favorites {
            state.favorites.insert(favorite.name.clone(), favorite);
        }
        state
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            favorites: self.favorites(),
            found: self.found.clone(),
            show_found: self.show_found,
            search_error: self.search_error.clone(),
            in_flight: self.in_flight,
            dirty: self.dirty,
        }
    }

    /// Favorites ordered by name.
    pub fn favorites(&self) -> Vec<ComposedResult> {
        self.favorites.values().cloned().collect()
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains_key(name)
    }

    pub fn found(&self) -> Option<&ComposedResult> {
        self.found.as_ref()
    }

    pub fn show_found(&self) -> bool {
        self.show_found
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Id of the most recently issued search; 0 before the first search.
    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_search(&mut self) -> RequestId {
        self.latest_request += 1;
        self.in_flight = true;
        self.found = None;
        self.search_error = None;
        self.mark_dirty();
        self.latest_request
    }

    pub(crate) fn apply_found(&mut self, result: ComposedResult) {
        self.in_flight = false;
        self.found = Some(result);
        self.show_found = true;
        self.search_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_error(&mut self, message: String) {
        self.in_flight = false;
        self.found = None;
        self.search_error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn clear_found(&mut self) {
        if self.found.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_error(&mut self) {
        if self.search_error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_favorite(&mut self, result: ComposedResult) {
        if self.favorites.remove(&result.name).is_none() {
            self.favorites.insert(result.name.clone(), result);
        }
        self.mark_dirty();
    }

    pub(crate) fn dismiss_found(&mut self) {
        if std::mem::replace(&mut self.show_found, false) {
            self.mark_dirty();
        }
    }

    pub(crate) fn dismiss_loader(&mut self) {
        if std::mem::replace(&mut self.in_flight, false) {
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
