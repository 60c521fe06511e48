use crate::{ComposedResult, ErrorKind, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// User submitted a name to look up.
    Search(String),
    /// Engine completion for a search.
    ResultReceived {
        request_id: RequestId,
        result: Result<ComposedResult, ErrorKind>,
    },
    /// Drop the currently found result.
    ClearFound,
    /// User acknowledged the search error.
    ClearError,
    /// Add the result to favorites, or remove it when a favorite with the same name exists.
    ToggleFavorite(ComposedResult),
    /// User closed the found result sheet.
    DismissFound,
    /// User dismissed the loading indicator.
    DismissLoader,
}
