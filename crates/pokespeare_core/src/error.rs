use thiserror::Error;

/// Unified failure taxonomy for a search.
///
/// The `Display` text is what ends up in `AppState::search_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Something went wrong. Please try again in a few minutes.\n(Error: {0})")]
    Network(String),
    #[error("The requested url is invalid.\nURL: {0}")]
    InvalidUrl(String),
    #[error("The query requested is invalid.\nQuery: {0}")]
    InvalidQueryText(String),
    #[error("We cannot find the description for {0}")]
    DescriptionNotFound(String),
    #[error("The translation is invalid")]
    InvalidTranslation,
    #[error("We cannot find the pokemon you are searching")]
    NotFound,
    #[error("We hit the rate limit. Please wait for some minutes before trying again")]
    RateLimitExceeded,
}
