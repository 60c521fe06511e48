use pokespeare_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("not found")]
    NotFound,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid query text: {0}")]
    InvalidQueryText(String),
    #[error("rate limit hit")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid translation: {0}")]
    InvalidTranslation(String),
}

impl From<CatalogError> for ErrorKind {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::InvalidUrl(url) => ErrorKind::InvalidUrl(url),
            CatalogError::Network(detail) => ErrorKind::Network(detail),
        }
    }
}

impl From<TranslationError> for ErrorKind {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::InvalidUrl(url) => ErrorKind::InvalidUrl(url),
            TranslationError::InvalidQueryText(text) => ErrorKind::InvalidQueryText(text),
            TranslationError::RateLimited => ErrorKind::RateLimitExceeded,
            TranslationError::Network(detail) => ErrorKind::Network(detail),
            TranslationError::InvalidTranslation(_) => ErrorKind::InvalidTranslation,
        }
    }
}
