use std::fmt;

use bytes::Bytes;
use pokespeare_core::{ComposedResult, ErrorKind, RequestId};
use url::Url;

/// Full catalog entry for one creature, as cached by [`crate::CatalogClient`].
///
/// Flavor text comes from a separate species lookup and is never part of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureRecord {
    pub name: String,
    pub sprite: Option<Url>,
    pub artwork: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Composed {
        request_id: RequestId,
        result: Result<ComposedResult, ErrorKind>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An unknown failure with no detail attached.
    ///
    /// Some HTTP stacks report a 404 with an empty body this way.
    pub fn is_empty_unknown(&self) -> bool {
        self.kind == TransportFailure::Unknown && self.message.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Unknown,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidUrl => write!(f, "invalid url"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            TransportFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::Unknown => write!(f, "unknown error"),
        }
    }
}
