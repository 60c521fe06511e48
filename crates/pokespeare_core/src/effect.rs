use crate::{ComposedResult, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up `name` and report back as `Action::ResultReceived` tagged with `request_id`.
    Compose { request_id: RequestId, name: String },
    /// Write the durable part of the state. Emitted after every transition.
    Persist { favorites: Vec<ComposedResult> },
}
