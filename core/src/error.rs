//! Error types for the customers client.
//!
//! # Design
//! `ApiError` covers what a response can mean, `TransportError` covers a
//! round-trip that never produced a response, and `ValidationError` covers
//! local checks that stop a call before it is made. `SessionError` is the
//! union returned by session operations. None of these carry user-facing
//! wording; that lives in [`crate::session::Notice`] and
//! [`crate::session::SearchMessage`].

use thiserror::Error;

/// Errors returned by `CustomerClient` parse methods.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The requested customer does not exist. Lookups by id report every
    /// non-2xx status this way.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// The host could not complete the HTTP round-trip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Local checks that reject an operation without a network call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name and tax id are required")]
    MissingRequiredFields,
    #[error("no customer is selected for editing")]
    NoCustomerSelected,
    #[error("record has no id")]
    MissingRecordId,
    #[error("search id is empty")]
    MissingSearchId,
    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
}

/// Failure of a session operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// True when no request left the client.
    pub fn is_local(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}
