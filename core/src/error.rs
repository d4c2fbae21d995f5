//! Error types for the employee API client and store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the store turns it into its
//! own message ("Employee 4 not found") instead of a generic fetch failure.
//! All other non-2xx responses land in `HttpError` with the raw status code
//! and body for debugging.
//!
//! `StoreError` keeps client-side rejections (`Validation`) apart from
//! anything that came back from the API, since only the latter is recorded
//! in the store's snapshot.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors returned by `EmployeeClient`, `Transport` and `EmployeeApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested employee does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The input was rejected before building a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors returned by `EmployeeStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Validation(errors)
    }
}
