//! Error types for the Omeda API client.
//!
//! # Design
//! Configuration problems surface at construction time through
//! `ApiError::Configuration`; everything else surfaces per call. `NotFound`
//! gets a dedicated variant because lookups against unknown customers are a
//! normal outcome. All other non-2xx responses land in `HttpError` with the
//! raw status code and body for debugging.

use thiserror::Error;

/// Errors raised while validating or reading a [`Config`](crate::Config).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required option was absent or empty.
    #[error("missing required configuration option `{0}`")]
    MissingOption(String),

    /// An option was read that was never set.
    #[error("unknown configuration option `{0}`")]
    UnknownOption(String),

    /// The configuration source could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Errors returned by `OmedaClient` and its resources.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The caller asked for a request method outside the allowed set.
    #[error("unsupported request method `{method}`, expected one of: {}", .allowed.join(", "))]
    UnsupportedMethod { method: String, allowed: Vec<String> },

    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    TransportError(String),

    /// The server returned 404.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}
