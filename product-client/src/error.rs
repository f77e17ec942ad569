//! Error types for the product API client.
//!
//! # Design
//! Transport failures (`Transport`, `Timeout`) never reached a server and are
//! kept apart from status failures, which are produced by the configured
//! `ResponseErrorHandler`. The default handler gives `NotFound` its own variant
//! and puts every other non-2xx response in `HttpError`. A service-aware
//! handler wraps failures in `Service`, which names the remote service.

/// A failure reported by a named remote service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("service {service_name} failed with HTTP {status}: {error}")]
pub struct RestServiceError {
    pub status: u16,
    /// Error text taken from the response body, or the reason phrase when the
    /// body is empty.
    pub error: String,
    pub service_name: String,
}

/// Errors returned by `ProductClient`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A configured connect or read timeout elapsed.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error(transparent)]
    Service(#[from] RestServiceError),

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Reading the response body or writing a downloaded file failed.
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
