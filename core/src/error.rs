//! Error types for the API client.
//!
//! # Design
//! Two failure kinds come from the wire: no response at all
//! (`TransportError`) and a response whose status is outside 2xx
//! (`HttpError`). The latter keeps the whole response so callers can branch
//! on the status or inspect the body. The client itself never interprets
//! status codes beyond the success check.

use thiserror::Error;

use crate::http::HttpResponse;

/// Errors returned by `ApiClient` verb methods and response decoding.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained: DNS, connect, TLS, malformed URL, or a
    /// stubbed network failure.
    #[error("transport failure: {0}")]
    TransportError(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {}: {}", .0.status, .0.body)]
    HttpError(Box<HttpResponse>),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// The response carried by an `HttpError`, if any.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            ApiError::HttpError(response) => Some(response.as_ref()),
            _ => None,
        }
    }

    /// Status code of the carried response, if any.
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }
}
