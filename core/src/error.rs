//! Error types for the users API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because fetch-by-id reports it with a
//! fixed message. Every other non-2xx response, including a 404 from list or
//! create, lands in `Http`, whose display
//! text names the request and the status line. `code()` is the number that
//! ends up in an error envelope's `statusCode`.

use thiserror::Error;

use crate::http::HttpMethod;

/// Errors produced while building requests, executing them, or parsing
/// responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A fetch-by-id returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status.
    #[error("{} error: `{method} {url}` resulted in a `{status} {reason}` response", kind(.status))]
    Http {
        method: HttpMethod,
        url: String,
        status: u16,
        reason: String,
    },

    /// A 2xx list or create response body could not be decoded into the
    /// expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Numeric code reported alongside this error. Failures without an HTTP
    /// status report 0.
    pub fn code(&self) -> u16 {
        match self {
            ApiError::NotFound => 404,
            ApiError::Http { status, .. } => *status,
            ApiError::Deserialization(_) => 500,
            ApiError::Serialization(_) | ApiError::Transport(_) => 0,
        }
    }
}

fn kind(status: &u16) -> &'static str {
    if *status >= 500 {
        "Server"
    } else {
        "Client"
    }
}
