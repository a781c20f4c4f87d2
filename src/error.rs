use std::path::PathBuf;

use thiserror::Error;

use crate::model::Headers;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while issuing a request or shaping its response.
///
/// A completed round trip is never an error on its own, whatever the status code.
/// Use [`ResponseEnvelope::error_for_status`](crate::ResponseEnvelope::error_for_status)
/// to opt into treating 4xx/5xx as failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected before anything was sent.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// The round trip could not be completed (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response arrived but its body did not fit the requested shape or type.
    #[error("could not decode response body (status {status}): {source}")]
    Decode {
        status: u16,
        headers: Headers,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a file body failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response arrived but could not be written to the requested file.
    #[error("could not save response body (status {status}) to {}: {source}", .path.display())]
    Save {
        status: u16,
        headers: Headers,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised by `error_for_status` for a 4xx or 5xx envelope.
    #[error("HTTP status {status}")]
    Status { status: u16, headers: Headers },
}

impl Error {
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }

    /// The status code of the response that caused this error, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Decode { status, .. }
            | Error::Save { status, .. }
            | Error::Status { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|status| status.as_u16()),
            Error::InvalidRequest { .. } | Error::Io { .. } => None,
        }
    }

    /// The response headers, preserved whenever a response arrived.
    pub fn headers(&self) -> Option<&Headers> {
        match self {
            Error::Decode { headers, .. }
            | Error::Save { headers, .. }
            | Error::Status { headers, .. } => Some(headers),
            _ => None,
        }
    }
}
