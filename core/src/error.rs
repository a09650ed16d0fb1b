//! Error types for the HTTP client.
//!
//! # Design
//! Connection-stage failures get their own variant so callers can apply a
//! connection-specific retry policy. Everything else that goes wrong while
//! building or executing a request lands in `Request`, with the original
//! cause kept as the error source. Non-2xx responses are not errors unless
//! the caller opts in through `raise_for_status`.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The client was built without a transport.
    #[error("cannot perform request, transport is not configured")]
    Configuration,

    /// The transport could not establish the connection (refused,
    /// unreachable, DNS failure).
    #[error("{message}")]
    ConnectionRefused {
        message: String,
        #[source]
        source: TransportError,
    },

    /// Any other failure building or executing the request, including
    /// context cancellation.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    /// Returned by `raise_for_status` for codes outside the 2xx band.
    #[error("api request failed, returned status {code}")]
    Status { code: u16 },

    #[error("failed to read body: {0}")]
    Body(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn request(source: impl StdError + Send + Sync + 'static) -> Self {
        Error::Request {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    pub fn is_connection_refused(&self) -> bool {
        matches!(self, Error::ConnectionRefused { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { code } => Some(*code),
            _ => None,
        }
    }
}
