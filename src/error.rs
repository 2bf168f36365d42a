//! The crate-wide error type.
//!
//! Every failure the SDK can produce lands in one of four kinds:
//!
//! - [`Error::Construction`] — an engine or request was built with invalid
//!   arguments (missing base URL, duplicate multipart field name, image
//!   file unreadable)
//! - [`Error::Build`] — the multipart body could not be serialized
//!   (filename without an extension, URL-only image in a binary part)
//! - [`Error::Transport`] — the HTTP call itself failed (connect, protocol,
//!   error status, body read)
//! - [`Error::Parse`] — the service answered with something that is not
//!   valid JSON
//!
//! Callers that only care about the failure class can match on
//! [`Error::kind`] instead of the full variant.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the PixMatch client.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing argument while constructing a client, request,
    /// or multipart message.
    #[error("invalid argument: {0}")]
    Construction(String),

    /// Failure while serializing the multipart request body.
    #[error("failed to build multipart message: {0}")]
    Build(String),

    /// Failure issuing the HTTP call or reading the response stream.
    #[error("request failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON.
    #[error("response is not valid JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// The failure class of an [`Error`], for callers that discriminate
/// without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Construction,
    Build,
    Transport,
    Parse,
}

impl Error {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Construction(_) => ErrorKind::Construction,
            Error::Build(_) => ErrorKind::Build,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Parse { .. } => ErrorKind::Parse,
        }
    }
}
