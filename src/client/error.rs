//! Error types for client dispatch operations.

use bytes::Bytes;
use thiserror::Error;

use super::handle::{HandleClosed, ReplyError};
use crate::arg::EncodeError;

/// Errors surfaced by [`Client`](crate::Client) calls.
///
/// The four classes are distinguishable so callers can tell "never got
/// an answer" from "got an explicit failure".
#[derive(Debug, Error)]
pub enum Error {
    /// An argument could not be made binary-safe.
    ///
    /// Raised locally before any message reaches the connection actor;
    /// only the offending call is aborted.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// No usable connection: the actor reported none, or the actor
    /// itself is gone.
    #[error("no connection to the server")]
    NoConnection,
    /// The server returned an error payload, passed through unmodified.
    #[error("server error: {}", String::from_utf8_lossy(.0))]
    Server(Bytes),
    /// The caller-side wait expired before the actor answered.
    ///
    /// The in-flight request may still execute against the backing
    /// store.
    #[error("timed out waiting for the connection actor")]
    Timeout,
}

impl From<ReplyError> for Error {
    fn from(reason: ReplyError) -> Self {
        match reason {
            ReplyError::NoConnection => Self::NoConnection,
            ReplyError::Server(payload) => Self::Server(payload),
        }
    }
}

impl From<HandleClosed> for Error {
    fn from(_: HandleClosed) -> Self { Self::NoConnection }
}
