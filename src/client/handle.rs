//! Message-addressable handle to the connection actor.
//!
//! The connection actor owns the socket, the reconnection policy, and
//! response decoding; this module defines only the contract between the
//! dispatch layer and the actor: the messages it accepts and the replies
//! it owes. Timeouts are enforced by the calling side, never the actor.

use bytes::Bytes;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::codec::Frame;

/// Reply to a single command: the server's opaque value, or the failure
/// the actor reports.
pub type RequestReply = Result<Bytes, ReplyError>;

/// Reply to a pipeline: per-command results positionally aligned with
/// the submitted frames, or one top-level failure when nothing was
/// dispatched.
pub type PipelineReply = Result<Vec<RequestReply>, ReplyError>;

/// Failure reasons a connection actor may report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReplyError {
    /// The actor holds no usable connection to the server.
    #[error("no connection to the server")]
    NoConnection,
    /// The server answered with an error payload, passed through
    /// unmodified.
    #[error("server error: {}", String::from_utf8_lossy(.0))]
    Server(Bytes),
}

/// One request to the connection actor.
///
/// The actor must answer on the enclosed `reply` sender. Dropping the
/// sender without answering reads as a missing connection on the calling
/// side.
#[derive(Debug)]
pub enum ConnectionRequest {
    /// Execute one frame and reply with the command's result.
    Request {
        /// Encoded command.
        frame: Frame,
        /// Channel the actor answers on.
        reply: oneshot::Sender<RequestReply>,
    },
    /// Execute the frames in order and reply with positionally aligned
    /// results.
    Pipeline {
        /// Encoded commands, in submission order.
        frames: Vec<Frame>,
        /// Channel the actor answers on.
        reply: oneshot::Sender<PipelineReply>,
    },
}

/// Error returned when the connection actor's request channel is closed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("connection actor is gone")]
pub struct HandleClosed;

/// Cloneable handle used by clients to address the connection actor.
///
/// The handle never mutates the actor; it only enqueues requests.
/// Ordering and mutual exclusion of actual wire traffic are the actor's
/// responsibility.
#[derive(Clone, Debug)]
pub struct ConnectionHandle {
    tx: mpsc::Sender<ConnectionRequest>,
}

impl ConnectionHandle {
    /// Create a handle paired with the receiver an actor implementation
    /// drains.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ConnectionRequest>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Send one request to the actor, awaiting while its queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`HandleClosed`] if the actor has dropped its receiver.
    pub async fn send(&self, request: ConnectionRequest) -> Result<(), HandleClosed> {
        self.tx.send(request).await.map_err(|_| HandleClosed)
    }
}
