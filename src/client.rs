//! Client runtime for dispatching framed commands.
//!
//! [`Client`] is the caller-facing surface of the crate: each call
//! encodes its command into a RESP frame, forwards the frame to the
//! connection actor through a [`ConnectionHandle`], and suspends the
//! calling task until the actor answers or the timeout elapses. The
//! layer holds no state across calls; clones share one connection actor
//! and may dispatch concurrently.
//!
//! Socket I/O, reconnection, and response decoding belong to the actor
//! behind the handle. Retrying failed calls belongs to the actor or the
//! caller; nothing is retried here.

use std::time::Duration;

use bytes::Bytes;
use log::{debug, warn};
use tokio::{sync::oneshot, time::timeout};

mod config;
mod error;
mod handle;

pub use config::{ClientConfig, Endpoint};
pub use error::Error;
pub use handle::{
    ConnectionHandle,
    ConnectionRequest,
    HandleClosed,
    PipelineReply,
    ReplyError,
    RequestReply,
};

use crate::codec::Command;

/// Timeout applied when a call does not supply its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Handle for issuing Redis commands against one connection actor.
///
/// # Examples
///
/// ```no_run
/// use redwire::{Client, ClientConfig, Command, ConnectionHandle};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), redwire::Error> {
/// let (handle, requests) = ConnectionHandle::channel(32);
/// // Hand `requests` to a connection actor implementation.
/// # drop(requests);
/// let client = Client::new(handle, &ClientConfig::default());
/// let _value = client.q(Command::new("GET").arg("foo")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    handle: ConnectionHandle,
    default_timeout: Duration,
}

impl Client {
    /// Create a client addressing the connection actor behind `handle`.
    ///
    /// Only the default call timeout is taken from `config`; the
    /// endpoint fields configure the actor implementation at the
    /// composition root.
    #[must_use]
    pub fn new(handle: ConnectionHandle, config: &ClientConfig) -> Self {
        Self {
            handle,
            default_timeout: config.timeout,
        }
    }

    /// Issue one command and await its result under the default timeout.
    ///
    /// # Errors
    ///
    /// See [`q_with_timeout`](Self::q_with_timeout).
    pub async fn q(&self, command: Command) -> Result<Bytes, Error> {
        self.q_with_timeout(command, self.default_timeout).await
    }

    /// Issue one command and await its result under `deadline`.
    ///
    /// A timeout only stops the wait: the frame already sent to the
    /// connection actor stays queued and may still execute against the
    /// backing store. No cancellation signal is sent.
    ///
    /// # Errors
    ///
    /// - [`Error::Encode`] if an argument cannot be made binary-safe; raised before any message
    ///   reaches the actor.
    /// - [`Error::NoConnection`] if the actor reports no usable connection or is gone.
    /// - [`Error::Server`] with the server's error payload, unmodified.
    /// - [`Error::Timeout`] if `deadline` elapses before the actor answers.
    pub async fn q_with_timeout(
        &self,
        command: Command,
        deadline: Duration,
    ) -> Result<Bytes, Error> {
        let frame = command.encode()?;
        let (reply_tx, reply_rx) = oneshot::channel();
        debug!("dispatching command frame of {} bytes", frame.len());
        self.handle
            .send(ConnectionRequest::Request {
                frame,
                reply: reply_tx,
            })
            .await?;
        match timeout(deadline, reply_rx).await {
            Ok(Ok(reply)) => reply.map_err(Error::from),
            // The actor dropped the reply sender without answering.
            Ok(Err(_)) => Err(Error::NoConnection),
            Err(_) => {
                warn!("command timed out after {deadline:?}");
                Err(Error::Timeout)
            }
        }
    }

    /// Issue a batch of commands as one pipeline under the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// See [`qp_with_timeout`](Self::qp_with_timeout).
    pub async fn qp(&self, pipeline: Vec<Command>) -> Result<Vec<Result<Bytes, Error>>, Error> {
        self.qp_with_timeout(pipeline, self.default_timeout).await
    }

    /// Issue a batch of commands as one pipeline under `deadline`.
    ///
    /// An empty pipeline returns an empty result sequence immediately,
    /// without contacting the connection actor. Otherwise every command
    /// is encoded in order, the frames travel as a single request, and
    /// the reply holds one result per command in submission order.
    ///
    /// As with [`q_with_timeout`](Self::q_with_timeout), a timeout only
    /// stops the wait; the in-flight pipeline may still execute.
    ///
    /// # Errors
    ///
    /// - [`Error::Encode`] if any command holds an argument that cannot be made binary-safe; no
    ///   frame is sent.
    /// - [`Error::NoConnection`] if the whole pipeline could not be dispatched.
    /// - [`Error::Timeout`] if `deadline` elapses before the actor answers.
    ///
    /// Failures of individual commands do not fail the call; they appear
    /// as `Err` entries at their command's position.
    pub async fn qp_with_timeout(
        &self,
        pipeline: Vec<Command>,
        deadline: Duration,
    ) -> Result<Vec<Result<Bytes, Error>>, Error> {
        if pipeline.is_empty() {
            return Ok(Vec::new());
        }

        let mut frames = Vec::with_capacity(pipeline.len());
        for command in &pipeline {
            frames.push(command.encode()?);
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        debug!("dispatching pipeline of {} commands", frames.len());
        self.handle
            .send(ConnectionRequest::Pipeline {
                frames,
                reply: reply_tx,
            })
            .await?;
        match timeout(deadline, reply_rx).await {
            Ok(Ok(Ok(results))) => Ok(results
                .into_iter()
                .map(|result| result.map_err(Error::from))
                .collect()),
            Ok(Ok(Err(reason))) => Err(Error::from(reason)),
            Ok(Err(_)) => Err(Error::NoConnection),
            Err(_) => {
                warn!("pipeline timed out after {deadline:?}");
                Err(Error::Timeout)
            }
        }
    }
}
