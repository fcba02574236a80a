//! Public API for the `redwire` library.
//!
//! This crate is the command-facing layer of a Redis wire-protocol
//! client: it coerces arbitrarily-typed caller arguments into
//! binary-safe byte sequences, frames each command as a RESP multibulk
//! request, and dispatches frames, singly or as pipelines, to a
//! long-lived connection actor, returning normalized results.
//!
//! The connection actor (socket I/O, reconnection, response decoding) is
//! an external collaborator addressed through [`ConnectionHandle`]; this
//! crate defines the messages it consumes and the replies it owes, but
//! not its implementation.

pub mod arg;
pub mod client;
pub mod codec;

pub use arg::{Arg, EncodeError};
pub use client::{
    Client,
    ClientConfig,
    ConnectionHandle,
    ConnectionRequest,
    DEFAULT_TIMEOUT,
    Endpoint,
    Error,
    HandleClosed,
    PipelineReply,
    ReplyError,
    RequestReply,
};
pub use codec::{Command, Frame};
