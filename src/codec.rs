//! RESP multibulk framing for commands.
//!
//! A command travels to the server as a count-prefixed array of
//! length-prefixed binary strings: `*<N>\r\n` followed by one
//! `$<len>\r\n<bytes>\r\n` segment per argument, with `\r\n` as the only
//! separator. Encoding is two-pass: the exact frame length is computed
//! first so the output buffer is reserved once, then filled.

use bytes::{BufMut, Bytes, BytesMut};

use crate::arg::{Arg, EncodeError};

#[cfg(test)]
mod tests;

/// One Redis command: an ordered sequence of arguments.
///
/// Order is significant; the first argument is conventionally the verb.
///
/// # Examples
///
/// ```
/// use redwire::Command;
///
/// let frame = Command::new("SET")
///     .arg("foo")
///     .arg("bar")
///     .encode()
///     .expect("encode");
/// assert_eq!(frame.as_bytes(), b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Command {
    args: Vec<Arg>,
}

impl Command {
    /// Create a command from its leading verb.
    #[must_use]
    pub fn new(verb: impl Into<Arg>) -> Self {
        Self {
            args: vec![verb.into()],
        }
    }

    /// Create a command with no arguments.
    ///
    /// Encodes to a bare `*0\r\n` header. The construction is legal, but
    /// servers reject it, so callers should not dispatch one.
    #[must_use]
    pub fn empty() -> Self { Self::default() }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append every argument yielded by `args`, preserving order.
    #[must_use]
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        self.extend(args);
        self
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize { self.args.len() }

    /// Whether the command has no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.args.is_empty() }

    /// Encode this command into one RESP multibulk frame.
    ///
    /// Each argument is coerced in order before any output is produced,
    /// so a coercion fault aborts the call without a partial frame.
    /// Declared segment lengths count bytes, not characters.
    ///
    /// # Errors
    ///
    /// Returns the coercion fault of the first argument that cannot be
    /// made binary-safe.
    pub fn encode(&self) -> Result<Frame, EncodeError> {
        let mut coerced = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            coerced.push(arg.to_bytes()?);
        }

        let mut dst = BytesMut::with_capacity(encoded_len(&coerced));
        let mut buf = itoa::Buffer::new();
        dst.put_u8(b'*');
        dst.extend_from_slice(buf.format(coerced.len()).as_bytes());
        dst.extend_from_slice(b"\r\n");
        for payload in &coerced {
            dst.put_u8(b'$');
            dst.extend_from_slice(buf.format(payload.len()).as_bytes());
            dst.extend_from_slice(b"\r\n");
            dst.extend_from_slice(payload);
            dst.extend_from_slice(b"\r\n");
        }
        Ok(Frame(dst.freeze()))
    }
}

impl<T: Into<Arg>> FromIterator<T> for Command {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Arg>> Extend<T> for Command {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.args.extend(iter.into_iter().map(Into::into));
    }
}

/// One fully-encoded RESP multibulk frame.
///
/// Immutable; produced per dispatch call and consumed by the connection
/// actor, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame(Bytes);

impl Frame {
    /// The encoded frame bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    /// Byte length of the encoded frame.
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the frame holds no bytes. Never true for an encoded
    /// command; even a zero-argument command carries its header.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Consume the frame, yielding its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes { self.0 }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

/// Exact encoded length of a frame holding the coerced payloads.
fn encoded_len(payloads: &[Bytes]) -> usize {
    let mut total = 1 + digits_len(payloads.len()) + 2;
    for payload in payloads {
        total += 1 + digits_len(payload.len()) + 2 + payload.len() + 2;
    }
    total
}

fn digits_len(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
