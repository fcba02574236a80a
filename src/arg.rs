//! Argument values and their coercion into binary-safe byte sequences.
//!
//! Redis treats every stored value as an opaque byte string, so each
//! caller-supplied argument must be reduced to exactly one byte sequence
//! before framing. [`Arg`] models the supported argument types as an
//! explicit tagged variant so coercion is an exhaustive match rather than
//! a runtime type probe. The one variant with no safe binary
//! representation, [`Arg::Float`], fails coercion instead of being
//! silently truncated.

use bytes::Bytes;
use thiserror::Error;

/// Error raised while coercing or encoding command arguments.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Floating-point values have no native Redis wire representation.
    ///
    /// A float stored as text changes meaning under reconstruction, so
    /// coercion refuses it outright instead of guessing a rendering.
    #[error("cannot encode floating-point value {0} as a Redis argument")]
    UnsupportedFloat(f64),
    /// Serializing an opaque fallback argument failed.
    #[error("failed to serialize opaque argument")]
    Opaque(#[source] bincode::error::EncodeError),
}

/// One command argument.
///
/// Construct variants directly or through the `From` conversions for
/// strings, byte buffers, and integers. Floating-point conversions are
/// accepted at construction so the fault can surface at encode time
/// carrying the offending value.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// Owned text, sent as its literal UTF-8 bytes.
    Text(String),
    /// Program-literal identifier such as a Redis verb or option flag,
    /// sent as its literal bytes.
    Symbol(&'static str),
    /// Binary payload, passed through unchanged.
    Blob(Bytes),
    /// Signed integer, sent as its canonical decimal text.
    Int(i64),
    /// Floating-point number. Disallowed: coercion fails with
    /// [`EncodeError::UnsupportedFloat`] before any frame is built.
    Float(f64),
    /// Pre-serialized fallback for values outside the native variants.
    ///
    /// Produced by [`Arg::opaque`]. The payload is a `bincode` encoding
    /// and is not portable across client implementations or versions.
    Opaque(Bytes),
}

impl Arg {
    /// Serialize an arbitrary value into an opaque fallback argument.
    ///
    /// Last-resort path for values with no native variant. The encoding
    /// is `bincode` with its standard configuration; a value stored this
    /// way can only be reconstructed by a client using the same encoding,
    /// so prefer the native variants wherever one fits.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Opaque`] if serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use redwire::Arg;
    ///
    /// let arg = Arg::opaque(&(1u8, 2u8)).expect("serialize");
    /// assert!(matches!(arg, Arg::Opaque(_)));
    /// ```
    pub fn opaque<T: serde::Serialize>(value: &T) -> Result<Self, EncodeError> {
        let encoded = bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(EncodeError::Opaque)?;
        Ok(Self::Opaque(Bytes::from(encoded)))
    }

    /// Coerce this argument into a binary-safe byte sequence.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::UnsupportedFloat`] for [`Arg::Float`];
    /// every other variant coerces infallibly.
    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        match self {
            Self::Text(text) => Ok(Bytes::copy_from_slice(text.as_bytes())),
            Self::Symbol(symbol) => Ok(Bytes::from_static(symbol.as_bytes())),
            Self::Blob(data) | Self::Opaque(data) => Ok(data.clone()),
            Self::Int(value) => {
                let mut buf = itoa::Buffer::new();
                Ok(Bytes::copy_from_slice(buf.format(*value).as_bytes()))
            }
            Self::Float(value) => Err(EncodeError::UnsupportedFloat(*value)),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self { Self::Text(value.to_owned()) }
}

impl From<String> for Arg {
    fn from(value: String) -> Self { Self::Text(value) }
}

impl From<Bytes> for Arg {
    fn from(value: Bytes) -> Self { Self::Blob(value) }
}

impl From<Vec<u8>> for Arg {
    fn from(value: Vec<u8>) -> Self { Self::Blob(Bytes::from(value)) }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self { Self::Blob(Bytes::copy_from_slice(value)) }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self { Self::Int(value) }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self { Self::Int(i64::from(value)) }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self { Self::Int(i64::from(value)) }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self { Self::Float(value) }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self { Self::Float(f64::from(value)) }
}
