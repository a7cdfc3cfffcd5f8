use failure::Fail;
use std::io;

/// An error encountered when decoding fails.
///
/// Every variant is a permanent property of the input: decoding the same bytes again
/// fails the same way.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The length prefix is missing, has a leading zero, overflows, or is not followed by
    /// `:`.
    #[fail(display = "malformed length prefix")]
    MalformedLength,
    /// Fewer bytes remain than the length prefix promises, plus one for the tag.
    #[fail(display = "input ends before the declared payload and tag")]
    TruncatedInput,
    /// A `#` or `^` payload is not a complete decimal literal.
    #[fail(display = "invalid numeric payload")]
    InvalidNumber,
    /// A `!` payload is neither `true` nor `false`.
    #[fail(display = "invalid boolean payload")]
    InvalidBool,
    /// A `~` frame with a non-empty payload.
    #[fail(display = "null frame with non-empty payload")]
    InvalidNull,
    /// A list payload contains a frame that does not fit inside it.
    #[fail(display = "malformed list payload")]
    MalformedList,
    /// A dictionary payload contains a key without a value, or a frame that does not fit
    /// inside it.
    #[fail(display = "malformed dictionary payload")]
    MalformedMapping,
    /// The tag byte is not one of `,#^!~]}`.
    #[fail(display = "unknown type tag 0x{:02x}", _0)]
    UnknownTag(u8),
    /// Bytes remain after the only expected frame.
    #[fail(display = "trailing data after value")]
    TrailingData,
    /// Containers are nested deeper than the configured limit.
    #[fail(display = "nesting exceeds the maximum depth of {}", _0)]
    DepthExceeded(usize),
    /// The value backend refused to construct a value from a well-formed payload.
    #[fail(display = "value backend rejected payload: {}", _0)]
    Backend(String),
}

impl DecodeError {
    /// Reports a framing failure of a child frame as a failure of the container
    /// holding it.
    pub(crate) fn inside(self, container: DecodeError) -> DecodeError {
        match self {
            DecodeError::MalformedLength | DecodeError::TruncatedInput => container,
            other => other,
        }
    }

    pub(crate) fn backend(e: failure::Error) -> DecodeError { DecodeError::Backend(e.to_string()) }
}

/// An error encountered when encoding fails.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The value is of a kind tnetstrings cannot carry.
    #[fail(display = "cannot encode a value of type {}", _0)]
    UnsupportedType(String),
    /// Containers are nested deeper than the configured limit.
    #[fail(display = "nesting exceeds the maximum depth of {}", _0)]
    DepthExceeded(usize),
    /// The value backend could not describe a value.
    #[fail(display = "value backend failed: {}", _0)]
    Backend(String),
}

/// Any error from the stream-level entry points.
#[derive(Debug, Fail)]
pub enum Error {
    /// Decoding failed.
    #[fail(display = "load failed: {}", _0)]
    Load(#[fail(cause)] DecodeError),
    /// Encoding failed.
    #[fail(display = "dump failed: {}", _0)]
    Dump(#[fail(cause)] EncodeError),
    /// Reading or writing the underlying stream failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[fail(cause)] io::Error),
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Error { Error::Load(e) }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Error { Error::Dump(e) }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error { Error::Io(e) }
}
