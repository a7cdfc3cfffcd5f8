//! # Tnetstring encoder and decoder
//!
//! Every value is one frame, `length ':' payload tag`. The decoder reads exactly one frame
//! and hands scalar payloads to a [`De`] backend; the encoder asks a [`Ser`] backend for
//! the [`Shape`] of each value and renders it.
//!
//! # Example
//!
//! ```
//! use tnetstring::prelude::*;
//!
//! let value = Tnet::from(vec![Tnet::from(12345), Tnet::from(true), Tnet::from(0)]);
//!
//! let enc = dumps(&value).unwrap();
//! assert_eq!(enc, b"19:5:12345#4:true!1:0#]".to_vec());
//!
//! let dec: Tnet = loads(enc).unwrap();
//! assert_eq!(dec, value);
//!
//! // several frames back to back
//! let (first, rest) = pop::<Tnet>("5:12345#3:abc,").unwrap();
//! assert_eq!(first, Tnet::from(12345));
//! assert_eq!(&rest[..], b"3:abc,");
//! ```

use crate::errors::{DecodeError, EncodeError, Error};
use bytes::Bytes;
use std::io::{self, BufRead, Read, Write};
use tracing::{debug, trace};

pub mod de;
pub use de::*;
pub mod ser;
pub use ser::*;
mod constants;
pub use constants::DEFAULT_MAX_DEPTH;
use constants::{LEN_SEP, MAX_LEN_DIGITS};
pub(crate) mod lexical;

/// Decoding configuration.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// let shallow = Decoder::new().max_depth(1);
///
/// assert!(shallow.loads::<Tnet>("0:]").is_ok());
/// assert_eq!(
///     shallow.loads::<Tnet>("3:0:]]"),
///     Err(DecodeError::DepthExceeded(1))
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Decoder {
    /// A decoder with the default nesting limit.
    pub fn new() -> Self { Decoder::default() }

    /// Sets the deepest container nesting accepted. A top-level container is at depth 1,
    /// so a limit of 0 accepts only scalars.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decodes the frame at the front of `bs`, returning the value and the bytes after it.
    /// The remainder is not inspected.
    ///
    /// # Arguments
    ///
    /// * `bs` - A buffer starting with a tnetstring.
    pub fn pop<T: De>(&self, bs: impl Into<Bytes>) -> Result<(T, Bytes), DecodeError> {
        let bs = bs.into();
        let len = bs.len();
        let mut data = TnetBytes::new(bs);
        match self.de_value(&mut data, 0) {
            Ok(t) => {
                let rest = data.into_inner();
                trace!(consumed = len - rest.len(), remaining = rest.len(), "decoded tnetstring");
                Ok((t, rest))
            }
            Err(e) => {
                debug!(error = %e, len, "failed to decode tnetstring");
                Err(e)
            }
        }
    }

    /// Decodes a buffer holding exactly one tnetstring.
    ///
    /// # Arguments
    ///
    /// * `bs` - A buffer containing one tnetstring and nothing else.
    pub fn loads<T: De>(&self, bs: impl Into<Bytes>) -> Result<T, DecodeError> {
        let (t, rest) = self.pop(bs)?;
        if rest.is_empty() {
            Ok(t)
        } else {
            debug!(trailing = rest.len(), "trailing data after tnetstring");
            Err(DecodeError::TrailingData)
        }
    }

    /// Reads one tnetstring from `reader`, consuming exactly its bytes.
    ///
    /// Returns `Ok(None)` if the reader is already at end of input. Unbuffered sources
    /// need a [`std::io::BufReader`] around them.
    ///
    /// # Arguments
    ///
    /// * `reader` - The stream to read from.
    pub fn load<T: De, R: BufRead>(&self, reader: &mut R) -> Result<Option<T>, Error> {
        let mut frame = Vec::new();
        loop {
            let (used, done, bad) = {
                let buf = match reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                };
                if buf.is_empty() {
                    if frame.is_empty() {
                        return Ok(None);
                    }
                    return Err(DecodeError::MalformedLength.into());
                }
                let (mut used, mut done, mut bad) = (0, false, false);
                for &b in buf {
                    used += 1;
                    frame.push(b);
                    if b == LEN_SEP {
                        done = true;
                        break;
                    }
                    if !b.is_ascii_digit() || frame.len() > MAX_LEN_DIGITS {
                        bad = true;
                        break;
                    }
                }
                (used, done, bad)
            };
            reader.consume(used);
            if bad {
                return Err(DecodeError::MalformedLength.into());
            }
            if done {
                break;
            }
        }

        let len = parse_len(&frame[..frame.len() - 1])?;
        // room for the tag byte
        let want = (len as u64)
            .checked_add(1)
            .ok_or(DecodeError::TruncatedInput)?;
        let got = reader.by_ref().take(want).read_to_end(&mut frame)?;
        if (got as u64) < want {
            return Err(DecodeError::TruncatedInput.into());
        }

        Ok(Some(self.loads(frame)?))
    }
}

/// Encoding configuration.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// let flat = Encoder::new().max_depth(0);
///
/// assert!(flat.dumps(&Tnet::from(1)).is_ok());
/// assert_eq!(
///     flat.dumps(&Tnet::List(vec![])),
///     Err(EncodeError::DepthExceeded(0))
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoder {
    max_depth: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Encoder {
    /// An encoder with the default nesting limit.
    pub fn new() -> Self { Encoder::default() }

    /// Sets the deepest container nesting rendered. Deeper values fail with
    /// [`EncodeError::DepthExceeded`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Encodes a value into a fresh buffer.
    ///
    /// # Arguments
    ///
    /// * `t` - The value to be encoded.
    pub fn dumps<T: Ser>(&self, t: &T) -> Result<Vec<u8>, EncodeError> {
        let mut out = RevBuf::new();
        match self.ser_value(t, &mut out, 0) {
            Ok(()) => {
                let out = out.finalize();
                trace!(len = out.len(), "encoded tnetstring");
                Ok(out)
            }
            Err(e) => {
                debug!(error = %e, "failed to encode tnetstring");
                Err(e)
            }
        }
    }

    /// Encodes a value and writes it to `writer`. Nothing is written if encoding fails.
    ///
    /// # Arguments
    ///
    /// * `t` - The value to be encoded.
    /// * `writer` - The stream to write to.
    pub fn dump<T: Ser, W: Write>(&self, t: &T, writer: &mut W) -> Result<(), Error> {
        let out = self.dumps(t)?;
        writer.write_all(&out)?;
        Ok(())
    }
}

/// Decodes a buffer holding exactly one tnetstring, with the default configuration.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// let hello: Tnet = loads("11:hello world,").unwrap();
/// assert_eq!(hello, Tnet::from("hello world"));
///
/// assert_eq!(loads::<Tnet>("5:12345#"), Ok(Tnet::from(12345)));
/// assert_eq!(loads::<Tnet>("5:123#"), Err(DecodeError::TruncatedInput));
/// ```
pub fn loads<T: De>(bs: impl Into<Bytes>) -> Result<T, DecodeError> { Decoder::new().loads(bs) }

/// Decodes the first tnetstring of a buffer, with the default configuration, returning it
/// with the rest of the buffer.
pub fn pop<T: De>(bs: impl Into<Bytes>) -> Result<(T, Bytes), DecodeError> {
    Decoder::new().pop(bs)
}

/// Reads one tnetstring from a stream, with the default configuration.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// let mut input: &[u8] = b"0:~4:true!";
///
/// assert_eq!(load::<Tnet, _>(&mut input).unwrap(), Some(Tnet::Null));
/// assert_eq!(load::<Tnet, _>(&mut input).unwrap(), Some(Tnet::Bool(true)));
/// assert_eq!(load::<Tnet, _>(&mut input).unwrap(), None);
/// ```
pub fn load<T: De, R: BufRead>(reader: &mut R) -> Result<Option<T>, Error> {
    Decoder::new().load(reader)
}

/// Encodes a value, with the default configuration.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// assert_eq!(dumps(&Tnet::Null).unwrap(), b"0:~".to_vec());
/// ```
pub fn dumps<T: Ser>(t: &T) -> Result<Vec<u8>, EncodeError> { Encoder::new().dumps(t) }

/// Encodes a value onto a stream, with the default configuration.
pub fn dump<T: Ser, W: Write>(t: &T, writer: &mut W) -> Result<(), Error> {
    Encoder::new().dump(t, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vecmap::VecMap, Tnet};

    #[test]
    fn hello_world() {
        assert_eq!(loads::<Tnet>("11:hello world,"), Ok(Tnet::from("hello world")));
    }

    #[test]
    fn mixed_list() {
        let v = loads::<Tnet>("19:5:12345#4:true!1:0#]").unwrap();
        assert_eq!(
            v,
            Tnet::List(vec![Tnet::from(12345), Tnet::Bool(true), Tnet::from(0)])
        );
        assert_eq!(dumps(&v).unwrap(), b"19:5:12345#4:true!1:0#]".to_vec());
    }

    #[test]
    fn empty_dict() {
        assert_eq!(loads::<Tnet>("0:}"), Ok(Tnet::Dict(VecMap::new())));
    }

    #[test]
    fn pop_leaves_rest() {
        let (v, rest) = pop::<Tnet>("5:12345#3:abc,").unwrap();
        assert_eq!(v, Tnet::from(12345));
        assert_eq!(&rest[..], b"3:abc,");

        let (v, rest) = pop::<Tnet>(rest).unwrap();
        assert_eq!(v, Tnet::from("abc"));
        assert!(rest.is_empty());
    }

    #[test]
    fn trailing_data() {
        assert_eq!(loads::<Tnet>("0:~0:~"), Err(DecodeError::TrailingData));
        assert_eq!(loads::<Tnet>("0:~\n"), Err(DecodeError::TrailingData));
    }

    #[test]
    fn bad_payloads() {
        assert_eq!(loads::<Tnet>("5:123#"), Err(DecodeError::TruncatedInput));
        assert_eq!(loads::<Tnet>("3:1 2#"), Err(DecodeError::InvalidNumber));
    }

    #[test]
    fn null() {
        assert_eq!(dumps(&Tnet::Null).unwrap(), b"0:~".to_vec());
    }

    #[test]
    fn decoded_strings_share_input() {
        let input = Bytes::from_static(b"11:hello world,");
        let v: Tnet = loads(input.clone()).unwrap();
        let s = v.to_bytes().unwrap();
        assert_eq!(s.as_ptr(), input[3..].as_ptr());
    }

    #[test]
    fn stream_round_trip() {
        let values = vec![
            Tnet::from("abc"),
            Tnet::List(vec![Tnet::Null, Tnet::from(-1.5)]),
            Tnet::from(7),
        ];
        let mut wire = Vec::new();
        for v in &values {
            dump(v, &mut wire).unwrap();
        }

        let mut reader = &wire[..];
        let mut back = Vec::new();
        while let Some(v) = load::<Tnet, _>(&mut reader).unwrap() {
            back.push(v);
        }
        assert_eq!(back, values);
    }

    #[test]
    fn stream_errors() {
        let mut reader: &[u8] = b"5:123";
        match load::<Tnet, _>(&mut reader) {
            Err(Error::Load(DecodeError::TruncatedInput)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let mut reader: &[u8] = b"12";
        match load::<Tnet, _>(&mut reader) {
            Err(Error::Load(DecodeError::MalformedLength)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let mut reader: &[u8] = b"123456789012345678901:";
        match load::<Tnet, _>(&mut reader) {
            Err(Error::Load(DecodeError::MalformedLength)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let mut reader: &[u8] = b"18446744073709551615:";
        match load::<Tnet, _>(&mut reader) {
            Err(Error::Load(DecodeError::TruncatedInput)) => {}
            other => panic!("unexpected {:?}", other),
        }

        let mut reader: &[u8] = b"1x:";
        match load::<Tnet, _>(&mut reader) {
            Err(Error::Load(DecodeError::MalformedLength)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stream_length_split_across_reads() {
        let wire: &[u8] = b"11:3:abc,2:xy,]0:~";
        let mut reader = io::BufReader::with_capacity(1, wire);
        assert_eq!(
            load::<Tnet, _>(&mut reader).unwrap(),
            Some(Tnet::from(vec![Tnet::from("abc"), Tnet::from("xy")]))
        );
        assert_eq!(load::<Tnet, _>(&mut reader).unwrap(), Some(Tnet::Null));
        assert_eq!(load::<Tnet, _>(&mut reader).unwrap(), None);
    }

    #[test]
    fn stream_reads_only_one_frame() {
        let mut reader: &[u8] = b"1:x,garbage";
        assert_eq!(
            load::<Tnet, _>(&mut reader).unwrap(),
            Some(Tnet::from("x"))
        );
        assert_eq!(reader, b"garbage");
    }

    #[test]
    fn failed_dump_writes_nothing() {
        let mut out = Vec::new();
        let deep = Tnet::List(vec![Tnet::List(vec![])]);
        assert!(Encoder::new().max_depth(1).dump(&deep, &mut out).is_err());
        assert!(out.is_empty());
    }
}
