use super::{constants::*, Encoder};
use crate::{
    errors::EncodeError,
    Tnet::{self, *},
};
use std::borrow::Cow;
use tracing::debug;

/// Children of a list, borrowed from the value being encoded.
pub type Items<'a, T> = Box<dyn DoubleEndedIterator<Item = &'a T> + 'a>;

/// Pairs of a dictionary, borrowed from the value being encoded.
pub type Entries<'a, T> = Box<dyn DoubleEndedIterator<Item = (Key<'a, T>, &'a T)> + 'a>;

/// A dictionary key.
///
/// Host maps whose keys are plain strings can hand them over as [`Key::Str`] without
/// wrapping each one in a value first.
pub enum Key<'a, T: 'a> {
    /// A key that is itself a value, encoded like any other.
    Value(&'a T),
    /// A key encoded as a `,` frame.
    Str(&'a [u8]),
}

/// What a value looks like to the encoder: one of the seven tnetstring kinds, with its
/// payload borrowed wherever possible.
pub enum Shape<'a, T: 'a> {
    /// `~`
    Null,
    /// `!`
    Bool(bool),
    /// `#`, as its decimal literal.
    Integer(Cow<'a, str>),
    /// `^`, as its decimal literal.
    Float(Cow<'a, str>),
    /// `,`
    Str(&'a [u8]),
    /// `]`
    List(Items<'a, T>),
    /// `}`
    Dict(Entries<'a, T>),
}

/// Values the encoder can inspect.
///
/// This is the inspection half of a value backend. A value reports its [`Shape`] and the
/// encoder does the rest. Values of a kind tnetstrings cannot carry should return
/// [`EncodeError::UnsupportedType`].
///
/// Integer and float literals are copied into the output as given, so they should be
/// written the way [`De::de_integer`](super::De::de_integer) and
/// [`De::de_float`](super::De::de_float) expect to read them back.
pub trait Ser: Sized {
    /// Describes `self` for the encoder.
    fn shape(&self) -> Result<Shape<'_, Self>, EncodeError>;
}

/// Output buffer that is filled back to front.
///
/// A frame's length prefix comes before its payload, but a container's payload length is
/// only known once its children are rendered. Writing everything in reverse lets the
/// prefix be emitted after the payload, so each container is rendered in one pass with no
/// shifting. `finalize` flips the buffer into wire order.
#[derive(Debug, Default)]
pub(crate) struct RevBuf(Vec<u8>);

impl RevBuf {
    pub(crate) fn new() -> Self { RevBuf::default() }

    #[inline]
    fn put_u8(&mut self, u: u8) { self.0.push(u) }

    #[inline]
    fn put_slice(&mut self, slice: &[u8]) { self.0.extend(slice.iter().rev()) }

    /// Emits `len ':'`, reversed.
    #[inline]
    fn put_len(&mut self, len: usize) {
        self.put_u8(LEN_SEP);
        let mut n = len;
        loop {
            self.put_u8(b'0' + (n % 10) as u8);
            n /= 10;
            if n == 0 {
                break;
            }
        }
    }

    fn put_frame(&mut self, payload: &[u8], tag: u8) {
        self.put_u8(tag);
        self.put_slice(payload);
        self.put_len(payload.len());
    }

    /// Starts a container. Everything written until the matching `close` is its payload.
    fn open(&mut self, tag: u8) -> usize {
        self.put_u8(tag);
        self.0.len()
    }

    fn close(&mut self, mark: usize) {
        let len = self.0.len() - mark;
        self.put_len(len);
    }

    pub(crate) fn finalize(mut self) -> Vec<u8> {
        self.0.reverse();
        self.0
    }
}

impl Encoder {
    pub(crate) fn ser_value<T: Ser>(
        &self,
        value: &T,
        out: &mut RevBuf,
        depth: usize,
    ) -> Result<(), EncodeError> {
        let shape = value.shape()?;
        self.ser_shape(shape, out, depth)
    }

    fn enter(&self, level: usize) -> Result<(), EncodeError> {
        if level > self.max_depth {
            debug!(max_depth = self.max_depth, "tnetstring nesting limit reached while encoding");
            Err(EncodeError::DepthExceeded(self.max_depth))
        } else {
            Ok(())
        }
    }

    fn ser_shape<'a, T: Ser + 'a>(
        &self,
        shape: Shape<'a, T>,
        out: &mut RevBuf,
        depth: usize,
    ) -> Result<(), EncodeError> {
        match shape {
            Shape::Null => out.put_frame(b"", TAG_NULL),
            Shape::Bool(true) => out.put_frame(LIT_TRUE, TAG_BOOL),
            Shape::Bool(false) => out.put_frame(LIT_FALSE, TAG_BOOL),
            Shape::Integer(lit) => out.put_frame(lit.as_bytes(), TAG_INTEGER),
            Shape::Float(lit) => out.put_frame(lit.as_bytes(), TAG_FLOAT),
            Shape::Str(bs) => out.put_frame(bs, TAG_STRING),
            Shape::List(items) => {
                self.enter(depth + 1)?;
                let mark = out.open(TAG_LIST);
                for item in items.rev() {
                    self.ser_value(item, out, depth + 1)?;
                }
                out.close(mark);
            }
            Shape::Dict(entries) => {
                self.enter(depth + 1)?;
                let mark = out.open(TAG_DICT);
                for (key, value) in entries.rev() {
                    self.ser_value(value, out, depth + 1)?;
                    match key {
                        Key::Value(k) => self.ser_value(k, out, depth + 1)?,
                        Key::Str(bs) => out.put_frame(bs, TAG_STRING),
                    }
                }
                out.close(mark);
            }
        }
        Ok(())
    }
}

impl Ser for Tnet {
    fn shape(&self) -> Result<Shape<'_, Tnet>, EncodeError> {
        Ok(match self {
            Null => Shape::Null,
            Bool(b) => Shape::Bool(*b),
            Tint(i) => Shape::Integer(Cow::Owned(i.to_string())),
            Tfloat(f) => Shape::Float(Cow::Owned(f.to_string())),
            Byt(bs) => Shape::Str(bs),
            List(items) => Shape::List(Box::new(items.iter())),
            Dict(entries) => Shape::Dict(Box::new(
                entries.iter().map(|(k, v)| (Key::Value(k), v)),
            )),
        })
    }
}
