use super::{constants::*, lexical, Decoder};
use crate::{
    errors::DecodeError,
    vecmap::VecMap,
    Tnet::{self, *},
};
use bytes::{Buf, Bytes};
use failure::Error;
use tracing::debug;

/// Values the decoder can build.
///
/// This is the construction half of a value backend: the decoder owns the grammar and
/// the recursion, and calls these functions to turn each payload into a host value.
/// `List` and `Dict` are the accumulators used while a container's children are being
/// decoded; `from_list` and `from_dict` seal them into a value.
///
/// `de_integer` and `de_float` only ever see literals that passed the strict numeric
/// grammar, so an `Err` from them means the backend cannot represent the number, not that
/// it is malformed. Any `Err` returned here surfaces as [`DecodeError::Backend`].
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// // a backend that only counts the scalars it sees
/// #[derive(Debug, PartialEq)]
/// struct Count(usize);
///
/// impl De for Count {
///     type List = usize;
///     type Dict = usize;
///
///     fn de_string(_: Bytes) -> Result<Self, failure::Error> { Ok(Count(1)) }
///     fn de_integer(_: &str) -> Result<Self, failure::Error> { Ok(Count(1)) }
///     fn de_float(_: &str) -> Result<Self, failure::Error> { Ok(Count(1)) }
///     fn de_bool(_: bool) -> Self { Count(1) }
///     fn de_null() -> Self { Count(1) }
///
///     fn new_list() -> usize { 0 }
///     fn list_append(list: &mut usize, item: Self) -> Result<(), failure::Error> {
///         *list += item.0;
///         Ok(())
///     }
///     fn from_list(list: usize) -> Self { Count(list) }
///
///     fn new_dict() -> usize { 0 }
///     fn dict_insert(dict: &mut usize, k: Self, v: Self) -> Result<(), failure::Error> {
///         *dict += k.0 + v.0;
///         Ok(())
///     }
///     fn from_dict(dict: usize) -> Self { Count(dict) }
/// }
///
/// let n: Count = loads("19:5:12345#4:true!1:0#]").unwrap();
/// assert_eq!(n, Count(3));
/// ```
pub trait De: Sized {
    /// Accumulator for list elements.
    type List;
    /// Accumulator for dictionary pairs.
    type Dict;

    /// Builds a bytestring from a `,` payload. The payload shares the input buffer.
    fn de_string(payload: Bytes) -> Result<Self, Error>;
    /// Builds an integer from a `-?[0-9]+` literal.
    fn de_integer(literal: &str) -> Result<Self, Error>;
    /// Builds a float from a decimal or non-finite literal.
    fn de_float(literal: &str) -> Result<Self, Error>;
    /// Builds a boolean.
    fn de_bool(b: bool) -> Self;
    /// Builds null.
    fn de_null() -> Self;

    /// Starts an empty list.
    fn new_list() -> Self::List;
    /// Appends to a list under construction.
    fn list_append(list: &mut Self::List, item: Self) -> Result<(), Error>;
    /// Finishes a list.
    fn from_list(list: Self::List) -> Self;

    /// Starts an empty dictionary.
    fn new_dict() -> Self::Dict;
    /// Adds a pair to a dictionary under construction, in encounter order.
    fn dict_insert(dict: &mut Self::Dict, key: Self, value: Self) -> Result<(), Error>;
    /// Finishes a dictionary.
    fn from_dict(dict: Self::Dict) -> Self;
}

/// Parses the digits of a length prefix.
pub(crate) fn parse_len(digits: &[u8]) -> Result<usize, DecodeError> {
    if digits.is_empty()
        || digits.len() > MAX_LEN_DIGITS
        || (digits.len() > 1 && digits[0] == b'0')
        || !digits.iter().all(u8::is_ascii_digit)
    {
        return Err(DecodeError::MalformedLength);
    }

    digits
        .iter()
        .try_fold(0usize, |acc, d| {
            acc.checked_mul(10)?.checked_add((d - b'0') as usize)
        })
        .ok_or(DecodeError::MalformedLength)
}

/// A buffer being consumed one frame at a time.
#[derive(Debug)]
pub(crate) struct TnetBytes(Bytes);

impl TnetBytes {
    pub(crate) fn new(bs: Bytes) -> Self { TnetBytes(bs) }

    pub(crate) fn is_empty(&self) -> bool { self.0.is_empty() }

    pub(crate) fn into_inner(self) -> Bytes { self.0 }

    /// Reads `digits ':'`.
    #[inline]
    fn read_len(&mut self) -> Result<usize, DecodeError> {
        let n_digits = self.0.iter().take_while(|b| b.is_ascii_digit()).count();
        if self.0.get(n_digits) != Some(&LEN_SEP) {
            return Err(DecodeError::MalformedLength);
        }
        let len = parse_len(&self.0[..n_digits])?;
        self.0.advance(n_digits + 1);
        Ok(len)
    }

    /// Reads one whole frame, returning its payload and tag and leaving the cursor just
    /// past the tag.
    #[inline]
    pub(crate) fn read_frame(&mut self) -> Result<(Bytes, u8), DecodeError> {
        let len = self.read_len()?;
        if self.0.len() <= len {
            return Err(DecodeError::TruncatedInput);
        }
        let payload = self.0.split_to(len);
        let tag = self.0.get_u8();
        Ok((payload, tag))
    }
}

fn literal(payload: &[u8], valid: fn(&[u8]) -> bool) -> Result<&str, DecodeError> {
    if !valid(payload) {
        return Err(DecodeError::InvalidNumber);
    }
    std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidNumber)
}

impl Decoder {
    /// Decodes the frame at the front of `data`, consuming exactly that frame.
    pub(crate) fn de_value<T: De>(
        &self,
        data: &mut TnetBytes,
        depth: usize,
    ) -> Result<T, DecodeError> {
        let (payload, tag) = data.read_frame()?;
        match tag {
            TAG_STRING => T::de_string(payload).map_err(DecodeError::backend),
            TAG_INTEGER => {
                T::de_integer(literal(&payload, lexical::is_integer)?).map_err(DecodeError::backend)
            }
            TAG_FLOAT => {
                T::de_float(literal(&payload, lexical::is_float)?).map_err(DecodeError::backend)
            }
            TAG_BOOL => match &payload[..] {
                LIT_TRUE => Ok(T::de_bool(true)),
                LIT_FALSE => Ok(T::de_bool(false)),
                _ => Err(DecodeError::InvalidBool),
            },
            TAG_NULL if payload.is_empty() => Ok(T::de_null()),
            TAG_NULL => Err(DecodeError::InvalidNull),
            TAG_LIST => self.de_list(payload, depth + 1),
            TAG_DICT => self.de_dict(payload, depth + 1),
            unknown => Err(DecodeError::UnknownTag(unknown)),
        }
    }

    fn enter(&self, level: usize) -> Result<(), DecodeError> {
        if level > self.max_depth {
            debug!(max_depth = self.max_depth, "tnetstring nesting limit reached while decoding");
            Err(DecodeError::DepthExceeded(self.max_depth))
        } else {
            Ok(())
        }
    }

    fn de_list<T: De>(&self, payload: Bytes, level: usize) -> Result<T, DecodeError> {
        self.enter(level)?;
        let items = &mut TnetBytes::new(payload);
        let mut list = T::new_list();
        while !items.is_empty() {
            let item = self
                .de_value(items, level)
                .map_err(|e| e.inside(DecodeError::MalformedList))?;
            T::list_append(&mut list, item).map_err(DecodeError::backend)?;
        }
        Ok(T::from_list(list))
    }

    fn de_dict<T: De>(&self, payload: Bytes, level: usize) -> Result<T, DecodeError> {
        self.enter(level)?;
        let entries = &mut TnetBytes::new(payload);
        let mut dict = T::new_dict();
        while !entries.is_empty() {
            let key = self
                .de_value(entries, level)
                .map_err(|e| e.inside(DecodeError::MalformedMapping))?;
            // a key must be followed by its value
            if entries.is_empty() {
                return Err(DecodeError::MalformedMapping);
            }
            let value = self
                .de_value(entries, level)
                .map_err(|e| e.inside(DecodeError::MalformedMapping))?;
            T::dict_insert(&mut dict, key, value).map_err(DecodeError::backend)?;
        }
        Ok(T::from_dict(dict))
    }
}

impl De for Tnet {
    type Dict = VecMap<Tnet, Tnet>;
    type List = Vec<Tnet>;

    fn de_string(payload: Bytes) -> Result<Tnet, Error> { Ok(Byt(payload)) }

    fn de_integer(literal: &str) -> Result<Tnet, Error> { Ok(Tint(literal.parse()?)) }

    fn de_float(literal: &str) -> Result<Tnet, Error> { Ok(Tfloat(literal.parse()?)) }

    fn de_bool(b: bool) -> Tnet { Bool(b) }

    fn de_null() -> Tnet { Null }

    fn new_list() -> Vec<Tnet> { Vec::new() }

    fn list_append(list: &mut Vec<Tnet>, item: Tnet) -> Result<(), Error> {
        list.push(item);
        Ok(())
    }

    fn from_list(list: Vec<Tnet>) -> Tnet { List(list) }

    fn new_dict() -> VecMap<Tnet, Tnet> { VecMap::new() }

    fn dict_insert(dict: &mut VecMap<Tnet, Tnet>, key: Tnet, value: Tnet) -> Result<(), Error> {
        dict.push(key, value);
        Ok(())
    }

    fn from_dict(dict: VecMap<Tnet, Tnet>) -> Tnet { Dict(dict) }
}
