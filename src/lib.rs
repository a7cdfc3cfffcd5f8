//! # tnetstring
//!
//! Tnetstrings (typed netstrings) are a length-prefixed, self-delimiting serialization
//! format. Every value is one frame:
//!
//! ```text
//! length ':' payload tag
//! ```
//!
//! where `length` is the payload's byte count in ASCII decimal and `tag` is a single byte
//! naming the payload's type. Because the length comes first, a reader never scans for
//! delimiters, and frames can be concatenated into streams.
//!
//! # Usage
//!
//! The native value type is [`Tnet`]. Encode with [`dumps`], decode with [`loads`]:
//!
//! ```
//! use tnetstring::prelude::*;
//!
//! let value = Tnet::from(vec![Tnet::from(12345), Tnet::from(true), Tnet::from(0)]);
//!
//! let encoded = dumps(&value).unwrap();
//! assert_eq!(encoded, b"19:5:12345#4:true!1:0#]".to_vec());
//!
//! let decoded: Tnet = loads(encoded).unwrap();
//! assert_eq!(decoded, value);
//! ```
//!
//! Plain Rust data converts to and from [`Tnet`] through [`TnetRep`](rep::TnetRep):
//!
//! ```
//! use tnetstring::prelude::*;
//!
//! let pairs: Vec<(String, i64)> = vec![("a".to_string(), 1), ("b".to_string(), 2)];
//!
//! let wire = dumps(&pairs.to_tnet()).unwrap();
//! let back: Vec<(String, i64)> = TnetRep::from_tnet(loads(wire).unwrap()).unwrap();
//!
//! assert_eq!(back, pairs);
//! ```
//!
//! Other value representations plug in by implementing [`De`](encoding::De) and
//! [`Ser`](encoding::Ser). With the `json` feature, [`serde_json::Value`] is one.
//!
//! # Types
//!
//! | Tag | Type       | Payload                                  | [`Tnet`] variant   |
//! | --- | ---        | ---                                      | ---                |
//! | `,` | bytestring | raw bytes                                | [`Tnet::Byt`]      |
//! | `#` | integer    | `-?[0-9]+`                               | [`Tnet::Tint`]     |
//! | `^` | float      | decimal literal, or `inf`/`nan` spelling | [`Tnet::Tfloat`]   |
//! | `!` | boolean    | `true` or `false`                        | [`Tnet::Bool`]     |
//! | `~` | null       | empty                                    | [`Tnet::Null`]     |
//! | `]` | list       | concatenated frames                      | [`Tnet::List`]     |
//! | `}` | dictionary | alternating key and value frames         | [`Tnet::Dict`]     |
//!
//! Lengths have no leading zeros (a lone `0` is fine) and are at most 20 digits.
//!
//! ## Integers
//!
//! Integers are unbounded. Literals that fit in an `i64` decode to [`Inum::I64`], longer
//! ones to [`Inum::Int`].
//!
//! ```
//! use tnetstring::prelude::*;
//!
//! let big: Tnet = loads("30:123456789012345678901234567890#").unwrap();
//! assert!(big.to_inum().unwrap().to_i64().is_none());
//! ```
//!
//! ## Floats
//!
//! Floats are written as the shortest decimal that reads back to the same `f64`.
//!
//! ```
//! use tnetstring::prelude::*;
//!
//! assert_eq!(dumps(&Tnet::from(0.1)).unwrap(), b"3:0.1^".to_vec());
//! ```
//!
//! ## Dictionaries
//!
//! Keys may be any value. Pairs are kept in wire order, duplicates included, in a
//! [`VecMap`]; lookups see the last pair for a key.
//!
//! ```
//! use tnetstring::prelude::*;
//!
//! let d: Tnet = loads("16:1:k,1:1#1:k,1:2#}").unwrap();
//! assert_eq!(d.get("k"), Some(&Tnet::from(2)));
//! ```
//!
//! # Logging
//!
//! Failures and depth-limit trips are reported at `debug` level, successful calls at
//! `trace` level, through [`tracing`]. No subscriber is installed.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
mod util;

pub mod encoding;
pub mod errors;
pub mod float;
pub mod inum;
#[cfg(feature = "json")] pub mod json;
pub mod prelude;
pub mod rep;
pub mod vecmap;

pub use encoding::{dump, dumps, load, loads, pop, Decoder, Encoder, DEFAULT_MAX_DEPTH};
pub use errors::{DecodeError, EncodeError, Error};

use bytes::Bytes;
use failure::bail;
use float::*;
use inum::*;
use num_bigint::BigInt;
use rep::TnetRep;
use std::fmt;
use vecmap::*;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// [`Tnet`] and its variants, one per tnetstring type.
///
/// # Example
///
/// ```
/// use tnetstring::prelude::*;
///
/// let b = Tnet::Bool(true);
///
/// let val = match b {
///     Tnet::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Tnet {
    /// Null, `~`. Corresponds to [`None`].
    Null,
    /// Boolean, `!`.
    Bool(bool),
    /// Integer, `#`.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::{Tnet::Tint, *};
    ///
    /// let t_num = Tint(Inum::I64(1));
    ///
    /// assert_eq!(dumps(&t_num).unwrap(), b"1:1#".to_vec());
    /// ```
    Tint(Inum),
    /// Float, `^`.
    Tfloat(Float),
    /// Bytestring, `,`. Not necessarily UTF-8.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::{Tnet::Byt, *};
    ///
    /// let t_bytes = Byt(Bytes::from_static(b"hello world"));
    /// ```
    Byt(Bytes),
    /// List, `]`.
    List(Vec<Tnet>),
    /// Dictionary, `}`. Keys are arbitrary values and may repeat.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::{Tnet::Dict, *};
    ///
    /// let vmap = VecMap::from(vec![(Tnet::from("hello world"), Tnet::from(1))]);
    ///
    /// let t_map = Dict(vmap);
    /// ```
    Dict(VecMap<Tnet, Tnet>),
}

use Tnet::*;

impl Tnet {
    /// Borrows the elements of a [`Tnet::List`].
    /// This will return an [`Error`](failure::Error) if the value is not a list.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::*;
    ///
    /// let t = vec![1, 2, 3].into_tnet();
    ///
    /// assert_eq!(t.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Result<&Vec<Tnet>, failure::Error> {
        match self {
            List(v) => Ok(v),
            _ => bail!("Value is not a list"),
        }
    }

    /// Takes the elements of a [`Tnet::List`].
    pub fn into_vec(self) -> Result<Vec<Tnet>, failure::Error> {
        match self {
            List(v) => Ok(v),
            _ => bail!("Value is not a list"),
        }
    }

    /// Borrows the pairs of a [`Tnet::Dict`].
    pub fn to_dict(&self) -> Result<&VecMap<Tnet, Tnet>, failure::Error> {
        match self {
            Dict(m) => Ok(m),
            _ => bail!("Value is not a dictionary"),
        }
    }

    /// Takes the pairs of a [`Tnet::Dict`].
    pub fn into_dict(self) -> Result<VecMap<Tnet, Tnet>, failure::Error> {
        match self {
            Dict(m) => Ok(m),
            _ => bail!("Value is not a dictionary"),
        }
    }

    /// Looks up `key` in a [`Tnet::Dict`]. When a key repeats, the last pair wins.
    /// Returns `None` for missing keys and for values that are not dictionaries.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::*;
    ///
    /// let d = Tnet::Dict(VecMap::from(vec![
    ///     (Tnet::from("name"), Tnet::from("x")),
    ///     (Tnet::from(7), Tnet::Null),
    /// ]));
    ///
    /// assert_eq!(d.get("name"), Some(&Tnet::from("x")));
    /// assert_eq!(d.get(&Tnet::from(7)), Some(&Tnet::Null));
    /// assert_eq!(d.get("missing"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&Tnet>
    where
        Tnet: PartialEq<Q>,
        Q: ?Sized,
    {
        match self {
            Dict(m) => m.get(key),
            _ => None,
        }
    }

    /// Converts into any [`TnetRep`] type.
    pub fn into_rep<T: TnetRep>(self) -> Option<T> { T::from_tnet(self) }

    /// Creates a bytestring from a static slice without copying.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::*;
    ///
    /// let t_static = Tnet::from_static(b"this is a static bytestring");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Tnet { Byt(Bytes::from_static(bytes)) }

    /// Indicates whether the value is [`Tnet::Null`].
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Borrows the integer of a [`Tnet::Tint`].
    pub fn to_inum(&self) -> Result<&Inum, failure::Error> {
        match self {
            Tint(i) => Ok(i),
            _ => bail!("Value is not an integer"),
        }
    }

    /// Takes the integer of a [`Tnet::Tint`].
    pub fn into_inum(self) -> Result<Inum, failure::Error> {
        match self {
            Tint(i) => Ok(i),
            _ => bail!("Value is not an integer"),
        }
    }

    /// The value of a [`Tnet::Bool`].
    pub fn to_bool(&self) -> Result<bool, failure::Error> {
        match self {
            Bool(b) => Ok(*b),
            _ => bail!("Value is not a boolean"),
        }
    }

    /// The value of a [`Tnet::Tfloat`].
    pub fn to_f64(&self) -> Result<f64, failure::Error> {
        match self {
            Tfloat(f) => Ok(f.to_f64()),
            _ => bail!("Value is not a float"),
        }
    }

    /// Borrows the bytes of a [`Tnet::Byt`].
    pub fn to_bytes(&self) -> Result<&Bytes, failure::Error> {
        match self {
            Byt(b) => Ok(b),
            _ => bail!("Value is not a bytestring"),
        }
    }
}

impl PartialEq<[u8]> for Tnet {
    fn eq(&self, other: &[u8]) -> bool {
        match self {
            Byt(b) => b[..] == *other,
            _ => false,
        }
    }
}

impl PartialEq<str> for Tnet {
    fn eq(&self, other: &str) -> bool { *self == *other.as_bytes() }
}

fn fmt_bytes(bytes: &Bytes) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{:?}", s),
        Err(_) => {
            let mut bytes_string: String = "b\"".to_owned();
            bytes
                .iter()
                .for_each(|c| bytes_string.push_str(&format!("\\x{:02x}", c)));
            bytes_string.push('"');

            bytes_string
        }
    }
}

impl fmt::Display for Tnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_dict(m: &VecMap<Tnet, Tnet>, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                map_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_helper(k, indent + 2),
                    value = fmt_helper(v, indent + 2),
                ));

                // last pair closes the block
                if i == m.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(t: &Tnet, indent: usize) -> String {
            match t {
                Null => "null".to_owned(),
                Bool(b) => b.to_string(),
                Byt(bytes) => fmt_bytes(bytes),
                Tfloat(float) => float.to_string(),
                Tint(i) => i.to_string(),
                List(items) => {
                    let mut list_string: String = "[".to_owned();
                    for (i, t) in items.iter().enumerate() {
                        if i != 0 {
                            list_string.push_str(", ");
                        }
                        list_string.push_str(&fmt_helper(t, indent));
                    }
                    list_string.push(']');

                    list_string
                }
                Dict(m) => fmt_dict(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl From<&str> for Tnet {
    fn from(s: &str) -> Tnet { Byt(Bytes::copy_from_slice(s.as_bytes())) }
}

impl From<&[u8]> for Tnet {
    fn from(s: &[u8]) -> Tnet { Byt(Bytes::copy_from_slice(s)) }
}

impl From<String> for Tnet {
    fn from(s: String) -> Tnet { Byt(Bytes::from(s)) }
}

impl From<()> for Tnet {
    fn from(_: ()) -> Tnet { Null }
}

impl<T: Into<Tnet>> From<Option<T>> for Tnet {
    fn from(o: Option<T>) -> Tnet { o.map_or(Null, T::into) }
}

impl<T: Into<Tnet>> From<Vec<T>> for Tnet {
    fn from(v: Vec<T>) -> Tnet { List(v.into_iter().map(T::into).collect()) }
}

impl<K: Into<Tnet>, V: Into<Tnet>> From<VecMap<K, V>> for Tnet {
    fn from(m: VecMap<K, V>) -> Tnet {
        Dict(m.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// bool -> Tnet, From and TryFrom
from_fn!(Tnet, bool, Bool);
try_from_ctor!(Tnet, bool, Bool);

// Inum -> Tnet, From and TryFrom
from_fn!(Tnet, Inum, Tint);
try_from_ctor!(Tnet, Inum, Tint);

// Bytes -> Tnet, From and TryFrom
from_fn!(Tnet, Bytes, Byt);
try_from_ctor!(Tnet, Bytes, Byt);

// Float -> Tnet, From and TryFrom
from_fn!(Tnet, Float, Tfloat);
try_from_ctor!(Tnet, Float, Tfloat);

// containers, TryFrom
try_from_ctor!(Tnet, Vec<Tnet>, List);
try_from_ctor!(Tnet, VecMap<Tnet, Tnet>, Dict);

// Integers
compose_from!(Tnet, Inum, BigInt);
compose_from!(Tnet, Inum, isize);
compose_from!(Tnet, Inum, usize);
compose_from!(Tnet, Inum, i64);
compose_from!(Tnet, Inum, u64);
compose_from!(Tnet, Inum, i128);
compose_from!(Tnet, Inum, u128);
from_prims!(Tnet);

// Floats
compose_from!(Tnet, Float, f32);
compose_from!(Tnet, Float, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());

        assert!(5i32.to_tnet().to_inum().is_ok());

        assert!(true.to_tnet().to_bool().unwrap());

        assert_eq!(
            Bytes::from("word").to_tnet().to_bytes().unwrap(),
            &Bytes::from("word")
        );

        assert_eq!(Tnet::from(2.5).to_f64().unwrap(), 2.5);
        assert!(Tnet::from(2.5).to_inum().is_err());
    }

    #[test]
    fn from_vec() {
        let v: Vec<u8> = vec![0, 1, 2, 3, 4];
        let val: Vec<u8> = Tnet::from(v.clone()).into_rep().unwrap();
        assert_eq!(val, v);
    }

    #[test]
    fn from_option() {
        assert_eq!(Tnet::from(None::<i32>), Null);
        assert_eq!(Tnet::from(Some(3)), Tnet::from(3));
    }

    #[test]
    fn try_from_variant() {
        assert_eq!(bool::try_from(Bool(false)), Ok(false));
        assert_eq!(bool::try_from(Null), Err(Null));
        assert_eq!(Vec::<Tnet>::try_from(List(vec![Null])), Ok(vec![Null]));
    }

    #[test]
    fn byte_comparisons() {
        assert!(Tnet::from("abc") == *"abc");
        assert!(Tnet::from("abc") == *&b"abc"[..]);
        assert!(Tnet::from(1) != *"1");
    }

    #[test]
    fn display() {
        let d = Dict(VecMap::from(vec![(
            Tnet::from("k"),
            List(vec![Null, Bool(true), Tnet::from(1), Tnet::from(1.0)]),
        )]));
        assert_eq!(d.to_string(), "{\n  \"k\": [null, true, 1, 1.0]\n}");
        assert_eq!(Tnet::from(&b"\xff"[..]).to_string(), "b\"\\xff\"");
        assert_eq!(Dict(VecMap::new()).to_string(), "{}");
    }
}
