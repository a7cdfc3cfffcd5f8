pub use crate::{
    encoding::{
        dump, dumps, load, loads, pop, De, Decoder, Encoder, Key, Ser, Shape, DEFAULT_MAX_DEPTH,
    },
    errors::{DecodeError, EncodeError},
    float::Float,
    inum::Inum,
    rep::*,
    vecmap::VecMap,
    Tnet,
};
pub use bytes::Bytes;
pub use num_bigint::BigInt;
pub use std::{convert::TryFrom, str::FromStr};
