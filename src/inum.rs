//! Integers carried by `#` frames.
//!
//! A tnetstring integer is an ASCII decimal literal of any length, so the native value
//! type keeps an `i64` fast path and falls back to a [`BigInt`] only when the literal does
//! not fit.

use failure::bail;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::{convert::TryFrom, fmt, str::FromStr};

/// `Inum`s are either `i64` or `BigInt`s.
///
/// Values are kept normalized: anything that fits in an `i64` is an [`Inum::I64`], so two
/// equal integers always compare equal regardless of how they were built.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub enum Inum {
    /// Fits in 64 bits.
    I64(i64),
    /// Anything larger.
    Int(BigInt),
}

use Inum::*;

from_fn!(Inum, i64, I64);
from_fn!(Inum, u64, |u| {
    match i64::try_from(u) {
        Ok(i) => I64(i),
        Err(_) => Int(BigInt::from(u)),
    }
});
from_fn!(Inum, i128, |i| {
    match i64::try_from(i) {
        Ok(i) => I64(i),
        Err(_) => Int(BigInt::from(i)),
    }
});
from_fn!(Inum, u128, |u| {
    match i64::try_from(u) {
        Ok(i) => I64(i),
        Err(_) => Int(BigInt::from(u)),
    }
});
from_fn!(Inum, isize, |i| I64(i as i64));
from_fn!(Inum, usize, |u| Inum::from(u as u64));
from_fn!(Inum, BigInt, |i: BigInt| {
    i.to_i64().map_or_else(|| Int(i), I64)
});

from_prims!(Inum);

impl From<Inum> for BigInt {
    fn from(i: Inum) -> BigInt {
        match i {
            I64(i) => BigInt::from(i),
            Int(i) => i,
        }
    }
}

impl TryFrom<Inum> for i64 {
    type Error = Inum;

    fn try_from(i: Inum) -> Result<Self, Inum> {
        match i {
            I64(i) => Ok(i),
            Int(_) => Err(i),
        }
    }
}

impl TryFrom<Inum> for u64 {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        match &n {
            I64(i) => u64::try_from(*i).map_err(|_| n),
            Int(i) => i.to_u64().ok_or(n),
        }
    }
}

macro_rules! try_from_inum {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Inum> for $t {
                type Error = Inum;

                fn try_from(n: Inum) -> Result<Self, Inum> {
                    match &n {
                        I64(i) => <$t>::try_from(*i).map_err(|_| n),
                        Int(_) => Err(n),
                    }
                }
            }
        )*
    };
}

try_from_inum!(i8, i16, i32, u8, u16, u32, isize, usize);

impl PartialEq<i64> for Inum {
    fn eq(&self, other: &i64) -> bool {
        match self {
            I64(i) => i.eq(other),
            Int(i) => i.eq(&BigInt::from(*other)),
        }
    }
}

impl Inum {
    /// Produces an `i64` if `self` is an `I64`, otherwise returns `None`.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            I64(i) => Some(*i),
            Int(_) => None,
        }
    }

    /// Produces a `BigInt` regardless of magnitude.
    pub fn to_bigint(&self) -> BigInt {
        match self {
            I64(i) => BigInt::from(*i),
            Int(i) => i.clone(),
        }
    }
}

/// Parses a decimal literal, `-?[0-9]+`.
///
/// Unlike `BigInt`'s own parser this rejects a leading `+`, so it accepts exactly the
/// payloads a `#` frame may carry.
impl FromStr for Inum {
    type Err = failure::Error;

    fn from_str(s: &str) -> Result<Inum, failure::Error> {
        if !crate::encoding::lexical::is_integer(s.as_bytes()) {
            bail!("`{}` is not a decimal integer", s)
        }
        match s.parse::<i64>() {
            Ok(i) => Ok(I64(i)),
            Err(_) => Ok(Int(s.parse::<BigInt>()?)),
        }
    }
}

impl fmt::Display for Inum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            I64(i) => write!(f, "{}", i),
            Int(i) => write!(f, "{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes() {
        assert_eq!(Inum::from(BigInt::from(5)), I64(5));
        assert_eq!(Inum::from(u64::max_value()), Int(BigInt::from(u64::max_value())));
        assert_eq!(Inum::from(-3i128), I64(-3));
    }

    #[test]
    fn parse_small_and_large() {
        assert_eq!("12345".parse::<Inum>().unwrap(), I64(12345));
        assert_eq!("-0".parse::<Inum>().unwrap(), I64(0));

        let big: Inum = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
        assert!(big.to_i64().is_none());
    }

    #[test]
    fn parse_rejects_signs_and_space() {
        assert!("+1".parse::<Inum>().is_err());
        assert!(" 1".parse::<Inum>().is_err());
        assert!("--1".parse::<Inum>().is_err());
        assert!("".parse::<Inum>().is_err());
    }

    #[test]
    fn narrowing() {
        assert_eq!(u8::try_from(Inum::from(255)).unwrap(), 255);
        assert!(u8::try_from(Inum::from(256)).is_err());
        assert!(u64::try_from(Inum::from(-1)).is_err());
        assert_eq!(u64::try_from(Inum::from(u64::max_value())).unwrap(), u64::max_value());
    }
}
