//! Doubles carried by `^` frames.

use std::{fmt, str::FromStr};

const NAN_BITS: u64 = 0x7ff8_0000_0000_0000;
const NEG_NAN_BITS: u64 = 0xfff8_0000_0000_0000;

/// A double-precision float, stored as its IEEE-754 bit pattern so that [`Tnet`] can be
/// `Eq`, `Ord` and `Hash`.
///
/// Comparison is by bits, so `0.0 != -0.0`. A NaN keeps only its sign: every NaN is
/// stored as the quiet NaN of that sign, since no literal can carry a payload.
///
/// [`Tnet`]: crate::Tnet
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug, Default)]
pub struct Float(u64);

impl Float {
    /// Wraps a raw bit pattern. NaN patterns are canonicalized.
    pub fn from_bits(bits: u64) -> Float { Float::from(f64::from_bits(bits)) }

    /// The raw bit pattern.
    pub fn to_bits(self) -> u64 { self.0 }

    /// The value as an `f64`.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::float::Float;
    ///
    /// assert_eq!(Float::from(1.5).to_f64(), 1.5);
    /// ```
    pub fn to_f64(self) -> f64 { f64::from_bits(self.0) }
}

impl From<f64> for Float {
    fn from(f: f64) -> Float {
        if !f.is_nan() {
            Float(f.to_bits())
        } else if f.is_sign_negative() {
            Float(NEG_NAN_BITS)
        } else {
            Float(NAN_BITS)
        }
    }
}

impl From<f32> for Float {
    fn from(f: f32) -> Float { Float::from(f as f64) }
}

impl From<Float> for f64 {
    fn from(f: Float) -> f64 { f.to_f64() }
}

impl FromStr for Float {
    type Err = failure::Error;

    /// Parses a `^` payload. The literal is expected to have passed the strict
    /// grammar check already.
    fn from_str(s: &str) -> Result<Float, failure::Error> { Ok(Float::from(s.parse::<f64>()?)) }
}

/// Shortest literal that parses back to the same bits: `1.0`, `0.1`, `1e100`, `-inf`,
/// `NaN`, `-NaN`.
impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            NEG_NAN_BITS => f.write_str("-NaN"),
            _ => write!(f, "{:?}", self.to_f64()),
        }
    }
}
