//! Literal values and narrowing.
//!
//! Literal text is parsed into arbitrary-precision values so that range
//! checks happen against the final type, never against a host integer.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Decimal float constant: `mantissa * 10^exponent`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FloatConst {
    pub mantissa: BigInt,
    pub exponent: i64,
}

impl FloatConst {
    /// Parse `123`, `1.5`, `2.5e-3` or `1E10`. Underscores are ignored.
    pub fn parse(text: &str) -> Option<FloatConst> {
        let text: String = text.chars().filter(|&c| c != '_').collect();
        let (digits, exp) = match text.find(['e', 'E']) {
            Some(pos) => (&text[..pos], text[pos + 1..].parse::<i64>().ok()?),
            None => (text.as_str(), 0),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }
        let mantissa = format!("{int_part}{frac_part}").parse::<BigInt>().ok()?;
        let frac_len = i64::try_from(frac_part.len()).ok()?;
        Some(FloatConst {
            mantissa,
            exponent: exp.checked_sub(frac_len)?,
        })
    }

    pub fn from_int(value: BigInt) -> FloatConst {
        FloatConst {
            mantissa: value,
            exponent: 0,
        }
    }

    #[must_use]
    pub fn negated(&self) -> FloatConst {
        FloatConst {
            mantissa: -&self.mantissa,
            exponent: self.exponent,
        }
    }

    /// Nearest `f64`; infinite when the value is out of range.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Nearest `f32`; infinite when the value is out of range.
    pub fn to_f32(&self) -> f32 {
        self.to_string().parse::<f32>().unwrap_or(f32::NAN)
    }

    /// Whether the value is finite in a float of `bits` width.
    pub fn fits(&self, bits: u16) -> bool {
        if bits == 32 {
            self.to_f32().is_finite()
        } else {
            self.to_f64().is_finite()
        }
    }
}

impl fmt::Display for FloatConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}e{}", self.mantissa, self.exponent)
    }
}

/// Parse decimal integer text. Underscores are ignored.
pub(crate) fn parse_int(text: &str) -> Option<BigInt> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Result of fitting an integer into a fixed width.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Narrowed {
    Fits,
    /// Does not fit; this is the two's complement truncation.
    Overflows { wrapped: BigInt },
}

pub(crate) fn narrow_int(value: &BigInt, signed: bool, bits: u16) -> Narrowed {
    let modulus = BigInt::one() << usize::from(bits);
    let (min, max) = if signed {
        let half = &modulus >> 1usize;
        (-&half, half - 1)
    } else {
        (BigInt::zero(), &modulus - 1)
    };
    if *value >= min && *value <= max {
        return Narrowed::Fits;
    }

    let mut wrapped = value % &modulus;
    if wrapped.is_negative() {
        wrapped += &modulus;
    }
    if signed && wrapped > max {
        wrapped -= &modulus;
    }
    Narrowed::Overflows { wrapped }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
