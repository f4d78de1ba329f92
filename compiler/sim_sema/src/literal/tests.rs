use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{narrow_int, parse_int, FloatConst, Narrowed};

#[test]
fn parses_float_forms() {
    let f = FloatConst::parse("1.5").unwrap();
    assert_eq!(f.mantissa, BigInt::from(15));
    assert_eq!(f.exponent, -1);

    let f = FloatConst::parse("2.5e-3").unwrap();
    assert_eq!(f.mantissa, BigInt::from(25));
    assert_eq!(f.exponent, -4);
    assert!((f.to_f64() - 0.0025).abs() < 1e-12);

    assert_eq!(FloatConst::parse("1_000").unwrap().to_string(), "1000e0");
    assert!(FloatConst::parse("1.2.3").is_none());
    assert!(FloatConst::parse("e5").is_none());
}

#[test]
fn float_range_depends_on_width() {
    let big = FloatConst::parse("1e300").unwrap();
    assert!(big.fits(64));
    assert!(!big.fits(32));
    assert!(!FloatConst::parse("1e400").unwrap().fits(64));
    // Underflow rounds to zero, which is representable.
    assert!(FloatConst::parse("1e-400").unwrap().fits(64));
}

#[test]
fn int_bounds() {
    assert_eq!(narrow_int(&BigInt::from(127), true, 8), Narrowed::Fits);
    assert_eq!(narrow_int(&BigInt::from(-128), true, 8), Narrowed::Fits);
    assert_eq!(narrow_int(&BigInt::from(255), false, 8), Narrowed::Fits);
    assert_eq!(
        narrow_int(&BigInt::from(128), true, 8),
        Narrowed::Overflows {
            wrapped: BigInt::from(-128)
        }
    );
    assert_eq!(
        narrow_int(&BigInt::from(300), false, 8),
        Narrowed::Overflows {
            wrapped: BigInt::from(44)
        }
    );
    assert_eq!(
        narrow_int(&BigInt::from(-1), false, 16),
        Narrowed::Overflows {
            wrapped: BigInt::from(65535)
        }
    );
}

#[test]
fn int_text() {
    assert_eq!(parse_int("1_000").unwrap(), BigInt::from(1000));
    assert_eq!(
        parse_int("340282366920938463463374607431768211456").unwrap(),
        BigInt::from(u128::MAX) + 1
    );
    assert!(parse_int("").is_none());
    assert!(parse_int("12a").is_none());
}

proptest! {
    #[test]
    fn wrapping_matches_host_truncation(v in any::<i64>()) {
        let value = BigInt::from(v);
        let expected_i8 = BigInt::from(i8::from_le_bytes([v.to_le_bytes()[0]]));
        match narrow_int(&value, true, 8) {
            Narrowed::Fits => prop_assert_eq!(value, expected_i8),
            Narrowed::Overflows { wrapped } => prop_assert_eq!(wrapped, expected_i8),
        }
    }
}
