//! Exact rationals extended with signed infinities.

use std::fmt;
use std::ops::Neg;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type Rational = BigRational;

/// A literal numeric value.
///
/// Variant order matters: the derived `Ord` ranks `NegInfinity` below every
/// finite value and `PosInfinity` above.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Number {
    NegInfinity,
    Finite(Rational),
    PosInfinity,
}

impl Number {
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Number::Finite(Rational::from_integer(value.into()))
    }

    pub fn fraction(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Number::Finite(Rational::new(num.into(), den.into()))
    }

    pub fn zero() -> Self {
        Number::Finite(Rational::zero())
    }

    pub fn one() -> Self {
        Number::Finite(Rational::one())
    }

    pub fn infinity() -> Self {
        Number::PosInfinity
    }

    pub fn neg_infinity() -> Self {
        Number::NegInfinity
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Number::Finite(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Number::Finite(r) if r.is_one())
    }

    pub fn is_minus_one(&self) -> bool {
        matches!(self, Number::Finite(r) if *r == -Rational::one())
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Number::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Number::Finite(r) => r.is_positive(),
            Number::PosInfinity => true,
            Number::NegInfinity => false,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Finite(r) => r.is_negative(),
            Number::PosInfinity => false,
            Number::NegInfinity => true,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Finite(r) if r.is_integer())
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Number::Finite(r) => Some(r),
            _ => None,
        }
    }

    /// Integer value, when the number is a finite integer.
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            Number::Finite(r) if r.is_integer() => Some(r.to_integer()),
            _ => None,
        }
    }

    /// Denominator of a finite value; infinities report 1.
    pub fn denom(&self) -> BigInt {
        match self {
            Number::Finite(r) => r.denom().clone(),
            _ => BigInt::one(),
        }
    }

    pub fn abs(&self) -> Number {
        match self {
            Number::Finite(r) => Number::Finite(r.abs()),
            _ => Number::PosInfinity,
        }
    }

    /// `None` for `inf + -inf`.
    pub fn checked_add(&self, other: &Number) -> Option<Number> {
        match (self, other) {
            (Number::Finite(a), Number::Finite(b)) => Some(Number::Finite(a + b)),
            (Number::PosInfinity, Number::NegInfinity) | (Number::NegInfinity, Number::PosInfinity) => {
                None
            }
            (Number::Finite(_), inf) | (inf, _) => Some(inf.clone()),
        }
    }

    pub fn checked_sub(&self, other: &Number) -> Option<Number> {
        self.checked_add(&-other.clone())
    }

    /// `None` for `0 * inf`.
    pub fn checked_mul(&self, other: &Number) -> Option<Number> {
        match (self, other) {
            (Number::Finite(a), Number::Finite(b)) => Some(Number::Finite(a * b)),
            _ if self.is_zero() || other.is_zero() => None,
            _ => Some(Number::signed_infinity(
                self.is_negative() != other.is_negative(),
            )),
        }
    }

    /// `None` for division by zero and for `inf / inf`.
    pub fn checked_div(&self, other: &Number) -> Option<Number> {
        if other.is_zero() {
            return None;
        }
        match (self, other) {
            (Number::Finite(a), Number::Finite(b)) => Some(Number::Finite(a / b)),
            (Number::Finite(_), _) => Some(Number::zero()),
            (_, Number::Finite(_)) => Some(Number::signed_infinity(
                self.is_negative() != other.is_negative(),
            )),
            _ => None,
        }
    }

    fn signed_infinity(negative: bool) -> Number {
        if negative {
            Number::NegInfinity
        } else {
            Number::PosInfinity
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Finite(r) => Number::Finite(-r),
            Number::PosInfinity => Number::NegInfinity,
            Number::NegInfinity => Number::PosInfinity,
        }
    }
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Number::Finite(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::integer(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Finite(r) if r.is_integer() => write!(f, "{}", r.numer()),
            Number::Finite(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Number::PosInfinity => write!(f, "inf"),
            Number::NegInfinity => write!(f, "-inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_places_infinities_at_the_ends() {
        let mut values = vec![
            Number::integer(3),
            Number::PosInfinity,
            Number::fraction(-1, 2),
            Number::NegInfinity,
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Number::NegInfinity,
                Number::fraction(-1, 2),
                Number::integer(3),
                Number::PosInfinity,
            ]
        );
    }

    #[test]
    fn checked_arithmetic_rejects_indeterminate_forms() {
        assert_eq!(Number::PosInfinity.checked_add(&Number::NegInfinity), None);
        assert_eq!(Number::zero().checked_mul(&Number::NegInfinity), None);
        assert_eq!(Number::integer(1).checked_div(&Number::zero()), None);
        assert_eq!(Number::PosInfinity.checked_div(&Number::PosInfinity), None);
    }

    #[test]
    fn checked_arithmetic_propagates_infinities() {
        assert_eq!(
            Number::PosInfinity.checked_sub(&Number::integer(7)),
            Some(Number::PosInfinity)
        );
        assert_eq!(
            Number::NegInfinity.checked_mul(&Number::integer(-2)),
            Some(Number::PosInfinity)
        );
        assert_eq!(
            Number::integer(4).checked_div(&Number::NegInfinity),
            Some(Number::zero())
        );
        assert_eq!(
            Number::PosInfinity.checked_div(&Number::fraction(-1, 3)),
            Some(Number::NegInfinity)
        );
    }

    #[test]
    fn display_is_exact() {
        assert_eq!(Number::fraction(6, 4).to_string(), "3/2");
        assert_eq!(Number::fraction(-6, 4).to_string(), "-3/2");
        assert_eq!(Number::fraction(8, 4).to_string(), "2");
        assert_eq!(Number::NegInfinity.to_string(), "-inf");
    }
}
