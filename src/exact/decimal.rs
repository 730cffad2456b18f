//! Fixed-point arbitrary precision numbers.
//!
//! A [`Decimal`] is an integer mantissa scaled by `base^places`, where `base` is the limb
//! base (10^9 unless configured otherwise). The mantissa itself is a `num_bigint::BigInt`;
//! its limb decomposition in `base` is produced on demand by [`Decimal::limbs`].
use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Float, Pow, Signed, ToPrimitive, Zero};

/// `base^exp` as a big integer
pub(crate) fn base_pow(base: u32, exp: usize) -> BigInt {
    Pow::pow(BigInt::from(base), exp)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    places: usize,
    base: u32,
}

impl Decimal {
    pub fn zero(places: usize, base: u32) -> Self {
        Self {
            mantissa: BigInt::zero(),
            places,
            base,
        }
    }

    pub fn from_integer(value: i64, places: usize, base: u32) -> Self {
        Self {
            mantissa: BigInt::from(value) * base_pow(base, places),
            places,
            base,
        }
    }

    /// Builds a decimal straight from its scaled mantissa.
    pub fn from_mantissa(mantissa: BigInt, places: usize, base: u32) -> Self {
        Self {
            mantissa,
            places,
            base,
        }
    }

    /// Truncates an exact rational towards zero at `places` fractional limbs.
    pub fn from_ratio(value: &BigRational, places: usize, base: u32) -> Self {
        let scaled = value.numer() * base_pow(base, places);
        Self {
            mantissa: scaled / value.denom(),
            places,
            base,
        }
    }

    /// `sqrt(numer / denom)` truncated at `places` fractional limbs.
    ///
    /// Computed as an integer square root of the scaled radicand, so the result is the
    /// exact truncation of the irrational value and never depends on float rounding.
    pub fn sqrt_of_ratio(numer: u64, denom: u64, places: usize, base: u32) -> Self {
        debug_assert!(denom != 0);
        let radicand = BigInt::from(numer) * base_pow(base, 2 * places) / BigInt::from(denom);
        Self {
            mantissa: radicand.sqrt(),
            places,
            base,
        }
    }

    pub fn places(&self) -> usize {
        self.places
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// The exact rational value of this decimal.
    pub fn to_ratio(&self) -> BigRational {
        BigRational::new(self.mantissa.clone(), base_pow(self.base, self.places))
    }

    pub fn neg(&self) -> Self {
        Self {
            mantissa: -&self.mantissa,
            places: self.places,
            base: self.base,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        debug_assert!(self.places == other.places && self.base == other.base);
        Self {
            mantissa: &self.mantissa + &other.mantissa,
            places: self.places,
            base: self.base,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        debug_assert!(self.places == other.places && self.base == other.base);
        Self {
            mantissa: &self.mantissa - &other.mantissa,
            places: self.places,
            base: self.base,
        }
    }

    /// Product truncated towards zero at the operands' number of places.
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert!(self.places == other.places && self.base == other.base);
        let product = &self.mantissa * &other.mantissa;
        Self {
            mantissa: product / base_pow(self.base, self.places),
            places: self.places,
            base: self.base,
        }
    }

    /// Drops fractional limbs, truncating towards zero. Never adds places.
    pub fn truncate(&self, places: usize) -> Self {
        if places >= self.places {
            return self.clone();
        }
        Self {
            mantissa: &self.mantissa / base_pow(self.base, self.places - places),
            places,
            base: self.base,
        }
    }

    /// Magnitude limbs, least significant first. The lowest `places` limbs are fractional.
    ///
    /// Always returns at least `places + 1` limbs, so the integer part is present even
    /// when it is zero.
    pub fn limbs(&self) -> Vec<u32> {
        let base = BigUint::from(self.base);
        let mut rest = self.mantissa.magnitude().clone();
        let mut limbs = Vec::with_capacity(self.places + 1);
        while !rest.is_zero() || limbs.len() <= self.places {
            let (quotient, limb) = rest.div_rem(&base);
            // limb < base <= 10^9
            limbs.push(limb.to_u32().unwrap_or_default());
            rest = quotient;
        }
        limbs
    }

    /// Evaluates to a native float by summing the limbs weighted by powers of the base.
    pub fn to_float<T: Float>(&self) -> T {
        let limbs = self.limbs();
        let (fraction, integer) = limbs.split_at(self.places);
        let base = self.base as f64;

        let fraction = fraction
            .iter()
            .fold(0.0_f64, |acc, limb| (acc + *limb as f64) / base);
        let integer = integer
            .iter()
            .rev()
            .fold(0.0_f64, |acc, limb| acc.mul_add(base, *limb as f64));

        let magnitude = T::from(integer + fraction).unwrap_or_else(T::nan);
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Whether both values coincide once truncated to `places` fractional limbs.
    pub fn agrees_with(&self, other: &Self, places: usize) -> bool {
        self.truncate(places) == other.truncate(places)
    }

    /// Number of decimal digits in one limb, if the base is a power of ten.
    fn decimal_width(&self) -> Option<usize> {
        let mut width = 0;
        let mut b = self.base;
        while b > 1 && b % 10 == 0 {
            b /= 10;
            width += 1;
        }
        (b == 1 && width > 0).then_some(width)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let limbs = self.limbs();
        let (fraction, integer) = limbs.split_at(self.places);

        match self.decimal_width() {
            Some(width) => {
                let mut digits = integer.iter().rev().skip_while(|limb| **limb == 0);
                match digits.next() {
                    Some(head) => {
                        write!(f, "{head}")?;
                        for limb in digits {
                            write!(f, "{limb:0width$}")?;
                        }
                    }
                    None => f.write_str("0")?,
                }
                if !fraction.is_empty() {
                    f.write_str(".")?;
                    for limb in fraction.iter().rev() {
                        write!(f, "{limb:0width$}")?;
                    }
                }
                Ok(())
            }
            None => {
                let integer: Vec<String> = integer.iter().rev().map(u32::to_string).collect();
                let fraction: Vec<String> = fraction.iter().rev().map(u32::to_string).collect();
                write!(
                    f,
                    "[{}] | [{}] (base {})",
                    integer.join(" "),
                    fraction.join(" "),
                    self.base
                )
            }
        }
    }
}
