//! Roots of unity and their powers.
//!
//! A primitive root `W = exp(-2*pi*i*S/N)` is evaluated once through [`evaluate`]; every
//! power needed deeper in a decomposition is then derived by complex multiplication of
//! exact values, never by a fresh series evaluation.
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use num_traits::Float;

use crate::error::FftError;
use crate::exact::decimal::Decimal;
use crate::exact::trig::evaluate;
use crate::exact::GUARD_LIMBS;
use crate::options::{Options, SeriesPolicy};
use crate::planner::Direction;

/// A complex number `re + i*im` held in exact fixed-point arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Root {
    re: Decimal,
    im: Decimal,
}

type RootKey = (usize, Direction, usize, u32, SeriesPolicy);

fn cache() -> &'static Mutex<HashMap<RootKey, Root>> {
    static CACHE: OnceLock<Mutex<HashMap<RootKey, Root>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Root {
    pub fn one(places: usize, base: u32) -> Self {
        Self {
            re: Decimal::from_integer(1, places, base),
            im: Decimal::zero(places, base),
        }
    }

    /// # Panics
    ///
    /// Debug builds panic if the parts disagree on places or base.
    pub fn from_parts(re: Decimal, im: Decimal) -> Self {
        debug_assert!(re.places() == im.places() && re.base() == im.base());
        Self { re, im }
    }

    /// The primitive `n`-th root of unity for `direction`, carried at
    /// `options.places` plus two guard limbs.
    ///
    /// The forward root is `cos(2pi/n) - i*sin(2pi/n)`; the inverse root flips the sign of
    /// the imaginary part. Results are memoized per `(n, direction, places, base, series)`.
    ///
    /// # Errors
    ///
    /// Propagates [`FftError::PrecisionExceeded`] from the series, and returns
    /// [`FftError::ZeroLength`] for `n == 0`, [`FftError::LengthTooLarge`] for `n` above
    /// `i64::MAX` and [`FftError::InvalidLimbBase`] for a limb base outside `[2, 10^9]`.
    pub fn primitive(n: usize, direction: Direction, options: &Options) -> Result<Self, FftError> {
        if n == 0 {
            return Err(FftError::ZeroLength);
        }
        options.validate()?;
        let denominator = i64::try_from(n).map_err(|_| FftError::LengthTooLarge(n))?;
        let key = (
            n,
            direction,
            options.places,
            options.limb_base,
            options.series,
        );
        if let Some(hit) = cache().lock().ok().and_then(|map| map.get(&key).cloned()) {
            return Ok(hit);
        }

        let (cos, sin) = evaluate(2, denominator, options.places + GUARD_LIMBS, options)?;
        let root = match direction {
            Direction::Forward => Self::from_parts(cos, sin.neg()),
            Direction::Inverse => Self::from_parts(cos, sin),
        };

        if let Ok(mut map) = cache().lock() {
            map.entry(key).or_insert_with(|| root.clone());
        }
        Ok(root)
    }

    pub fn re(&self) -> &Decimal {
        &self.re
    }

    pub fn im(&self) -> &Decimal {
        &self.im
    }

    pub fn places(&self) -> usize {
        self.re.places()
    }

    /// `(r, i) * (r', i') = (r*r' - i*i', r*i' + i*r')`, truncated at the operands' places.
    pub fn mul(&self, other: &Self) -> Self {
        let re = self.re.mul(&other.re).sub(&self.im.mul(&other.im));
        let im = self.re.mul(&other.im).add(&self.im.mul(&other.re));
        Self { re, im }
    }

    /// `self^power` by repeated multiplication.
    pub fn pow(&self, power: usize) -> Self {
        let mut acc = Self::one(self.places(), self.re.base());
        for _ in 0..power {
            acc = next_root(&acc, self);
        }
        acc
    }

    /// `|self|^2`, which stays within a few units of the last place of one.
    pub fn norm_sqr(&self) -> Decimal {
        self.re.mul(&self.re).add(&self.im.mul(&self.im))
    }

    pub fn truncate(&self, places: usize) -> Self {
        Self {
            re: self.re.truncate(places),
            im: self.im.truncate(places),
        }
    }

    pub fn to_float<T: Float>(&self) -> (T, T) {
        (self.re.to_float(), self.im.to_float())
    }
}

/// Advances `root_so_far` by one power of `base`.
pub fn next_root(root_so_far: &Root, base: &Root) -> Root {
    root_so_far.mul(base)
}
