//! Exact evaluation of `cos(A*pi/B)` and `sin(A*pi/B)`.
//!
//! Angles whose reduced denominator divides 12 with `B` in `{1, 2, 3, 4, 6}` are answered from
//! closed forms (`0`, `±1/2`, `±sqrt(2)/2`, `±sqrt(3)/2`, `±1`). Every other angle is folded
//! into `[0, pi/4]` and summed as a Taylor series in exact rational arithmetic:
//!
//! ```text
//! S(x, m) = 1 - x^2/(m(m+1)) * (1 - x^2/((m+2)(m+3)) * (1 - ...))
//! sin(x) = x * S(x, 2),  cos(x) = S(x, 1)
//! ```
//!
//! The only inexact quantity is π itself, which is truncated two limbs below the result.
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::One;

use crate::error::FftError;
use crate::exact::decimal::{base_pow, Decimal};
use crate::exact::pi::pi;
use crate::exact::GUARD_LIMBS;
use crate::options::{Options, SeriesPolicy};

/// `(cos(a*pi/b), sin(a*pi/b))`, truncated at `places` fractional limbs of
/// `options.limb_base`.
///
/// # Errors
///
/// [`FftError::ZeroDenominator`] if `b == 0`, [`FftError::InvalidLimbBase`] for a limb base
/// outside `[2, 10^9]`, and [`FftError::PrecisionExceeded`] if the series does not settle
/// within the step budget of `options.series`.
pub fn evaluate(
    a: i64,
    b: i64,
    places: usize,
    options: &Options,
) -> Result<(Decimal, Decimal), FftError> {
    if b == 0 {
        return Err(FftError::ZeroDenominator);
    }
    options.validate()?;
    let base = options.limb_base;

    let (mut a, mut b) = (a as i128, b as i128);
    if b < 0 {
        a = -a;
        b = -b;
    }
    let g = a.gcd(&b);
    a /= g;
    b /= g;
    // one full turn is 2b
    a = a.rem_euclid(2 * b);

    if let Some(exact) = closed_form(a, b, places, base) {
        return Ok(exact);
    }

    let folded = Folded::new(a, b);
    let working = places + GUARD_LIMBS;
    let pi = pi(working, base)?;
    let x = BigRational::new(
        pi.mantissa() * BigInt::from(folded.a),
        base_pow(base, working) * BigInt::from(folded.b),
    );
    let x2 = &x * &x;

    let sin = sum_series(x, &x2, 2, places, working, base, options.series)?;
    let cos = sum_series(BigRational::one(), &x2, 1, places, working, base, options.series)?;

    Ok(folded.unfold(cos.truncate(places), sin.truncate(places)))
}

/// Sums `first * S(x, start)` term by term until the policy says stop.
fn sum_series(
    first: BigRational,
    x2: &BigRational,
    start: u64,
    places: usize,
    working: usize,
    base: u32,
    policy: SeriesPolicy,
) -> Result<Decimal, FftError> {
    let mut term = first;
    let mut sum = term.clone();
    let mut m = start;

    let mut next_term = |term: &BigRational| -> BigRational {
        let denom = BigInt::from(m) * BigInt::from(m + 1);
        m += 2;
        -(term * x2) / BigRational::from_integer(denom)
    };

    match policy {
        SeriesPolicy::Accuracy { max_steps } => {
            let mut previous = Decimal::from_ratio(&sum, working, base);
            for _ in 0..max_steps {
                term = next_term(&term);
                sum += &term;
                let current = Decimal::from_ratio(&sum, working, base);
                if current == previous {
                    return Ok(current);
                }
                previous = current;
            }
            Err(FftError::PrecisionExceeded {
                places,
                steps: max_steps,
            })
        }
        SeriesPolicy::Terms(count) => {
            if count == 0 {
                return Ok(Decimal::zero(working, base));
            }
            for _ in 1..count {
                term = next_term(&term);
                sum += &term;
            }
            Ok(Decimal::from_ratio(&sum, working, base))
        }
    }
}

/// An angle `a/b * pi` folded into `[0, pi/4]`, remembering how to undo the folding.
struct Folded {
    a: i128,
    b: i128,
    cos_negative: bool,
    sin_negative: bool,
    swapped: bool,
}

impl Folded {
    /// `a / b` must lie in `[0, 2)`.
    fn new(mut a: i128, mut b: i128) -> Self {
        let mut cos_negative = false;
        let mut sin_negative = false;
        let mut swapped = false;

        // pi + phi
        if a >= b {
            a -= b;
            cos_negative = true;
            sin_negative = true;
        }
        // pi - phi
        if 2 * a > b {
            a = b - a;
            cos_negative = !cos_negative;
        }
        // pi/2 - phi
        if 4 * a > b {
            a = b - 2 * a;
            b *= 2;
            swapped = true;
        }

        let g = a.gcd(&b).max(1);
        Self {
            a: a / g,
            b: b / g,
            cos_negative,
            sin_negative,
            swapped,
        }
    }

    fn unfold(&self, cos: Decimal, sin: Decimal) -> (Decimal, Decimal) {
        let (cos, sin) = if self.swapped { (sin, cos) } else { (cos, sin) };
        let cos = if self.cos_negative { cos.neg() } else { cos };
        let sin = if self.sin_negative { sin.neg() } else { sin };
        (cos, sin)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Surd {
    Zero,
    Half,
    HalfSqrt2,
    HalfSqrt3,
    One,
}

impl Surd {
    fn to_decimal(self, negative: bool, places: usize, base: u32) -> Decimal {
        let value = match self {
            Surd::Zero => Decimal::zero(places, base),
            Surd::Half => Decimal::from_ratio(&BigRational::new(1.into(), 2.into()), places, base),
            Surd::HalfSqrt2 => Decimal::sqrt_of_ratio(1, 2, places, base),
            Surd::HalfSqrt3 => Decimal::sqrt_of_ratio(3, 4, places, base),
            Surd::One => Decimal::from_integer(1, places, base),
        };
        if negative {
            value.neg()
        } else {
            value
        }
    }
}

/// `cos(t * pi / 12)` for the multiples of `pi/12` that have a closed form.
fn cos_twelfths(t: i128) -> Option<(bool, Surd)> {
    let t = t.rem_euclid(24);
    let t = if t > 12 { 24 - t } else { t };
    if t > 6 {
        return cos_twelfths(12 - t).map(|(negative, surd)| (!negative, surd));
    }
    match t {
        0 => Some((false, Surd::One)),
        2 => Some((false, Surd::HalfSqrt3)),
        3 => Some((false, Surd::HalfSqrt2)),
        4 => Some((false, Surd::Half)),
        6 => Some((false, Surd::Zero)),
        _ => None,
    }
}

fn closed_form(a: i128, b: i128, places: usize, base: u32) -> Option<(Decimal, Decimal)> {
    if !matches!(b, 1 | 2 | 3 | 4 | 6) {
        return None;
    }
    let t = a * (12 / b);
    let (cos_negative, cos) = cos_twelfths(t)?;
    let (sin_negative, sin) = cos_twelfths(t - 6)?;
    Some((
        cos.to_decimal(cos_negative, places, base),
        sin.to_decimal(sin_negative, places, base),
    ))
}

#[cfg(test)]
mod tests {
    use utilities::assert_float_closeness;

    use super::*;

    const BASE: u32 = 1_000_000_000;

    fn eval(a: i64, b: i64, places: usize) -> (Decimal, Decimal) {
        evaluate(a, b, places, &Options::default()).unwrap()
    }

    #[test]
    fn special_angles_are_exact() {
        let half_sqrt2 = Decimal::sqrt_of_ratio(1, 2, 4, BASE);
        let half_sqrt3 = Decimal::sqrt_of_ratio(3, 4, 4, BASE);
        let half = Decimal::from_ratio(&BigRational::new(1.into(), 2.into()), 4, BASE);
        let one = Decimal::from_integer(1, 4, BASE);
        let zero = Decimal::zero(4, BASE);

        assert_eq!(eval(1, 4, 4), (half_sqrt2.clone(), half_sqrt2.clone()));
        assert_eq!(eval(3, 4, 4), (half_sqrt2.neg(), half_sqrt2.clone()));
        assert_eq!(eval(-1, 4, 4), (half_sqrt2.clone(), half_sqrt2.neg()));
        assert_eq!(eval(1, 6, 4), (half_sqrt3.clone(), half.clone()));
        assert_eq!(eval(1, 3, 4), (half.clone(), half_sqrt3.clone()));
        assert_eq!(eval(2, 3, 4), (half.neg(), half_sqrt3.clone()));
        assert_eq!(eval(1, 2, 4), (zero.clone(), one.clone()));
        assert_eq!(eval(1, 1, 4), (one.neg(), zero.clone()));
        assert_eq!(eval(0, 5, 4), (one.clone(), zero.clone()));
        assert_eq!(eval(6, 8, 4), (half_sqrt2.neg(), half_sqrt2.clone()));
        assert_eq!(eval(7, 2, 4), (zero, one.neg()));
    }

    #[test]
    fn general_angles_match_libm() {
        for (a, b) in [(2, 5), (1, 7), (2, 12), (-3, 16), (11, 9), (2, 1024), (5, 11)] {
            let (cos, sin) = eval(a, b, 3);
            let angle = a as f64 * std::f64::consts::PI / b as f64;
            assert_float_closeness(cos.to_float::<f64>(), angle.cos(), 1e-15);
            assert_float_closeness(sin.to_float::<f64>(), angle.sin(), 1e-15);
        }
    }

    #[test]
    fn pythagorean_identity_holds_at_full_precision() {
        let (cos, sin) = eval(2, 7, 4);
        let one = cos.mul(&cos).add(&sin.mul(&sin));
        let defect = Decimal::from_integer(1, 4, BASE).sub(&one);
        assert!(defect.mantissa().magnitude() < &num_bigint::BigUint::from(8u32));
    }

    #[test]
    fn evaluation_is_reproducible() {
        assert_eq!(eval(2, 37, 5), eval(2, 37, 5));
        assert_eq!(eval(4, 74, 5), eval(2, 37, 5));
        assert!(eval(2, 37, 5).0.agrees_with(&eval(2, 37, 3).0, 3));
    }

    #[test]
    fn exhausted_step_budget_is_an_error() {
        let options = Options::default().with_series(SeriesPolicy::Accuracy { max_steps: 2 });
        assert_eq!(
            evaluate(2, 7, 4, &options),
            Err(FftError::PrecisionExceeded {
                places: 4,
                steps: 2
            })
        );
    }

    #[test]
    fn fixed_term_count_truncates_the_series() {
        let options = Options::default().with_series(SeriesPolicy::Terms(2));
        let (cos, _) = evaluate(1, 5, 2, &options).unwrap();
        // 1 - x^2/2 at x = pi/5
        let x = std::f64::consts::PI / 5.0;
        assert_float_closeness(cos.to_float::<f64>(), 1.0 - x * x / 2.0, 1e-12);

        let options = Options::default().with_series(SeriesPolicy::Terms(40));
        let (cos, _) = evaluate(1, 5, 2, &options).unwrap();
        assert_float_closeness(cos.to_float::<f64>(), x.cos(), 1e-15);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(
            evaluate(1, 0, 2, &Options::default()),
            Err(FftError::ZeroDenominator)
        );
    }
}
