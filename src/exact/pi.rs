//! π to an arbitrary number of limbs.
//!
//! Uses the Bailey–Borwein–Plouffe series
//!
//! ```text
//! pi = sum_k 16^-k * (4/(8k+1) - 2/(8k+4) - 1/(8k+5) - 1/(8k+6))
//! ```
//!
//! Each term is an exact rational, truncated into the working base once it has been
//! scaled. Results are memoized per `(places, base)` for the lifetime of the process.
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::FftError;
use crate::exact::decimal::{base_pow, Decimal};
use crate::options::check_limb_base;

type PiCache = Mutex<HashMap<(usize, u32), Decimal>>;

fn cache() -> &'static PiCache {
    static CACHE: OnceLock<PiCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// π truncated at `places` fractional limbs of `base`.
///
/// # Errors
///
/// [`FftError::InvalidLimbBase`] unless `2 <= base <= 10^9`.
pub fn pi(places: usize, base: u32) -> Result<Decimal, FftError> {
    check_limb_base(base)?;
    if let Some(hit) = cache()
        .lock()
        .ok()
        .and_then(|map| map.get(&(places, base)).cloned())
    {
        return Ok(hit);
    }

    let value = bbp(places, base);
    if let Ok(mut map) = cache().lock() {
        map.entry((places, base)).or_insert_with(|| value.clone());
    }
    Ok(value)
}

fn bbp(places: usize, base: u32) -> Decimal {
    // Two extra limbs absorb the per-term truncation, even for small bases
    let working = places + 2;
    let scale = base_pow(base, working);

    let mut sum = BigInt::zero();
    let mut sixteen_pow = BigInt::one();
    let mut k = 0_u64;

    // Terms are bounded by 4 * 16^-k, stop once that is below one unit
    while sixteen_pow <= &scale * 4u32 {
        let k8 = BigInt::from(8 * k);
        let d1 = &k8 + 1u32;
        let d4 = &k8 + 4u32;
        let d5 = &k8 + 5u32;
        let d6 = &k8 + 6u32;

        // 4/d1 - 2/d4 - 1/d5 - 1/d6 over the common denominator d1*d4*d5*d6
        let numer = BigInt::from(4) * &d4 * &d5 * &d6
            - BigInt::from(2) * &d1 * &d5 * &d6
            - &d1 * &d4 * &d6
            - &d1 * &d4 * &d5;
        let denom = d1 * d4 * d5 * d6 * &sixteen_pow;

        sum += numer * &scale / denom;

        sixteen_pow *= 16u32;
        k += 1;
    }

    Decimal::from_mantissa(sum, working, base).truncate(places)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_digits() {
        let pi = pi(4, 1_000_000_000).unwrap();
        assert_eq!(
            pi.to_string(),
            "3.141592653589793238462643383279502884"
        );
        assert_eq!(pi.to_float::<f64>(), std::f64::consts::PI);
    }

    #[test]
    fn memoized_value_is_reused() {
        let first = pi(2, 1_000_000_000).unwrap();
        let second = pi(2, 1_000_000_000).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, pi(5, 1_000_000_000).unwrap().truncate(2));
    }

    #[test]
    fn other_bases() {
        // pi = 3.243F6A88 85A308D3 in hexadecimal
        let pi = pi(8, 16).unwrap();
        assert_eq!(pi.limbs(), vec![8, 8, 10, 6, 15, 3, 4, 2, 3]);
    }
}
