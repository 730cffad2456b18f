//! Factorization of transform lengths.
use crate::error::FftError;
use crate::options::RadixGrouping;

/// The prime factorization of a transform length, as `(prime, multiplicity)` pairs in
/// increasing prime order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Factorization {
    n: usize,
    factors: Vec<(usize, u32)>,
}

/// Returns the prime factors of `n` with multiplicity, smallest first.
///
/// `prime_factors(360) == [2, 2, 2, 3, 3, 5]`; `0` and `1` have no factors.
pub fn prime_factors(mut n: usize) -> Vec<usize> {
    let mut res = Vec::new();
    if n < 2 {
        return res;
    }

    while n & 1 == 0 {
        res.push(2);
        n >>= 1;
    }
    while n % 3 == 0 {
        res.push(3);
        n /= 3;
    }

    // trial divide by 6k - 1 and 6k + 1
    let mut p = 5;
    while p <= n / p {
        while n % p == 0 {
            res.push(p);
            n /= p;
        }
        let q = p + 2;
        while n % q == 0 {
            res.push(q);
            n /= q;
        }
        p += 6;
    }

    if n > 1 {
        res.push(n);
    }
    res
}

/// Factorizes `n`. The empty factorization stands for `n == 1`.
///
/// # Errors
///
/// [`FftError::ZeroLength`] for `n == 0`.
pub fn factorize(n: usize) -> Result<Factorization, FftError> {
    if n == 0 {
        return Err(FftError::ZeroLength);
    }
    let mut factors: Vec<(usize, u32)> = Vec::new();
    for p in prime_factors(n) {
        match factors.last_mut() {
            Some((last, count)) if *last == p => *count += 1,
            _ => factors.push((p, 1)),
        }
    }
    Ok(Factorization { n, factors })
}

impl Factorization {
    /// Adopts a caller-supplied factor list for `n`.
    ///
    /// Entries with multiplicity zero are accepted and contribute nothing. Entries need not
    /// be prime; composite radices are checked later against the registered butterflies.
    ///
    /// # Errors
    ///
    /// [`FftError::MalformedFactorization`] if the list does not multiply out to `n`,
    /// [`FftError::ZeroLength`] if `n == 0`.
    pub fn from_factors(n: usize, factors: Vec<(usize, u32)>) -> Result<Self, FftError> {
        if n == 0 {
            return Err(FftError::ZeroLength);
        }
        let product = factors
            .iter()
            .try_fold(1_usize, |acc, &(p, count)| {
                p.checked_pow(count).and_then(|power| acc.checked_mul(power))
            })
            .unwrap_or(usize::MAX);
        if product != n || factors.iter().any(|&(p, count)| p < 2 && count > 0) {
            return Err(FftError::MalformedFactorization { n, product });
        }
        Ok(Self { n, factors })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.factors.iter().all(|&(_, count)| count == 0)
    }

    pub fn factors(&self) -> &[(usize, u32)] {
        &self.factors
    }

    /// Every factor repeated by its multiplicity.
    pub fn flatten(&self) -> Vec<usize> {
        self.factors
            .iter()
            .flat_map(|&(p, count)| std::iter::repeat(p).take(count as usize))
            .collect()
    }

    /// The factor list the decomposition consumes, with powers of two grouped into
    /// radix-4 or radix-8 butterflies.
    ///
    /// Groups that end up empty are kept with multiplicity zero.
    pub fn grouped(&self, grouping: RadixGrouping) -> Vec<(usize, u32)> {
        let mut out = Vec::with_capacity(self.factors.len() + 2);
        for &(p, count) in &self.factors {
            if p != 2 {
                out.push((p, count));
                continue;
            }
            match grouping {
                RadixGrouping::Primes => out.push((2, count)),
                RadixGrouping::Radix4 => {
                    out.push((4, count / 2));
                    out.push((2, count % 2));
                }
                RadixGrouping::Radix8 => {
                    let rest = count % 3;
                    out.push((8, count / 3));
                    out.push((4, rest / 2));
                    out.push((2, rest % 2));
                }
            }
        }
        out
    }
}
