//! Utility functions such as interleave/deinterleave

#[cfg(feature = "complex-nums")]
use bytemuck::{cast_slice, cast_slice_mut, Pod};
#[cfg(feature = "complex-nums")]
use num_complex::Complex;

#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
/// Separates data like `[1, 2, 3, 4]` into `([1, 3], [2, 4])` for any length
pub fn deinterleave<T: Copy + Default>(input: &[T]) -> (Vec<T>, Vec<T>) {
    const CHUNK_SIZE: usize = 4;
    const DOUBLE_CHUNK: usize = CHUNK_SIZE * 2;

    let out_len = input.len() / 2;
    let mut out_odd = vec![T::default(); out_len];
    let mut out_even = vec![T::default(); out_len];

    input
        .chunks_exact(DOUBLE_CHUNK)
        .zip(out_odd.chunks_exact_mut(CHUNK_SIZE))
        .zip(out_even.chunks_exact_mut(CHUNK_SIZE))
        .for_each(|((in_chunk, odds), evens)| {
            for i in 0..CHUNK_SIZE {
                odds[i] = in_chunk[2 * i];
                evens[i] = in_chunk[2 * i + 1];
            }
        });

    // Process the remainder, too small for the chunked loop
    let input_rem = input.chunks_exact(DOUBLE_CHUNK).remainder();
    let odds_rem = out_odd.chunks_exact_mut(CHUNK_SIZE).into_remainder();
    let evens_rem = out_even.chunks_exact_mut(CHUNK_SIZE).into_remainder();
    input_rem
        .chunks_exact(2)
        .zip(odds_rem.iter_mut())
        .zip(evens_rem.iter_mut())
        .for_each(|((inp, odd), even)| {
            *odd = inp[0];
            *even = inp[1];
        });

    (out_odd, out_even)
}

/// Merges `([1, 3], [2, 4])` into `[1, 2, 3, 4]`.
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`.
pub fn interleave<T: Copy>(reals: &[T], imags: &[T]) -> Vec<T> {
    assert_eq!(reals.len(), imags.len());
    reals
        .iter()
        .zip(imags.iter())
        .flat_map(|(re, im)| [*re, *im])
        .collect()
}

/// Views a slice of complex numbers as the interleaved reals a plan works on.
#[cfg(feature = "complex-nums")]
pub fn as_interleaved_mut<T: Pod>(signal: &mut [Complex<T>]) -> &mut [T]
where
    Complex<T>: Pod,
{
    cast_slice_mut(signal)
}

/// Separates a slice of complex numbers into real and imaginary parts.
#[cfg(feature = "complex-nums")]
pub fn deinterleave_complex<T: Pod + Default>(signal: &[Complex<T>]) -> (Vec<T>, Vec<T>)
where
    Complex<T>: Pod,
{
    deinterleave(cast_slice(signal))
}

/// Utility function to combine separate vectors of real and imaginary components
/// into a single vector of Complex Number Structs.
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`.
#[cfg(feature = "complex-nums")]
pub fn combine_re_im<T: Copy>(reals: &[T], imags: &[T]) -> Vec<Complex<T>> {
    assert_eq!(reals.len(), imags.len());

    reals
        .iter()
        .zip(imags.iter())
        .map(|(z_re, z_im)| Complex::new(*z_re, *z_im))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen_test_vec(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    /// Slow but obviously correct implementation of deinterleaving,
    /// to be used in tests
    fn deinterleave_naive<T: Copy>(input: &[T]) -> (Vec<T>, Vec<T>) {
        input.chunks_exact(2).map(|c| (c[0], c[1])).unzip()
    }

    #[test]
    fn deinterleaving_correctness() {
        for len in [0, 1, 2, 3, 15, 16, 17, 127, 128, 129, 130, 135, 100500] {
            let input = gen_test_vec(len);
            let (naive_a, naive_b) = deinterleave_naive(&input);
            let (opt_a, opt_b) = deinterleave(&input);
            assert_eq!(naive_a, opt_a);
            assert_eq!(naive_b, opt_b);
        }
    }

    #[test]
    fn interleave_undoes_deinterleave() {
        let input = gen_test_vec(64);
        let (reals, imags) = deinterleave(&input);
        assert_eq!(interleave(&reals, &imags), input);
    }

    #[cfg(feature = "complex-nums")]
    #[test]
    fn complex_views_share_memory() {
        let mut complex_vec: Vec<_> = vec![
            Complex::new(1.0, 2.0),
            Complex::new(3.0, 4.0),
            Complex::new(5.0, 6.0),
            Complex::new(7.0, 8.0),
        ];

        let (reals, imags) = deinterleave_complex(&complex_vec);
        assert_eq!(combine_re_im(&reals, &imags), complex_vec);

        as_interleaved_mut(&mut complex_vec)[3] = -4.0;
        assert_eq!(complex_vec[1], Complex::new(3.0, -4.0));
    }
}
