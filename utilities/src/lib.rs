pub extern crate rustfft;

// export rustfft to factorfft
use rand::{distributions::Uniform, prelude::*};
use rustfft::num_traits::Float;

/// Asserts that two fp numbers are approximately equal.
///
/// # Panics
///
/// Panics if `actual` and `expected` are too far from each other
#[allow(dead_code)]
#[track_caller]
pub fn assert_float_closeness<T: Float + std::fmt::Display>(actual: T, expected: T, epsilon: T) {
    if (actual - expected).abs() >= epsilon {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (with epsilon {epsilon})",
        );
    }
}

/// Generate a random, complex, signal in the provided buffers
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`
pub fn gen_random_signal<T>(reals: &mut [T], imags: &mut [T])
where
    T: Float + rand::distributions::uniform::SampleUniform,
{
    assert_eq!(
        reals.len(),
        imags.len(),
        "Real and imaginary slices must be of equal length"
    );

    let mut rng = thread_rng();

    let uniform_dist = Uniform::new(T::from(-1.0).unwrap(), T::from(1.0).unwrap());
    for (real, imag) in reals.iter_mut().zip(imags.iter_mut()) {
        *real = uniform_dist.sample(&mut rng);
        *imag = uniform_dist.sample(&mut rng);
    }
}

/// Direct O(N^2) DFT of an interleaved `[re, im, re, im, ...]` signal.
///
/// `sign` is `1` for the forward transform (`exp(-2*pi*i*jk/N)`) and `-1` for the inverse.
/// Accumulates in `f64` and reduces `j * k` modulo `N` before taking the angle.
///
/// # Panics
///
/// Panics if `data` has odd length.
pub fn naive_dft<T: Float>(data: &[T], sign: i32) -> Vec<T> {
    assert_eq!(data.len() % 2, 0, "Interleaved data must have even length");
    let n = data.len() / 2;
    let points: Vec<(f64, f64)> = data
        .chunks_exact(2)
        .map(|c| (c[0].to_f64().unwrap(), c[1].to_f64().unwrap()))
        .collect();

    let mut out = Vec::with_capacity(data.len());
    for k in 0..n {
        let (mut acc_re, mut acc_im) = (0.0, 0.0);
        for (j, (re, im)) in points.iter().enumerate() {
            let angle =
                -(sign as f64) * std::f64::consts::TAU * ((j * k) % n) as f64 / n as f64;
            let (sin, cos) = angle.sin_cos();
            acc_re += re * cos - im * sin;
            acc_im += re * sin + im * cos;
        }
        out.push(T::from(acc_re).unwrap());
        out.push(T::from(acc_im).unwrap());
    }
    out
}
