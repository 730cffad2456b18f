//! Fixed-size FFT kernels built by recursive factorization.
//!
//! A plan for length `N` factors `N` into radices, lays the factors out as a chain of
//! decimation-in-time stages and evaluates every twiddle factor exactly, as a fixed-point
//! decimal with a configurable number of limbs, before rounding it to `f32` or `f64`.
//! Combine stages with a short inner loop are unrolled; the unrolled stages produce the
//! same output bits as the looped ones.
//!
//! ```
//! use factorfft::planner::Direction;
//! use factorfft::{build_transform, Options};
//!
//! let plan = build_transform::<f64>(12, Direction::Forward, &Options::default()).unwrap();
//! let mut data = vec![0.0; 24];
//! data[0] = 1.0;
//! plan.process(&mut data).unwrap();
//! assert!(data.chunks_exact(2).all(|z| (z[0] - 1.0).abs() < 1e-12 && z[1].abs() < 1e-12));
//! ```
//!
//! Families of kernels over several lengths, directions and element types are addressed
//! by a dense configuration id, see [`KernelFamily`].
#![warn(
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::correctness,
    clippy::suspicious
)]

pub mod enumerate;
pub mod error;
pub mod exact;
pub mod factor;
pub mod family;
pub mod kernels;
pub mod options;
pub mod parallel;
pub mod planner;
pub mod twiddles;
pub mod utils;

mod algorithms;

pub use crate::enumerate::{enumerate, Axis, AxisEntry, Enumeration};
pub use crate::error::FftError;
pub use crate::exact::{evaluate, next_root, Decimal, Root};
pub use crate::factor::{factorize, Factorization};
pub use crate::family::{Configuration, KernelFamily};
pub use crate::options::{Options, RadixGrouping, SeriesPolicy};
pub use crate::planner::{
    build_transform, Direction, Element, ElementType, KernelHandle, Plan, Plan32, Plan64,
};
pub use crate::twiddles::RootF;

macro_rules! impl_fft_for {
    ($func_name:ident, $precision:ty, $opts_and_plan:ident) => {
        /// FFT of split real and imaginary parts, in place.
        ///
        /// Builds a plan with options guessed from the input length. To transform many
        /// signals of one length, build the plan once with [`build_transform`] instead.
        ///
        /// # Errors
        ///
        /// As [`build_transform`]. Slices of different lengths are reported as
        /// [`FftError::BufferSizeMismatch`].
        pub fn $func_name(
            reals: &mut [$precision],
            imags: &mut [$precision],
            direction: Direction,
        ) -> Result<(), FftError> {
            let options = Options::guess_options(reals.len());
            let plan = Plan::<$precision>::new(reals.len(), direction, &options)?;
            $opts_and_plan(reals, imags, &plan)
        }
    };
}

impl_fft_for!(fft_64, f64, fft_64_with_plan);
impl_fft_for!(fft_32, f32, fft_32_with_plan);

macro_rules! impl_fft_with_plan_for {
    ($func_name:ident, $precision:ty) => {
        /// FFT of split real and imaginary parts with a prebuilt plan.
        ///
        /// # Errors
        ///
        /// [`FftError::BufferSizeMismatch`] unless both slices hold exactly `plan.len()`
        /// values.
        pub fn $func_name(
            reals: &mut [$precision],
            imags: &mut [$precision],
            plan: &Plan<$precision>,
        ) -> Result<(), FftError> {
            if reals.len() != imags.len() || reals.len() != plan.len() {
                return Err(FftError::BufferSizeMismatch {
                    expected: 2 * plan.len(),
                    actual: reals.len() + imags.len(),
                });
            }
            let mut data = utils::interleave(reals, imags);
            plan.process(&mut data)?;
            let (re, im) = utils::deinterleave(&data);
            reals.copy_from_slice(&re);
            imags.copy_from_slice(&im);
            Ok(())
        }
    };
}

impl_fft_with_plan_for!(fft_64_with_plan, f64);
impl_fft_with_plan_for!(fft_32_with_plan, f32);

#[cfg(test)]
mod tests {
    use utilities::rustfft::num_complex::Complex64;
    use utilities::rustfft::FftPlanner;
    use utilities::{assert_float_closeness, gen_random_signal};

    use super::*;

    #[test]
    fn fft_64_matches_rustfft() {
        for n in [2, 6, 12, 64, 100, 243, 1000, 1 << 12, 3 * 5 * 7 * 8] {
            let mut reals = vec![0.0; n];
            let mut imags = vec![0.0; n];
            gen_random_signal(&mut reals, &mut imags);

            let mut buffer: Vec<Complex64> = reals
                .iter()
                .zip(imags.iter())
                .map(|(re, im)| Complex64::new(*re, *im))
                .collect();
            let mut planner = FftPlanner::new();
            planner.plan_fft_forward(n).process(&mut buffer);

            fft_64(&mut reals, &mut imags, Direction::Forward).unwrap();

            for (i, z) in buffer.iter().enumerate() {
                assert_float_closeness(reals[i], z.re, 1e-10);
                assert_float_closeness(imags[i], z.im, 1e-10);
            }
        }
    }

    #[test]
    fn fft_32_round_trip() {
        let n = 48;
        let mut reals: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let mut imags: Vec<f32> = (0..n).map(|i| -(i as f32) / 2.0).collect();
        let (orig_re, orig_im) = (reals.clone(), imags.clone());

        fft_32(&mut reals, &mut imags, Direction::Forward).unwrap();
        fft_32(&mut reals, &mut imags, Direction::Inverse).unwrap();

        for i in 0..n {
            assert_float_closeness(reals[i] / n as f32, orig_re[i], 1e-3);
            assert_float_closeness(imags[i] / n as f32, orig_im[i], 1e-3);
        }
    }

    #[test]
    fn split_slices_must_agree() {
        let mut reals = vec![0.0; 8];
        let mut imags = vec![0.0; 7];
        assert_eq!(
            fft_64(&mut reals, &mut imags, Direction::Forward),
            Err(FftError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            })
        );
    }
}
