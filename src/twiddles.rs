//! Twiddle factors in native floats.
//!
//! Exact roots are converted once, at plan time. From there a combine stage walks its
//! twiddles by rotation: the twiddle of offset `k1 + 1` is the twiddle of offset `k1`
//! multiplied by the stage's base power. Rotating floats drifts by about one rounding error
//! per step, so the walk is re-anchored on exactly evaluated powers every
//! [`REANCHOR_INTERVAL`] offsets.
use num_traits::Float;

use crate::exact::{next_root, Root};
use crate::planner::Direction;

/// Offsets between two exactly evaluated twiddle rows
pub const REANCHOR_INTERVAL: usize = 64;

/// `(re + i*im) * (by_re + i*by_im)`.
///
/// Every twiddle multiplication in the crate goes through this one expression, so two code
/// paths that apply the same twiddles in the same order produce the same bits.
#[inline(always)]
pub(crate) fn rotate<T: Float>(re: T, im: T, by_re: T, by_im: T) -> (T, T) {
    (re * by_re - im * by_im, re * by_im + im * by_re)
}

/// A root of unity in native floats, for callers without exact arithmetic.
///
/// Powers are taken by chained multiplication and accumulate roughly one rounding error per
/// step. Long chains should be re-derived from [`Root`] at intervals instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RootF<T> {
    pub re: T,
    pub im: T,
}

impl<T: Float> RootF<T> {
    /// `exp(-2*pi*i*S/n)` from the platform's `sin_cos`.
    pub fn primitive(n: usize, direction: Direction) -> Self {
        let two_pi = T::from(std::f64::consts::TAU).unwrap_or_else(T::nan);
        let len = T::from(n).unwrap_or_else(T::nan);
        let theta = -two_pi / len * T::from(direction.sign()).unwrap_or_else(T::one);
        let (im, re) = theta.sin_cos();
        Self { re, im }
    }

    pub fn from_exact(root: &Root) -> Self {
        let (re, im) = root.to_float();
        Self { re, im }
    }

    pub fn mul(self, other: Self) -> Self {
        let (re, im) = rotate(self.re, self.im, other.re, other.im);
        Self { re, im }
    }

    pub fn pow(self, power: usize) -> Self {
        self.powers().nth(power).unwrap_or(self)
    }

    /// `1, self, self^2, ...`
    pub fn powers(self) -> Twiddles<T> {
        Twiddles {
            step: self,
            w_re_prev: T::one(),
            w_im_prev: T::zero(),
        }
    }
}

/// Successive powers of a root, by rotation.
pub struct Twiddles<T> {
    step: RootF<T>,
    w_re_prev: T,
    w_im_prev: T,
}

impl<T: Float> Iterator for Twiddles<T> {
    type Item = RootF<T>;

    fn next(&mut self) -> Option<RootF<T>> {
        let current = RootF {
            re: self.w_re_prev,
            im: self.w_im_prev,
        };
        (self.w_re_prev, self.w_im_prev) =
            rotate(self.w_re_prev, self.w_im_prev, self.step.re, self.step.im);
        Some(current)
    }
}

/// Twiddles of one radix-`K` combine stage over sub-size `M`.
///
/// Offset `k1` of the stage multiplies input `j` by `W^(j*k1)` for `j` in `1..K`, with `W`
/// the primitive root of the stage length `K*M`.
#[derive(Clone, Debug)]
pub(crate) struct StageTwiddles<T> {
    m: usize,
    /// `W^j` for `j` in `1..K`
    steps: Vec<(T, T)>,
    /// Row `r` holds `W^(j*r*REANCHOR_INTERVAL)` for `j` in `1..K`
    anchors: Vec<Vec<(T, T)>>,
}

impl<T: Float> StageTwiddles<T> {
    pub fn new(root: &Root, radix: usize, m: usize) -> Self {
        let powers_of = |base: &Root| -> Vec<(T, T)> {
            let mut out = Vec::with_capacity(radix.saturating_sub(1));
            let mut w = base.clone();
            for _ in 1..radix {
                out.push(w.to_float());
                w = next_root(&w, base);
            }
            out
        };

        let steps = powers_of(root);

        let rows = m.saturating_sub(1) / REANCHOR_INTERVAL;
        let mut anchors = Vec::with_capacity(rows);
        if rows > 0 {
            let stride = root.pow(REANCHOR_INTERVAL);
            let mut row = stride.clone();
            for _ in 0..rows {
                anchors.push(powers_of(&row));
                row = next_root(&row, &stride);
            }
        }

        Self { m, steps, anchors }
    }

    /// Twiddles of offset `1`, the first offset that needs any.
    pub fn first(&self) -> Vec<(T, T)> {
        self.steps.clone()
    }

    /// Twiddles per offset, `K - 1`.
    pub fn width(&self) -> usize {
        self.steps.len()
    }

    /// Writes the twiddles of offset `1` into `running`, which holds [`Self::width`] pairs.
    #[inline]
    pub fn start(&self, running: &mut [(T, T)]) {
        running.copy_from_slice(&self.steps);
    }

    /// Moves `running` from the twiddles of offset `k1 - 1` to those of offset `k1`.
    #[inline]
    pub fn advance(&self, running: &mut [(T, T)], k1: usize) {
        if k1 % REANCHOR_INTERVAL == 0 {
            if let Some(row) = self.anchors.get(k1 / REANCHOR_INTERVAL - 1) {
                running.copy_from_slice(row);
                return;
            }
        }
        for (w, step) in running.iter_mut().zip(self.steps.iter()) {
            *w = rotate(w.0, w.1, step.0, step.1);
        }
    }

    /// Every twiddle of offsets `1..M`, row by row, produced by the same walk as the
    /// runtime loop.
    pub fn table(&self) -> Vec<(T, T)> {
        let mut table = Vec::with_capacity(self.m.saturating_sub(1) * self.steps.len());
        if self.m < 2 {
            return table;
        }
        let mut running = self.first();
        table.extend_from_slice(&running);
        for k1 in 2..self.m {
            self.advance(&mut running, k1);
            table.extend_from_slice(&running);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_1_SQRT_2;

    use utilities::assert_float_closeness;

    use super::*;
    use crate::options::Options;

    #[test]
    fn twiddles_8() {
        let mut twiddle_iter = RootF::<f64>::primitive(8, Direction::Forward).powers();

        let w = twiddle_iter.next().unwrap();
        assert_float_closeness(w.re, 1.0, 1e-10);
        assert_float_closeness(w.im, 0.0, 1e-10);

        let w = twiddle_iter.next().unwrap();
        assert_float_closeness(w.re, FRAC_1_SQRT_2, 1e-10);
        assert_float_closeness(w.im, -FRAC_1_SQRT_2, 1e-10);

        let w = twiddle_iter.next().unwrap();
        assert_float_closeness(w.re, 0.0, 1e-10);
        assert_float_closeness(w.im, -1.0, 1e-10);

        let w = twiddle_iter.next().unwrap();
        assert_float_closeness(w.re, -FRAC_1_SQRT_2, 1e-10);
        assert_float_closeness(w.im, -FRAC_1_SQRT_2, 1e-10);
    }

    #[test]
    fn float_chains_drift_and_exact_chains_do_not() {
        let n = 1 << 12;
        let exact = Root::primitive(n, Direction::Forward, &Options::default()).unwrap();
        let float = RootF::<f64>::primitive(n, Direction::Forward);

        let exact_power = RootF::<f64>::from_exact(&exact.pow(1000));
        let float_power = float.pow(1000);
        let angle = -std::f64::consts::TAU * 1000.0 / n as f64;

        assert_float_closeness(exact_power.re, angle.cos(), 1e-15);
        assert_float_closeness(exact_power.im, angle.sin(), 1e-15);
        // bounded by the chain length
        assert_float_closeness(float_power.re, angle.cos(), 1000.0 * 1e-15);
        assert_float_closeness(float_power.im, angle.sin(), 1000.0 * 1e-15);
    }

    #[test]
    fn table_rows_follow_the_runtime_walk() {
        let root = Root::primitive(3 * 200, Direction::Inverse, &Options::default()).unwrap();
        let stage = StageTwiddles::<f64>::new(&root, 3, 200);
        let table = stage.table();
        assert_eq!(table.len(), 199 * 2);

        let mut running = stage.first();
        for k1 in 1..200 {
            if k1 > 1 {
                stage.advance(&mut running, k1);
            }
            assert_eq!(&table[(k1 - 1) * 2..k1 * 2], running.as_slice());
            let angle = std::f64::consts::TAU * k1 as f64 / 600.0;
            assert_float_closeness(running[0].0, angle.cos(), 1e-14);
            assert_float_closeness(running[0].1, angle.sin(), 1e-14);
            assert_float_closeness(running[1].1, (2.0 * angle).sin(), 1e-14);
        }
    }

    #[test]
    fn anchors_land_on_exact_powers() {
        let root = Root::primitive(2 * 256, Direction::Forward, &Options::default()).unwrap();
        let stage = StageTwiddles::<f64>::new(&root, 2, 256);
        let table = stage.table();
        let exact = RootF::<f64>::from_exact(&root.pow(REANCHOR_INTERVAL));
        assert_eq!(table[REANCHOR_INTERVAL - 1], (exact.re, exact.im));
    }

    #[test]
    fn short_stages_have_empty_tables() {
        let root = Root::primitive(5, Direction::Forward, &Options::default()).unwrap();
        assert!(StageTwiddles::<f32>::new(&root, 5, 1).table().is_empty());
    }
}
