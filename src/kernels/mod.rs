//! Butterfly kernels
//!
//! A butterfly is a fixed-size DFT applied to `radix` complex points of an interleaved
//! `[re, im, re, im, ...]` buffer at `offset, offset + stride, ...` (complex indices).
//! Every constant a kernel needs is a root of unity from the exact evaluator, converted to
//! the element type once when the kernel is built.
//!
//! ## Organization
//!
//! - `common`: radix 2, 4 and 8
//! - `odd`: radix 3 and 5, and a direct DFT for any other odd prime
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::FftError;
use crate::exact::{next_root, Root};
use crate::factor::prime_factors;
use crate::options::Options;
use crate::planner::{Direction, Element};

pub mod common;
pub mod odd;

/// Largest prime the generic DFT serves, whatever `max_generic_radix` allows. Kernels and
/// combine loops keep their per-point scratch on the stack, sized by this.
pub const MAX_PRIME_RADIX: usize = 251;

#[inline(always)]
pub(crate) fn load<T: Copy>(data: &[T], index: usize) -> (T, T) {
    (data[2 * index], data[2 * index + 1])
}

#[inline(always)]
pub(crate) fn store<T>(data: &mut [T], index: usize, re: T, im: T) {
    data[2 * index] = re;
    data[2 * index + 1] = im;
}

/// A fixed-size DFT on strided complex points.
pub trait Butterfly<T>: Debug + Send + Sync {
    fn radix(&self) -> usize;

    /// Transforms points `offset + j * stride` for `j` in `0..radix`, in place.
    fn apply(&self, data: &mut [T], offset: usize, stride: usize);
}

#[derive(Debug)]
struct Radix2;

impl<T: Element> Butterfly<T> for Radix2 {
    fn radix(&self) -> usize {
        2
    }

    fn apply(&self, data: &mut [T], offset: usize, stride: usize) {
        common::butterfly_2(data, offset, stride);
    }
}

#[derive(Debug)]
struct Radix4<T> {
    rot: T,
}

impl<T: Element> Butterfly<T> for Radix4<T> {
    fn radix(&self) -> usize {
        4
    }

    fn apply(&self, data: &mut [T], offset: usize, stride: usize) {
        common::butterfly_4(data, offset, stride, self.rot);
    }
}

#[derive(Debug)]
struct Radix8<T> {
    w: [(T, T); 4],
    rot: T,
}

impl<T: Element> Butterfly<T> for Radix8<T> {
    fn radix(&self) -> usize {
        8
    }

    fn apply(&self, data: &mut [T], offset: usize, stride: usize) {
        common::butterfly_8(data, offset, stride, &self.w, self.rot);
    }
}

#[derive(Debug)]
struct Radix3<T> {
    w: (T, T),
}

impl<T: Element> Butterfly<T> for Radix3<T> {
    fn radix(&self) -> usize {
        3
    }

    fn apply(&self, data: &mut [T], offset: usize, stride: usize) {
        odd::butterfly_3(data, offset, stride, self.w);
    }
}

#[derive(Debug)]
struct Radix5<T> {
    w1: (T, T),
    w2: (T, T),
}

impl<T: Element> Butterfly<T> for Radix5<T> {
    fn radix(&self) -> usize {
        5
    }

    fn apply(&self, data: &mut [T], offset: usize, stride: usize) {
        odd::butterfly_5(data, offset, stride, self.w1, self.w2);
    }
}

#[derive(Debug)]
struct PrimeDft<T> {
    powers: Vec<(T, T)>,
}

impl<T: Element> Butterfly<T> for PrimeDft<T> {
    fn radix(&self) -> usize {
        self.powers.len()
    }

    fn apply(&self, data: &mut [T], offset: usize, stride: usize) {
        odd::butterfly_prime(data, offset, stride, &self.powers);
    }
}

/// `w^0, ..., w^(count - 1)` converted to floats
fn float_powers<T: Element>(w: &Root, count: usize) -> Vec<(T, T)> {
    let mut out = Vec::with_capacity(count);
    let mut acc = Root::one(w.places(), w.re().base());
    for _ in 0..count {
        out.push(acc.to_float());
        acc = next_root(&acc, w);
    }
    out
}

/// Builds butterflies on demand and shares them between the stages of a plan.
#[derive(Debug)]
pub struct Butterflies<T> {
    direction: Direction,
    options: Options,
    kernels: HashMap<usize, Arc<dyn Butterfly<T>>>,
}

impl<T: Element> Butterflies<T> {
    pub fn new(direction: Direction, options: &Options) -> Self {
        Self {
            direction,
            options: options.clone(),
            kernels: HashMap::new(),
        }
    }

    /// The butterfly for `radix`.
    ///
    /// # Errors
    ///
    /// [`FftError::UnsupportedRadix`] if `radix` is neither 2, 4 or 8 nor a prime up to
    /// `options.max_generic_radix` and [`MAX_PRIME_RADIX`]. Root evaluation errors are
    /// propagated.
    pub fn get(&mut self, radix: usize) -> Result<Arc<dyn Butterfly<T>>, FftError> {
        if let Some(kernel) = self.kernels.get(&radix) {
            return Ok(Arc::clone(kernel));
        }
        let kernel = self.build(radix)?;
        self.kernels.insert(radix, Arc::clone(&kernel));
        Ok(kernel)
    }

    fn build(&self, radix: usize) -> Result<Arc<dyn Butterfly<T>>, FftError> {
        let is_prime = prime_factors(radix) == [radix];
        let largest = self.options.max_generic_radix.min(MAX_PRIME_RADIX);
        if !matches!(radix, 2 | 4 | 8) && !(is_prime && radix <= largest) {
            return Err(FftError::UnsupportedRadix(radix));
        }

        let w = Root::primitive(radix, self.direction, &self.options)?;
        let kernel: Arc<dyn Butterfly<T>> = match radix {
            2 => Arc::new(Radix2),
            4 => Arc::new(Radix4 {
                rot: w.to_float::<T>().1,
            }),
            8 => {
                let powers = float_powers(&w, 4);
                let rot = Root::primitive(4, self.direction, &self.options)?
                    .to_float::<T>()
                    .1;
                Arc::new(Radix8 {
                    w: [powers[0], powers[1], powers[2], powers[3]],
                    rot,
                })
            }
            3 => Arc::new(Radix3 { w: w.to_float() }),
            5 => {
                let powers = float_powers(&w, 3);
                Arc::new(Radix5 {
                    w1: powers[1],
                    w2: powers[2],
                })
            }
            p => Arc::new(PrimeDft {
                powers: float_powers(&w, p),
            }),
        };
        Ok(kernel)
    }
}
