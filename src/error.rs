//! Error type shared by plan construction and plan execution.
//!
//! Every variant except [`FftError::BufferSizeMismatch`] and
//! [`FftError::ElementTypeMismatch`] is raised while a plan is being built,
//! before any caller data is touched.
use std::error::Error;
use std::fmt::Formatter;

use crate::planner::ElementType;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FftError {
    /// A transform of length zero was requested
    ZeroLength,
    /// The factor list does not multiply out to the transform length
    MalformedFactorization { n: usize, product: usize },
    /// The sine/cosine series did not settle within its step budget
    PrecisionExceeded { places: usize, steps: usize },
    /// No butterfly kernel is registered for this radix
    UnsupportedRadix(usize),
    /// A caller buffer holds fewer than `2 * N` reals, or split slices disagree in length
    BufferSizeMismatch { expected: usize, actual: usize },
    /// `select` was called with an id outside `[0, count)`
    InvalidConfigurationId { id: usize, count: usize },
    /// An angle `A/B * pi` with `B == 0`
    ZeroDenominator,
    /// `limb_base` outside `[2, 10^9]`
    InvalidLimbBase(u32),
    /// A transform length too large to express as an angle denominator
    LengthTooLarge(usize),
    /// A type-erased kernel was applied to a buffer of the wrong float width
    ElementTypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },
}

impl Error for FftError {}

impl std::fmt::Display for FftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FftError::ZeroLength => f.write_str("Cannot build a transform of length zero"),
            FftError::MalformedFactorization { n, product } => f.write_fmt(format_args!(
                "Factor list multiplies out to {product}, but the transform length is {n}"
            )),
            FftError::PrecisionExceeded { places, steps } => f.write_fmt(format_args!(
                "Series did not reach {places} fractional limbs within {steps} steps"
            )),
            FftError::UnsupportedRadix(k) => {
                f.write_fmt(format_args!("No butterfly kernel is registered for radix {k}"))
            }
            FftError::BufferSizeMismatch { expected, actual } => f.write_fmt(format_args!(
                "Buffer expected to hold {expected} reals, but it holds {actual}"
            )),
            FftError::InvalidConfigurationId { id, count } => f.write_fmt(format_args!(
                "Configuration id {id} is out of range, there are {count} configurations"
            )),
            FftError::ZeroDenominator => f.write_str("Angle denominator must be non-zero"),
            FftError::InvalidLimbBase(base) => f.write_fmt(format_args!(
                "Limb base {base} is outside the supported range [2, 1000000000]"
            )),
            FftError::LengthTooLarge(n) => {
                f.write_fmt(format_args!("Transform length {n} is too large"))
            }
            FftError::ElementTypeMismatch { expected, actual } => f.write_fmt(format_args!(
                "Kernel operates on {expected} data, but {actual} data was supplied"
            )),
        }
    }
}
