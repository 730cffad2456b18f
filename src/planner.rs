//! The planner module provides the interface for building and executing a fixed-size
//! transform. Building a plan does all the expensive work up front: the length is
//! factorized, the stage chain is laid out, every twiddle factor is evaluated exactly and
//! converted to the element type, and the input permutation is precomputed. Applying a
//! plan only touches caller data.
use std::fmt::{self, Debug, Display, Formatter};

#[cfg(feature = "complex-nums")]
use num_complex::Complex;
use num_traits::Float;

use crate::algorithms::decompose::{decompose, Stage};
use crate::algorithms::permute::DigitReversal;
use crate::algorithms::{in_place, out_of_place};
use crate::error::FftError;
use crate::exact::Root;
use crate::factor::{factorize, Factorization};
use crate::options::Options;

/// Inverse is for running the inverse transform
/// Forward is for running the regular FFT
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Twiddles are `exp(-2*pi*i*k/N)`
    Forward = 1,
    /// Twiddles are `exp(+2*pi*i*k/N)`
    Inverse = -1,
}

impl Direction {
    /// `1` forward, `-1` inverse
    pub fn sign(self) -> i32 {
        self as i32
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

/// Floating-point width of a kernel's data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    F32,
    F64,
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::F32 => f.write_str("f32"),
            ElementType::F64 => f.write_str("f64"),
        }
    }
}

/// A float type plans can be built for.
pub trait Element: Float + Debug + Send + Sync + 'static {
    const ELEMENT: ElementType;

    fn plan_of(handle: &KernelHandle) -> Option<&Plan<Self>>;

    fn into_handle(plan: Plan<Self>) -> KernelHandle;
}

macro_rules! impl_element_for {
    ($precision:ident, $tag:ident) => {
        impl Element for $precision {
            const ELEMENT: ElementType = ElementType::$tag;

            fn plan_of(handle: &KernelHandle) -> Option<&Plan<Self>> {
                match handle {
                    KernelHandle::$tag(plan) => Some(plan),
                    _ => None,
                }
            }

            fn into_handle(plan: Plan<Self>) -> KernelHandle {
                KernelHandle::$tag(plan)
            }
        }
    };
}

impl_element_for!(f32, F32);
impl_element_for!(f64, F64);

/// A transform of one fixed length, direction and element type.
///
/// Buffers are interleaved: complex point `k` is `data[2 * k] + i * data[2 * k + 1]`, so a
/// plan of length `N` works on the first `2 * N` reals of a slice and rejects shorter ones. The transform is not
/// normalized: running a forward plan and then the inverse plan multiplies by `N`.
pub struct Plan<T> {
    factorization: Factorization,
    direction: Direction,
    options: Options,
    stages: Vec<Stage<T>>,
    permutation: DigitReversal,
}

/// Builds a plan for a transform of length `n`.
///
/// # Errors
///
/// [`FftError::ZeroLength`] for `n == 0`, [`FftError::InvalidLimbBase`] if
/// `options.limb_base` is outside `[2, 10^9]`, [`FftError::UnsupportedRadix`] if `n` has a
/// prime factor above `options.max_generic_radix`, and [`FftError::PrecisionExceeded`] if a
/// twiddle factor cannot be evaluated within the series step budget.
pub fn build_transform<T: Element>(
    n: usize,
    direction: Direction,
    options: &Options,
) -> Result<Plan<T>, FftError> {
    Plan::new(n, direction, options)
}

impl<T: Element> Plan<T> {
    /// See [`build_transform`].
    pub fn new(n: usize, direction: Direction, options: &Options) -> Result<Self, FftError> {
        Self::with_factorization(factorize(n)?, direction, options)
    }

    /// Builds a plan that consumes the factors of `factorization` in the order given.
    ///
    /// # Errors
    ///
    /// As [`build_transform`], plus [`FftError::UnsupportedRadix`] for a composite factor
    /// other than 4 or 8.
    pub fn with_factorization(
        factorization: Factorization,
        direction: Direction,
        options: &Options,
    ) -> Result<Self, FftError> {
        options.validate()?;
        let stages = decompose(&factorization, direction, options)?;
        let radices: Vec<usize> = stages.iter().map(|stage| stage.radix).collect();
        let permutation = DigitReversal::new(&radices);

        Ok(Self {
            factorization,
            direction,
            options: options.clone(),
            stages,
            permutation,
        })
    }

    pub fn len(&self) -> usize {
        self.factorization.len()
    }

    /// Always `false`: zero-length plans cannot be built.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn factorization(&self) -> &Factorization {
        &self.factorization
    }

    /// Radix of every stage, outermost first.
    pub fn radices(&self) -> Vec<usize> {
        self.stages.iter().map(|stage| stage.radix).collect()
    }

    /// Exact primitive root of every stage length, outermost first.
    pub fn stage_roots(&self) -> impl Iterator<Item = &Root> + '_ {
        self.stages.iter().map(|stage| &stage.root)
    }

    /// Whether each stage, outermost first, combines through the unrolled form.
    pub fn unrolled_stages(&self) -> Vec<bool> {
        self.stages.iter().map(Stage::is_unrolled).collect()
    }

    /// The first `2 * N` reals of `data`.
    fn prefix<'a>(&self, data: &'a [T]) -> Result<&'a [T], FftError> {
        let expected = 2 * self.len();
        let actual = data.len();
        data.get(..expected)
            .ok_or(FftError::BufferSizeMismatch { expected, actual })
    }

    fn prefix_mut<'a>(&self, data: &'a mut [T]) -> Result<&'a mut [T], FftError> {
        let expected = 2 * self.len();
        let actual = data.len();
        data.get_mut(..expected)
            .ok_or(FftError::BufferSizeMismatch { expected, actual })
    }

    /// Transforms the first `2 * N` reals of `data` in place. Anything after them is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`FftError::BufferSizeMismatch`] if `data` holds fewer than `2 * N` reals; `data` is
    /// left untouched.
    pub fn process(&self, data: &mut [T]) -> Result<(), FftError> {
        let data = self.prefix_mut(data)?;
        self.permutation.apply(data);
        in_place::transform(&self.stages, data, &self.options);
        Ok(())
    }

    /// Transforms the first `2 * N` reals of `src` into the first `2 * N` reals of `dst`,
    /// leaving `src` untouched.
    ///
    /// # Errors
    ///
    /// [`FftError::BufferSizeMismatch`] if either buffer holds fewer than `2 * N` reals.
    pub fn process_out_of_place(&self, src: &[T], dst: &mut [T]) -> Result<(), FftError> {
        let src = self.prefix(src)?;
        let dst = self.prefix_mut(dst)?;
        out_of_place::transform(&self.stages, src, 0, dst, &self.options);
        Ok(())
    }

    /// Transforms `data` in place and divides the result by `N`.
    ///
    /// # Errors
    ///
    /// As [`Plan::process`].
    pub fn process_normalized(&self, data: &mut [T]) -> Result<(), FftError> {
        self.process(data)?;
        let scaling_factor = T::one() / T::from(self.len()).unwrap_or_else(T::one);
        for x in self.prefix_mut(data)?.iter_mut() {
            *x = *x * scaling_factor;
        }
        Ok(())
    }

    /// Transforms a slice of complex numbers in place.
    ///
    /// # Errors
    ///
    /// [`FftError::BufferSizeMismatch`] if `data.len() < N`; the error reports the
    /// interleaved lengths.
    #[cfg(feature = "complex-nums")]
    pub fn process_complex(&self, data: &mut [Complex<T>]) -> Result<(), FftError>
    where
        T: bytemuck::Pod,
        Complex<T>: bytemuck::Pod,
    {
        self.process(crate::utils::as_interleaved_mut(data))
    }
}

impl<T> Debug for Plan<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let stages: Vec<String> = self
            .stages
            .iter()
            .map(|stage| {
                let form = if stage.is_unrolled() { "unrolled" } else { "loop" };
                format!("{}x{} ({form})", stage.radix, stage.m)
            })
            .collect();
        f.debug_struct("Plan")
            .field("len", &self.factorization.len())
            .field("direction", &self.direction)
            .field("stages", &stages)
            .finish()
    }
}

pub type Plan32 = Plan<f32>;
pub type Plan64 = Plan<f64>;

/// A plan whose element type is chosen at runtime.
#[derive(Debug)]
pub enum KernelHandle {
    F32(Plan<f32>),
    F64(Plan<f64>),
}

impl KernelHandle {
    /// Builds a plan of length `n` for `element` data.
    ///
    /// # Errors
    ///
    /// As [`build_transform`].
    pub fn build(
        n: usize,
        direction: Direction,
        element: ElementType,
        options: &Options,
    ) -> Result<Self, FftError> {
        Ok(match element {
            ElementType::F32 => KernelHandle::F32(Plan::new(n, direction, options)?),
            ElementType::F64 => KernelHandle::F64(Plan::new(n, direction, options)?),
        })
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            KernelHandle::F32(_) => ElementType::F32,
            KernelHandle::F64(_) => ElementType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            KernelHandle::F32(plan) => plan.len(),
            KernelHandle::F64(plan) => plan.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn direction(&self) -> Direction {
        match self {
            KernelHandle::F32(plan) => plan.direction(),
            KernelHandle::F64(plan) => plan.direction(),
        }
    }

    /// The typed plan behind this handle.
    ///
    /// # Errors
    ///
    /// [`FftError::ElementTypeMismatch`] if the handle holds a plan of the other width.
    pub fn plan<T: Element>(&self) -> Result<&Plan<T>, FftError> {
        T::plan_of(self).ok_or(FftError::ElementTypeMismatch {
            expected: self.element_type(),
            actual: T::ELEMENT,
        })
    }

    /// # Errors
    ///
    /// See [`KernelHandle::plan`] and [`Plan::process`].
    pub fn apply<T: Element>(&self, data: &mut [T]) -> Result<(), FftError> {
        self.plan::<T>()?.process(data)
    }

    /// # Errors
    ///
    /// See [`KernelHandle::plan`] and [`Plan::process_out_of_place`].
    pub fn apply_out_of_place<T: Element>(&self, src: &[T], dst: &mut [T]) -> Result<(), FftError> {
        self.plan::<T>()?.process_out_of_place(src, dst)
    }
}

impl<T: Element> From<Plan<T>> for KernelHandle {
    fn from(plan: Plan<T>) -> Self {
        T::into_handle(plan)
    }
}
