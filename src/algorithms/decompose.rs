//! Construction of the stage chain.
//!
//! Every sub-transform at one level of the recursion has the same length, radix and
//! twiddles as its siblings, so the decomposition tree collapses into a chain: stage `l`
//! describes all nodes at depth `l`. The chain is built by walking the factor list:
//!
//! - a factor whose multiplicity is used up is skipped without emitting a stage,
//! - otherwise factor `K` is consumed: a stage of length `N` and sub-size `M = N / K` is
//!   emitted, and the walk continues at length `M` with root `W^K` and source stride
//!   multiplied by `K`,
//! - the last stage emitted has `M == 1` and is a bare butterfly.
use std::sync::Arc;

use crate::error::FftError;
use crate::exact::Root;
use crate::factor::Factorization;
use crate::kernels::{Butterflies, Butterfly};
use crate::options::Options;
use crate::planner::{Direction, Element};
use crate::twiddles::StageTwiddles;

/// How the combine step of a stage walks its offsets.
#[derive(Clone, Debug)]
pub(crate) enum CombineForm<T> {
    /// Straight-line code over a twiddle table fixed at plan time
    Unrolled(Vec<(T, T)>),
    /// Runtime loop over running twiddles
    Loop,
}

/// One level of the decomposition.
#[derive(Clone, Debug)]
pub(crate) struct Stage<T> {
    pub radix: usize,
    /// Length of every transform at this level
    pub len: usize,
    /// Length of the sub-transforms combined by this level
    pub m: usize,
    /// Distance between consecutive source points at this level, out of place
    pub src_stride: usize,
    /// Primitive root of `len`
    pub root: Root,
    pub butterfly: Arc<dyn Butterfly<T>>,
    pub twiddles: StageTwiddles<T>,
    pub form: CombineForm<T>,
}

impl<T> Stage<T> {
    pub fn is_terminal(&self) -> bool {
        self.m == 1
    }

    pub fn is_unrolled(&self) -> bool {
        matches!(self.form, CombineForm::Unrolled(_))
    }
}

struct WalkState {
    factors: Vec<(usize, u32)>,
    cursor: usize,
    n: usize,
    root: Root,
    stride: usize,
}

/// Builds the stage chain of `factorization`, outermost stage first.
///
/// # Errors
///
/// [`FftError::UnsupportedRadix`] for a factor without a butterfly,
/// [`FftError::MalformedFactorization`] if a factor does not divide the remaining length,
/// and any root evaluation error.
pub(crate) fn decompose<T: Element>(
    factorization: &Factorization,
    direction: Direction,
    options: &Options,
) -> Result<Vec<Stage<T>>, FftError> {
    let n = factorization.len();
    let mut butterflies = Butterflies::<T>::new(direction, options);
    let mut state = WalkState {
        factors: factorization.grouped(options.radix_grouping),
        cursor: 0,
        n,
        root: Root::primitive(n, direction, options)?,
        stride: 1,
    };
    let mut stages = Vec::new();

    while let Some(&(radix, count)) = state.factors.get(state.cursor) {
        if count == 0 {
            state.cursor += 1;
            continue;
        }
        if state.n % radix != 0 {
            return Err(FftError::MalformedFactorization {
                n,
                product: n / state.n * radix,
            });
        }

        let m = state.n / radix;
        let butterfly = butterflies.get(radix)?;
        let twiddles = StageTwiddles::new(&state.root, radix, m);
        let form = if m <= options.static_loop_limit {
            CombineForm::Unrolled(twiddles.table())
        } else {
            CombineForm::Loop
        };
        let child_root = state.root.pow(radix);

        stages.push(Stage {
            radix,
            len: state.n,
            m,
            src_stride: state.stride,
            root: state.root,
            butterfly,
            twiddles,
            form,
        });

        state.factors[state.cursor].1 -= 1;
        state.n = m;
        state.root = child_root;
        state.stride *= radix;
    }

    debug_assert_eq!(state.n, 1);
    Ok(stages)
}
