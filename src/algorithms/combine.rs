//! The radix-`K` combine step.
//!
//! A block of `K * M` points holds `K` finished sub-transforms of length `M`, sub-transform
//! `j` at points `j * M .. (j + 1) * M`. For every offset `k1` in `0..M` the combine step
//! multiplies point `j * M + k1` by `W^(j * k1)` and runs the `K`-point butterfly over
//! `k1, k1 + M, ..., k1 + (K - 1) * M`. Offset zero needs no twiddles.
//!
//! Short stages run as straight-line code over a precomputed table, long stages as a loop
//! that rotates its twiddles as it goes. The table is produced by the same rotations, so
//! both forms yield identical bits.
use num_traits::Float;

use crate::algorithms::decompose::{CombineForm, Stage};
use crate::kernels::{load, store, Butterfly, MAX_PRIME_RADIX};
use crate::planner::Element;
use crate::twiddles::{rotate, StageTwiddles};

/// Combines the `K` sub-transforms held in `block`.
pub(crate) fn combine<T: Element>(stage: &Stage<T>, block: &mut [T]) {
    debug_assert_eq!(block.len(), 2 * stage.len);
    let butterfly = stage.butterfly.as_ref();
    let m = stage.m;

    butterfly.apply(block, 0, m);
    match &stage.form {
        CombineForm::Unrolled(table) => unrolled(butterfly, table, block, m),
        CombineForm::Loop => looped(butterfly, &stage.twiddles, block, m),
    }
}

#[multiversion::multiversion(targets(
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    "aarch64+neon",
))]
#[inline]
fn apply_twiddles<T: Float>(block: &mut [T], k1: usize, m: usize, twiddles: &[(T, T)]) {
    for (j, &(w_re, w_im)) in twiddles.iter().enumerate() {
        let index = (j + 1) * m + k1;
        let (re, im) = load(block, index);
        let (re, im) = rotate(re, im, w_re, w_im);
        store(block, index, re, im);
    }
}

fn looped<T: Element>(
    butterfly: &dyn Butterfly<T>,
    twiddles: &StageTwiddles<T>,
    block: &mut [T],
    m: usize,
) {
    if m < 2 {
        return;
    }
    let mut scratch = [(T::zero(), T::zero()); MAX_PRIME_RADIX - 1];
    let running = &mut scratch[..twiddles.width()];
    twiddles.start(running);
    for k1 in 1..m {
        if k1 > 1 {
            twiddles.advance(running, k1);
        }
        apply_twiddles(block, k1, m, running);
        butterfly.apply(block, k1, m);
    }
}

/// Offsets `1..M` written out one by one, for a sub-size known when the plan is built.
macro_rules! unrolled_offsets {
    ($butterfly:expr, $table:expr, $block:expr, $m:literal; $($k1:literal),+) => {{
        let width = $table.len() / ($m - 1);
        $(
            apply_twiddles($block, $k1, $m, &$table[($k1 - 1) * width..$k1 * width]);
            $butterfly.apply($block, $k1, $m);
        )+
    }};
}

fn unrolled<T: Element>(butterfly: &dyn Butterfly<T>, table: &[(T, T)], block: &mut [T], m: usize) {
    match m {
        0 | 1 => {}
        2 => unrolled_offsets!(butterfly, table, block, 2; 1),
        3 => unrolled_offsets!(butterfly, table, block, 3; 1, 2),
        4 => unrolled_offsets!(butterfly, table, block, 4; 1, 2, 3),
        5 => unrolled_offsets!(butterfly, table, block, 5; 1, 2, 3, 4),
        6 => unrolled_offsets!(butterfly, table, block, 6; 1, 2, 3, 4, 5),
        7 => unrolled_offsets!(butterfly, table, block, 7; 1, 2, 3, 4, 5, 6),
        8 => unrolled_offsets!(butterfly, table, block, 8; 1, 2, 3, 4, 5, 6, 7),
        _ => {
            let width = table.len() / (m - 1);
            for (k1, row) in (1..m).zip(table.chunks_exact(width)) {
                apply_twiddles(block, k1, m, row);
                butterfly.apply(block, k1, m);
            }
        }
    }
}
