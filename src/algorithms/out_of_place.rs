//! Out-of-place decimation in time.
//!
//! The source is never written. Each level reads its sub-transform `j` starting at
//! `offset + j * stride` with stride `stride * K`, and writes it to block `j` of the
//! destination. The stride accumulates across levels, so the terminal butterflies gather
//! their points straight from the source and no permutation pass is needed.
use crate::algorithms::combine::combine;
use crate::algorithms::decompose::Stage;
use crate::kernels::{load, store};
use crate::options::Options;
use crate::parallel::for_each_block;
use crate::planner::Element;

/// Transforms the points of `src` at `offset, offset + stride_0, ...` into `dst`.
pub(crate) fn transform<T: Element>(
    stages: &[Stage<T>],
    src: &[T],
    offset: usize,
    dst: &mut [T],
    options: &Options,
) {
    let Some((stage, children)) = stages.split_first() else {
        let (re, im) = load(src, offset);
        store(dst, 0, re, im);
        return;
    };

    if stage.is_terminal() {
        for j in 0..stage.radix {
            let (re, im) = load(src, offset + j * stage.src_stride);
            store(dst, j, re, im);
        }
    } else {
        let parallel = options.parallel && stage.len >= options.parallel_threshold;
        for_each_block(parallel, dst, 2 * stage.m, &|j, block: &mut [T]| {
            transform(children, src, offset + j * stage.src_stride, block, options)
        });
    }
    combine(stage, dst);
}
