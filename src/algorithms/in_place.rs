//! In-place decimation in time.
//!
//! After the digit-reversal permutation, the `K` sub-transforms of every stage sit in
//! contiguous blocks. The recursion transforms each block, then combines them where they
//! lie, so no second buffer is ever needed.
use crate::algorithms::combine::combine;
use crate::algorithms::decompose::Stage;
use crate::options::Options;
use crate::parallel::for_each_block;
use crate::planner::Element;

/// Transforms `data`, already digit-reversed, through `stages`.
pub(crate) fn transform<T: Element>(stages: &[Stage<T>], data: &mut [T], options: &Options) {
    let Some((stage, children)) = stages.split_first() else {
        return;
    };

    if !children.is_empty() {
        let parallel = options.parallel && stage.len >= options.parallel_threshold;
        for_each_block(parallel, data, 2 * stage.m, &|_, block: &mut [T]| {
            transform(children, block, options)
        });
    }
    combine(stage, data);
}
