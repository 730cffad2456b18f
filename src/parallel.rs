//! Utilities for parallelism

/// Runs the two specified closures in parallel,
/// if and only if `parallel` is set to `true` and the `parallel` feature is enabled
#[allow(unused_variables)] // when `parallel` feature is disabled, the variable is ignored
pub fn run_maybe_in_parallel<A, B, RA, RB>(parallel: bool, oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            rayon::join(oper_a, oper_b)
        } else {
            (oper_a(), oper_b())
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        (oper_a(), oper_b())
    }
}

/// Calls `f(index, block)` for every `block_len`-sized block of `data`.
///
/// With `parallel` set, the blocks are split in halves recursively and the halves run on
/// the rayon pool. Blocks are disjoint, so the result does not depend on the schedule.
pub fn for_each_block<T, F>(parallel: bool, data: &mut [T], block_len: usize, f: &F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    for_each_block_from(parallel, data, block_len, 0, f);
}

fn for_each_block_from<T, F>(parallel: bool, data: &mut [T], block_len: usize, first: usize, f: &F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    let blocks = data.len() / block_len;
    if !parallel || blocks < 2 {
        data.chunks_exact_mut(block_len)
            .enumerate()
            .for_each(|(i, block)| f(first + i, block));
        return;
    }

    let half = blocks / 2;
    let (left, right) = data.split_at_mut(half * block_len);
    run_maybe_in_parallel(
        parallel,
        || for_each_block_from(parallel, left, block_len, first, f),
        || for_each_block_from(parallel, right, block_len, first + half, f),
    );
}
