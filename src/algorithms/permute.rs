//! Mixed-radix digit reversal
//!
//! Decimation in time splits the input by residue: at the outermost stage, sub-transform `j`
//! reads the points `j, j + K, j + 2K, ...`. The in-place variant moves every point to the
//! block it is read from before any butterfly runs, so each level of the recursion works on
//! `K` contiguous blocks of `M` points.
//!
//! For radices `r_0, r_1, ...` (outermost first), point `i = d_0 + r_0 * (d_1 + r_1 * (...))`
//! moves to `d_0 * M_0 + d_1 * M_1 + ...` with `M_l` the product of the radices after `l`.
use crate::kernels::{load, store};

/// A precomputed digit-reversal permutation, applied by cycle following.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DigitReversal {
    /// `source[p]` is the point that lands at position `p`
    source: Vec<usize>,
    /// Smallest position of every cycle longer than one
    leaders: Vec<usize>,
}

impl DigitReversal {
    pub fn new(radices: &[usize]) -> Self {
        let n: usize = radices.iter().product();
        let mut source = vec![0; n];
        for i in 0..n {
            source[destination(i, radices)] = i;
        }

        let mut visited = vec![false; n];
        let mut leaders = Vec::new();
        for start in 0..n {
            if visited[start] || source[start] == start {
                continue;
            }
            leaders.push(start);
            let mut p = start;
            while !visited[p] {
                visited[p] = true;
                p = source[p];
            }
        }

        Self { source, leaders }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Reorders the complex points of an interleaved buffer.
    pub fn apply<T: Copy>(&self, data: &mut [T]) {
        debug_assert_eq!(data.len(), 2 * self.len());
        for &start in &self.leaders {
            let (save_re, save_im) = load(data, start);
            let mut p = start;
            loop {
                let q = self.source[p];
                if q == start {
                    store(data, p, save_re, save_im);
                    break;
                }
                let (re, im) = load(data, q);
                store(data, p, re, im);
                p = q;
            }
        }
    }
}

fn destination(mut i: usize, radices: &[usize]) -> usize {
    let mut block = radices.iter().product::<usize>();
    let mut position = 0;
    for &radix in radices {
        block /= radix;
        position += (i % radix) * block;
        i /= radix;
    }
    position
}
