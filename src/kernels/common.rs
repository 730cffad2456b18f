//! Power-of-two butterflies
//!
//! Each kernel transforms the `radix` complex points at `offset + j * stride` of an
//! interleaved buffer, in place.
use num_traits::Float;

use crate::kernels::{load, store};
use crate::twiddles::rotate;

/// Radix-2 butterfly: `(x0 + x1, x0 - x1)`
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
pub fn butterfly_2<T: Float>(data: &mut [T], offset: usize, stride: usize) {
    let (z0_re, z0_im) = load(data, offset);
    let (z1_re, z1_im) = load(data, offset + stride);

    store(data, offset, z0_re + z1_re, z0_im + z1_im);
    store(data, offset + stride, z0_re - z1_re, z0_im - z1_im);
}

/// Radix-4 butterfly.
///
/// `rot` is the imaginary part of the primitive fourth root of the transform direction:
/// `-1` forward, `+1` inverse.
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
pub fn butterfly_4<T: Float>(data: &mut [T], offset: usize, stride: usize, rot: T) {
    let x = [
        load(data, offset),
        load(data, offset + stride),
        load(data, offset + 2 * stride),
        load(data, offset + 3 * stride),
    ];
    let y = dft_4(x, rot);
    for (j, (re, im)) in y.into_iter().enumerate() {
        store(data, offset + j * stride, re, im);
    }
}

/// Radix-8 butterfly, split into two radix-4 halves.
///
/// `w` holds the first four powers of the primitive eighth root.
pub fn butterfly_8<T: Float>(
    data: &mut [T],
    offset: usize,
    stride: usize,
    w: &[(T, T); 4],
    rot: T,
) {
    let at = |j: usize| load(data, offset + j * stride);
    let evens = dft_4([at(0), at(2), at(4), at(6)], rot);
    let odds = dft_4([at(1), at(3), at(5), at(7)], rot);

    for k in 0..4 {
        let (e_re, e_im) = evens[k];
        let (o_re, o_im) = if k == 0 {
            odds[0]
        } else {
            rotate(odds[k].0, odds[k].1, w[k].0, w[k].1)
        };
        store(data, offset + k * stride, e_re + o_re, e_im + o_im);
        store(data, offset + (k + 4) * stride, e_re - o_re, e_im - o_im);
    }
}

#[inline(always)]
fn dft_4<T: Float>(x: [(T, T); 4], rot: T) -> [(T, T); 4] {
    let t0 = (x[0].0 + x[2].0, x[0].1 + x[2].1);
    let t1 = (x[0].0 - x[2].0, x[0].1 - x[2].1);
    let t2 = (x[1].0 + x[3].0, x[1].1 + x[3].1);
    let t3 = (x[1].0 - x[3].0, x[1].1 - x[3].1);
    // i * rot * t3
    let r = (-rot * t3.1, rot * t3.0);

    [
        (t0.0 + t2.0, t0.1 + t2.1),
        (t1.0 + r.0, t1.1 + r.1),
        (t0.0 - t2.0, t0.1 - t2.1),
        (t1.0 - r.0, t1.1 - r.1),
    ]
}
