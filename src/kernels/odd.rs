//! Odd prime butterflies.
//!
//! All of them pair inputs `j` and `p - j`: with `w^(jk) = c + i*s`,
//! `x_j * w^(jk) + x_(p-j) * w^(-jk) = c * (x_j + x_(p-j)) + i*s * (x_j - x_(p-j))`,
//! so outputs `k` and `p - k` share everything except the sign of the imaginary half.
use num_traits::Float;

use crate::kernels::{load, store, MAX_PRIME_RADIX};

#[inline(always)]
fn add<T: Float>(a: (T, T), b: (T, T)) -> (T, T) {
    (a.0 + b.0, a.1 + b.1)
}

#[inline(always)]
fn sub<T: Float>(a: (T, T), b: (T, T)) -> (T, T) {
    (a.0 - b.0, a.1 - b.1)
}

#[inline(always)]
fn scale<T: Float>(a: (T, T), by: T) -> (T, T) {
    (a.0 * by, a.1 * by)
}

/// `i * a`
#[inline(always)]
fn times_i<T: Float>(a: (T, T)) -> (T, T) {
    (-a.1, a.0)
}

/// Radix-3 butterfly for `w = c + i*s`, the primitive third root of the direction.
pub fn butterfly_3<T: Float>(data: &mut [T], offset: usize, stride: usize, w: (T, T)) {
    let u0 = load(data, offset);
    let u1 = load(data, offset + stride);
    let u2 = load(data, offset + 2 * stride);

    let xp = add(u1, u2);
    let xn = sub(u1, u2);

    let real_half = add(u0, scale(xp, w.0));
    let imag_half = times_i(scale(xn, w.1));

    store(data, offset, u0.0 + xp.0, u0.1 + xp.1);
    let y1 = add(real_half, imag_half);
    let y2 = sub(real_half, imag_half);
    store(data, offset + stride, y1.0, y1.1);
    store(data, offset + 2 * stride, y2.0, y2.1);
}

/// Radix-5 butterfly for `w1 = w` and `w2 = w^2`.
pub fn butterfly_5<T: Float>(
    data: &mut [T],
    offset: usize,
    stride: usize,
    w1: (T, T),
    w2: (T, T),
) {
    let u: [(T, T); 5] = std::array::from_fn(|j| load(data, offset + j * stride));

    let a1 = add(u[1], u[4]);
    let b1 = sub(u[1], u[4]);
    let a2 = add(u[2], u[3]);
    let b2 = sub(u[2], u[3]);

    // w^4 = conj(w1), w^6 = w1
    let real_1 = add(u[0], add(scale(a1, w1.0), scale(a2, w2.0)));
    let imag_1 = times_i(add(scale(b1, w1.1), scale(b2, w2.1)));
    let real_2 = add(u[0], add(scale(a1, w2.0), scale(a2, w1.0)));
    let imag_2 = times_i(sub(scale(b1, w2.1), scale(b2, w1.1)));

    let y0 = add(u[0], add(a1, a2));
    let y1 = add(real_1, imag_1);
    let y4 = sub(real_1, imag_1);
    let y2 = add(real_2, imag_2);
    let y3 = sub(real_2, imag_2);

    for (j, y) in [y0, y1, y2, y3, y4].into_iter().enumerate() {
        store(data, offset + j * stride, y.0, y.1);
    }
}

/// Direct DFT of an odd prime size `p = powers.len()`, where `powers[t] = w^t`.
///
/// `p` is at most [`MAX_PRIME_RADIX`].
pub fn butterfly_prime<T: Float>(data: &mut [T], offset: usize, stride: usize, powers: &[(T, T)]) {
    let p = powers.len();
    let half = p / 2;
    debug_assert!(half <= MAX_PRIME_RADIX / 2);
    let u0 = load(data, offset);

    let mut sums = [(T::zero(), T::zero()); MAX_PRIME_RADIX / 2];
    let mut diffs = [(T::zero(), T::zero()); MAX_PRIME_RADIX / 2];
    let mut y0 = u0;
    for j in 1..=half {
        let x = load(data, offset + j * stride);
        let x_mirror = load(data, offset + (p - j) * stride);
        sums[j - 1] = add(x, x_mirror);
        diffs[j - 1] = sub(x, x_mirror);
        y0 = add(y0, add(x, x_mirror));
    }

    store(data, offset, y0.0, y0.1);
    for k in 1..=half {
        let mut real_half = u0;
        let mut imag_sum = (T::zero(), T::zero());
        for j in 1..=half {
            let (c, s) = powers[(j * k) % p];
            real_half = add(real_half, scale(sums[j - 1], c));
            imag_sum = add(imag_sum, scale(diffs[j - 1], s));
        }
        let imag_half = times_i(imag_sum);
        let yk = add(real_half, imag_half);
        let ym = sub(real_half, imag_half);
        store(data, offset + k * stride, yk.0, yk.1);
        store(data, offset + (p - k) * stride, ym.0, ym.1);
    }
}
