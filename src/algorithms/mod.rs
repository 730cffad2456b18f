//! Recursive decimation-in-time FFT
//!
//! A transform of length `N = K * M` splits its input into `K` sub-sequences by residue
//! modulo `K`, transforms each with the same procedure at length `M`, and combines the
//! results with one radix-`K` butterfly per offset.
//!
//! ## Modules
//!
//! - `decompose`: walks the factor list and builds the stage chain
//! - `combine`: the radix-`K` combine step, looped or unrolled
//! - `permute`: digit reversal for the in-place variant
//! - `in_place` / `out_of_place`: the two traversals of the stage chain
pub(crate) mod combine;
pub(crate) mod decompose;
pub(crate) mod in_place;
pub(crate) mod out_of_place;
pub(crate) mod permute;
