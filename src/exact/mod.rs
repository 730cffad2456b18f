//! Exact arithmetic for roots of unity.
//!
//! Everything here works on [`Decimal`] values: big-integer mantissas scaled by a power
//! of the limb base. Floats only appear when a caller asks for one.
pub mod decimal;
pub mod pi;
pub mod root;
pub mod trig;

pub use decimal::Decimal;
pub use pi::pi;
pub use root::{next_root, Root};
pub use trig::evaluate;

/// Limbs carried below the requested precision while roots are evaluated and propagated
pub(crate) const GUARD_LIMBS: usize = 2;
