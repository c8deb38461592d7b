use num_traits::{Float, NumAssignOps};
use std::fmt::Debug;

/// Element types usable in neurograd tensors and modules.
///
/// Strictly floating point (`f32`, `f64`): every backward rule relies on
/// `exp`, `ln` and division, so integer tensors are never meaningful here.
pub trait NeuroFloat:
    Float // Num + Copy + NumCast + PartialOrd, exp/ln/max
    + NumAssignOps
    + Debug
    + Default
    + Send
    + Sync
    + 'static
{
    /// Converts an `f64` constant into `Self`.
    ///
    /// Every constant used by the library (`0.5`, `1e-10`, …) is
    /// representable in both `f32` and `f64`, so the cast cannot fail for
    /// the two implementors.
    fn from_f64(value: f64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Converts a count (batch size, element count) into `Self`.
    fn from_usize(value: usize) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::nan)
    }
}

impl NeuroFloat for f32 {}
impl NeuroFloat for f64 {}
