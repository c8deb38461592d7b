use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

use super::sum::sum_all_op;

/// Mean of every element.
///
/// # Errors
/// `ShapeMismatch` for an empty tensor.
pub fn mean_all_op<T: NeuroFloat>(x: &Tensor<T>) -> Result<T, NeurogradError> {
    if x.numel() == 0 {
        return Err(NeurogradError::shape_mismatch(&[1], x.shape(), "mean_all_op (empty tensor)"));
    }
    Ok(sum_all_op(x) / T::from_usize(x.numel()))
}
