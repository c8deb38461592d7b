use super::keepdim_row_shape;
use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Maximum of each row, keeping the feature axis with size 1.
///
/// # Errors
/// `ShapeMismatch` if rows are empty (no maximum exists).
pub fn row_max_op<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    if x.features() == 0 {
        return Err(NeurogradError::shape_mismatch(&[1], x.shape(), "row_max_op (empty rows)"));
    }
    let data = x
        .rows()
        .map(|row| row.iter().fold(T::neg_infinity(), |m, &v| m.max(v)))
        .collect();
    Tensor::new(data, keepdim_row_shape(x.shape()))
}
