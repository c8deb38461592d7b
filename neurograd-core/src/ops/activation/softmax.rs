use crate::error::NeurogradError;
use crate::ops::arithmetic::{div_cols_op, sub_cols_op};
use crate::ops::math_elem::{exp_op, ln_op};
use crate::ops::reduction::{row_max_op, row_sum_op};
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Row-wise log-softmax: `z - ln Σ exp z` with `z = x - rowmax(x)`.
///
/// Subtracting the row maximum first keeps `exp` from overflowing, so the
/// result is the same for any constant shift of a row.
///
/// # Errors
/// `ShapeMismatch` for rank-0 input or empty rows.
pub fn log_softmax_op<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    if x.rank() == 0 || x.features() == 0 {
        return Err(NeurogradError::shape_mismatch(&[1, 1], x.shape(), "log_softmax_op"));
    }
    let z = sub_cols_op(x, &row_max_op(x)?)?;
    let log_sum = ln_op(&row_sum_op(&exp_op(&z))?);
    sub_cols_op(&z, &log_sum)
}

/// Row-wise softmax: each row is exponentiated after subtracting its max and normalised to sum to 1.
pub fn softmax_op<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    if x.rank() == 0 || x.features() == 0 {
        return Err(NeurogradError::shape_mismatch(&[1, 1], x.shape(), "softmax_op"));
    }
    let e = exp_op(&sub_cols_op(x, &row_max_op(x)?)?);
    div_cols_op(&e, &row_sum_op(&e)?)
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
