use super::{zip_cols, zip_same_shape};
use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Element-wise `a / b` for tensors of identical shape.
///
/// Division by zero follows IEEE semantics; callers that can hit it add an
/// epsilon to the denominator first.
pub fn div_op<T: NeuroFloat>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_same_shape(a, b, "div_op", |x, y| x / y)
}

/// `x / col` where `col` holds one value per row of `x` (shape `[.., 1]`).
pub fn div_cols_op<T: NeuroFloat>(x: &Tensor<T>, col: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_cols(x, col, "div_cols_op", |a, c| a / c)
}
