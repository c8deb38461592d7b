use super::{zip_rows, zip_same_shape};
use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Element-wise `a + b` for tensors of identical shape.
pub fn add_op<T: NeuroFloat>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_same_shape(a, b, "add_op", |x, y| x + y)
}

/// `x + row` with `row` broadcast along the leading batch axis.
pub fn add_rows_op<T: NeuroFloat>(x: &Tensor<T>, row: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_rows(x, row, "add_rows_op", |a, b| a + b)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
