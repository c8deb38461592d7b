use super::{zip_rows, zip_same_shape};
use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Element-wise (Hadamard) product of two tensors of identical shape.
pub fn mul_op<T: NeuroFloat>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_same_shape(a, b, "mul_op", |x, y| x * y)
}

/// `x * row` with `row` broadcast along the leading batch axis.
pub fn mul_rows_op<T: NeuroFloat>(x: &Tensor<T>, row: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_rows(x, row, "mul_rows_op", |a, b| a * b)
}

/// Multiplies every element by a scalar.
pub fn scale_op<T: NeuroFloat>(x: &Tensor<T>, factor: T) -> Tensor<T> {
    x.map(|v| v * factor)
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
