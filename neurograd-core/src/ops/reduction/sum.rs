use super::keepdim_row_shape;
use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Sums all rows together (reduction over every leading axis), giving `[features]`.
pub fn sum_rows_op<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    let f = x.features();
    let mut acc = vec![T::zero(); f];
    for row in x.rows() {
        for (a, &v) in acc.iter_mut().zip(row.iter()) {
            *a += v;
        }
    }
    Tensor::new(acc, vec![f])
}

/// Sums each row, keeping the feature axis with size 1 (`[n, f]` -> `[n, 1]`).
pub fn row_sum_op<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    let data = x
        .rows()
        .map(|row| row.iter().fold(T::zero(), |acc, &v| acc + v))
        .collect();
    Tensor::new(data, keepdim_row_shape(x.shape()))
}

/// Sum of every element.
pub fn sum_all_op<T: NeuroFloat>(x: &Tensor<T>) -> T {
    x.data().iter().fold(T::zero(), |acc, &v| acc + v)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
