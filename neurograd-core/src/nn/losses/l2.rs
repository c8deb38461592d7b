use super::LossFn;
use crate::error::NeurogradError;
use crate::ops::arithmetic::{scale_op, sub_op};
use crate::ops::reduction::mean_all_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Squared error: `loss = mean((x - t)²)`, gradient `2 · (x - t)`.
///
/// The gradient is not divided by the element count; it is the per-element
/// derivative of the squared difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct L2Fn;

impl LossFn for L2Fn {
    const NAME: &'static str = "l2";

    fn evaluate<T: NeuroFloat>(x: &Tensor<T>, t: &Tensor<T>) -> Result<(T, Tensor<T>), NeurogradError> {
        let diff = sub_op(x, t)?;
        let loss = mean_all_op(&diff.map(|d| d * d))?;
        let two = T::one() + T::one();
        Ok((loss, scale_op(&diff, two)))
    }
}

#[cfg(test)]
#[path = "l2_test.rs"]
mod tests;
