use super::{batch_rows, LossFn};
use crate::error::NeurogradError;
use crate::ops::activation::log_softmax_op;
use crate::ops::arithmetic::{scale_op, sub_op};
use crate::ops::math_elem::exp_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Softmax followed by cross-entropy, evaluated directly on logits.
///
/// With `z = x - rowmax(x)` and `ls = z - ln Σ exp z`, the loss is
/// `mean_batch(Σ_row -t ⊙ ls)` and the gradient `(exp(ls) - t) / batch`.
/// Working in log space keeps both finite for any logit magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftmaxCrossEntFn;

impl LossFn for SoftmaxCrossEntFn {
    const NAME: &'static str = "softmax_crossent";

    fn evaluate<T: NeuroFloat>(x: &Tensor<T>, t: &Tensor<T>) -> Result<(T, Tensor<T>), NeurogradError> {
        let log_soft = log_softmax_op(x)?;
        let batch = T::from_usize(batch_rows(x).max(1));

        let total = log_soft
            .data()
            .iter()
            .zip(t.data().iter())
            .filter(|(_, target)| **target != T::zero())
            .fold(T::zero(), |acc, (&ls, &target)| acc - target * ls);
        let grad = scale_op(&sub_op(&exp_op(&log_soft), t)?, T::one() / batch);
        Ok((total / batch, grad))
    }
}

#[cfg(test)]
#[path = "softmax_crossent_test.rs"]
mod tests;
