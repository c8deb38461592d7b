use super::{batch_rows, LossFn};
use crate::error::NeurogradError;
use crate::ops::arithmetic::{div_op, scale_op};
use crate::ops::math_elem::ln_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;
use log::warn;

/// Added to the prediction in the gradient's denominator.
pub const CROSSENT_EPS: f64 = 1e-10;

/// Cross-entropy on probabilities (e.g. the output of `softmax`).
///
/// `loss = mean_batch(Σ_row -t ⊙ ln x)`, where terms with `t = 0` contribute
/// nothing; the gradient is `-t / (x + ε) / batch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntFn;

impl LossFn for CrossEntFn {
    const NAME: &'static str = "crossent";

    fn evaluate<T: NeuroFloat>(x: &Tensor<T>, t: &Tensor<T>) -> Result<(T, Tensor<T>), NeurogradError> {
        let batch = T::from_usize(batch_rows(x).max(1));
        let eps = T::from_f64(CROSSENT_EPS);

        let log_x = ln_op(x);
        let mut total = T::zero();
        let mut suspicious = 0usize;
        for ((&p, &lp), &target) in x.data().iter().zip(log_x.data().iter()).zip(t.data().iter()) {
            if target != T::zero() {
                if p <= T::zero() {
                    suspicious += 1;
                }
                total -= target * lp;
            }
        }
        if suspicious > 0 {
            warn!(
                "crossent: {} non-positive probabilities under a non-zero target; loss is not finite",
                suspicious
            );
        }
        let grad = scale_op(&div_op(t, &x.map(|p| p + eps))?, -T::one() / batch);
        Ok((total / batch, grad))
    }
}

#[cfg(test)]
#[path = "crossent_test.rs"]
mod tests;
