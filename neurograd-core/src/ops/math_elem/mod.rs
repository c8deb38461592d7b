// Element-wise math functions.

use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Element-wise natural exponential.
pub fn exp_op<T: NeuroFloat>(x: &Tensor<T>) -> Tensor<T> {
    x.map(|v| v.exp())
}

/// Element-wise natural logarithm. Non-positive inputs yield `-inf`/`NaN`.
pub fn ln_op<T: NeuroFloat>(x: &Tensor<T>) -> Tensor<T> {
    x.map(|v| v.ln())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exp_ln_inverse() {
        let x = Tensor::new(vec![0.5f64, 1.0, 2.0], vec![3]).unwrap();
        let back = ln_op(&exp_op(&x));
        for (a, b) in back.data().iter().zip(x.data().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ln_zero_is_neg_infinity() {
        let x = Tensor::new(vec![0.0f32], vec![1]).unwrap();
        assert_eq!(ln_op(&x).data()[0], f32::NEG_INFINITY);
    }
}
