use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Applies the logistic function element-wise: `1 / (1 + exp(-x))`.
pub fn sigmoid_op<T: NeuroFloat>(x: &Tensor<T>) -> Tensor<T> {
    x.map(|v| T::one() / (T::one() + (-v).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid_values() {
        let x = Tensor::new(vec![0.0f64, 2.0, -2.0], vec![3]).unwrap();
        let y = sigmoid_op(&x);
        assert_relative_eq!(y.data()[0], 0.5);
        assert_relative_eq!(y.data()[1], 0.8807970779778823, epsilon = 1e-12);
        assert_relative_eq!(y.data()[1] + y.data()[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_saturates_without_nan() {
        let x = Tensor::new(vec![-1000.0f32, 1000.0], vec![2]).unwrap();
        let y = sigmoid_op(&x);
        assert_eq!(y.data(), &[0.0, 1.0]);
    }
}
