use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Applies the Rectified Linear Unit element-wise: `max(0, x)`.
pub fn relu_op<T: NeuroFloat>(x: &Tensor<T>) -> Tensor<T> {
    x.map(|v| if v > T::zero() { v } else { T::zero() })
}
