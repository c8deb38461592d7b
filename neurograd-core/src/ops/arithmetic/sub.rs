use super::{zip_cols, zip_same_shape};
use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Element-wise `a - b` for tensors of identical shape.
pub fn sub_op<T: NeuroFloat>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_same_shape(a, b, "sub_op", |x, y| x - y)
}

/// `x - col` where `col` holds one value per row of `x` (shape `[.., 1]`).
pub fn sub_cols_op<T: NeuroFloat>(x: &Tensor<T>, col: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    zip_cols(x, col, "sub_cols_op", |a, c| a - c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_basic() {
        let a = Tensor::new(vec![5.0f64, 7.0], vec![1, 2]).unwrap();
        let b = Tensor::new(vec![1.5f64, 10.0], vec![1, 2]).unwrap();
        assert_eq!(sub_op(&a, &b).unwrap().data(), &[3.5, -3.0]);
        assert!(sub_op(&a, &b.reshape(&[2]).unwrap()).is_err());
    }

    #[test]
    fn test_sub_cols() {
        let x = Tensor::new(vec![1.0f64, 2.0, 3.0, 10.0, 20.0, 30.0], vec![2, 3]).unwrap();
        let col = Tensor::new(vec![1.0f64, 10.0], vec![2, 1]).unwrap();
        assert_eq!(sub_cols_op(&x, &col).unwrap().data(), &[0.0, 1.0, 2.0, 0.0, 10.0, 20.0]);
        // A row vector is not a column.
        let row = Tensor::new(vec![1.0f64, 10.0, 0.0], vec![1, 3]).unwrap();
        assert!(matches!(sub_cols_op(&x, &row), Err(NeurogradError::ShapeMismatch { .. })));
    }
}
