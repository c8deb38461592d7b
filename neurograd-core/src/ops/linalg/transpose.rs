use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Transposes a 2-D tensor, materialising the result row-major.
pub fn transpose_op<T: NeuroFloat>(a: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    let (rows, cols) = match a.shape() {
        [r, c] => (*r, *c),
        other => return Err(NeurogradError::shape_mismatch(&[0, 0], other, "transpose_op (must be 2-D)")),
    };
    let src = a.data();
    let mut out = Vec::with_capacity(src.len());
    for j in 0..cols {
        for i in 0..rows {
            out.push(src[i * cols + j]);
        }
    }
    Tensor::new(out, vec![cols, rows])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_2x3() {
        let a = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
        let t = transpose_op(&a).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(transpose_op(&t).unwrap(), a);
    }

    #[test]
    fn test_transpose_rejects_rank_3() {
        let a = Tensor::new(vec![0.0f32; 8], vec![2, 2, 2]).unwrap();
        assert!(transpose_op(&a).is_err());
    }
}
