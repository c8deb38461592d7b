use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Matrix product of `a` `[m, k]` and `b` `[k, n]`, giving `[m, n]`.
///
/// # Errors
/// `ShapeMismatch` if either operand is not 2-D or the inner dimensions differ.
pub fn matmul_op<T: NeuroFloat>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
    let (m, k) = match a.shape() {
        [m, k] => (*m, *k),
        other => return Err(NeurogradError::shape_mismatch(&[0, 0], other, "matmul_op (lhs must be 2-D)")),
    };
    let (k2, n) = match b.shape() {
        [k2, n] => (*k2, *n),
        other => return Err(NeurogradError::shape_mismatch(&[k, 0], other, "matmul_op (rhs must be 2-D)")),
    };
    if k != k2 {
        return Err(NeurogradError::shape_mismatch(&[k, n], b.shape(), "matmul_op (inner dimensions)"));
    }

    let a_data = a.data();
    let b_data = b.data();
    let mut out = vec![T::zero(); m * n];
    // i-p-j order keeps both the b row and the output row contiguous.
    for i in 0..m {
        let out_row = &mut out[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a_data[i * k + p];
            let b_row = &b_data[p * n..(p + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row.iter()) {
                *o += a_ip * b_pj;
            }
        }
    }
    Tensor::new(out, vec![m, n])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
