//! # Arithmetic Operations
//!
//! Element-wise arithmetic on tensors of identical shape, plus the one
//! broadcasting rule the layers need: a single row (`[f]` or `[1, f]`)
//! applied to every row of a `[.., f]` tensor along the leading batch axis.
//! Its transpose, one value per row (the `[.., 1]` output of a row
//! reduction) applied across that row's features, is what the row-wise
//! softmax kernels need. Anything else is a `ShapeMismatch`; nothing
//! broadcasts silently.

use crate::error::NeurogradError;
use crate::ops::reduction::keepdim_row_shape;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

pub mod add;
pub mod div;
pub mod mul;
pub mod sub;

pub use add::{add_op, add_rows_op};
pub use div::{div_cols_op, div_op};
pub use mul::{mul_op, mul_rows_op, scale_op};
pub use sub::{sub_cols_op, sub_op};

/// Applies `f` pairwise to two tensors of identical shape.
pub(crate) fn zip_same_shape<T, F>(
    a: &Tensor<T>,
    b: &Tensor<T>,
    operation: &str,
    f: F,
) -> Result<Tensor<T>, NeurogradError>
where
    T: NeuroFloat,
    F: Fn(T, T) -> T,
{
    if a.shape() != b.shape() {
        return Err(NeurogradError::shape_mismatch(a.shape(), b.shape(), operation));
    }
    let data = a
        .data()
        .iter()
        .zip(b.data().iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Tensor::new(data, a.shape().to_vec())
}

/// Returns true if `row` can be broadcast across the batch rows of `x`.
pub(crate) fn is_row_of<T: NeuroFloat>(x: &Tensor<T>, row: &Tensor<T>) -> bool {
    let f = x.features();
    match row.shape() {
        [n] => *n == f,
        [1, n] => *n == f && x.rank() >= 1,
        _ => false,
    }
}

/// Applies `f(x_elem, row_elem)` with `row` repeated over every row of `x`.
pub(crate) fn zip_rows<T, F>(
    x: &Tensor<T>,
    row: &Tensor<T>,
    operation: &str,
    f: F,
) -> Result<Tensor<T>, NeurogradError>
where
    T: NeuroFloat,
    F: Fn(T, T) -> T,
{
    if x.rank() == 0 || !is_row_of(x, row) {
        return Err(NeurogradError::shape_mismatch(&[1, x.features()], row.shape(), operation));
    }
    let r = row.data();
    let f = &f;
    let data = x
        .rows()
        .flat_map(|x_row| x_row.iter().zip(r.iter()).map(move |(&a, &b)| f(a, b)))
        .collect();
    Tensor::new(data, x.shape().to_vec())
}

/// Applies `f(x_elem, col_elem)` with `col[i]` repeated across row `i` of `x`.
///
/// `col` must have the shape of a row reduction of `x` (last axis collapsed to 1).
pub(crate) fn zip_cols<T, F>(
    x: &Tensor<T>,
    col: &Tensor<T>,
    operation: &str,
    f: F,
) -> Result<Tensor<T>, NeurogradError>
where
    T: NeuroFloat,
    F: Fn(T, T) -> T,
{
    let expected = keepdim_row_shape(x.shape());
    if x.rank() == 0 || col.shape() != expected.as_slice() {
        return Err(NeurogradError::shape_mismatch(&expected, col.shape(), operation));
    }
    let f = &f;
    let data = x
        .rows()
        .zip(col.data().iter())
        .flat_map(|(x_row, &c)| x_row.iter().map(move |&a| f(a, c)))
        .collect();
    Tensor::new(data, x.shape().to_vec())
}
