//! # Reductions
//!
//! Two axes matter to the layers: the leading batch axis (bias gradients
//! sum over it) and the last feature axis (softmax and the losses reduce
//! each row). Row reductions keep the reduced axis with size 1 so the
//! result lines up with its source row by row.

pub mod max;
pub mod mean;
pub mod sum;

pub use max::row_max_op;
pub use mean::mean_all_op;
pub use sum::{row_sum_op, sum_all_op, sum_rows_op};

/// Shape of a row reduction: the last axis collapsed to 1.
pub(crate) fn keepdim_row_shape(shape: &[usize]) -> Vec<usize> {
    let mut out = shape.to_vec();
    match out.last_mut() {
        Some(last) => *last = 1,
        None => out.push(1),
    }
    out
}
