// Linear algebra operations: matrix multiplication and transposition of 2-D tensors.

pub mod matmul;
pub mod transpose;

pub use matmul::matmul_op;
pub use transpose::transpose_op;
