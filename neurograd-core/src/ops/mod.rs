//! # Tensor Operations Module (`ops`)
//!
//! The numeric capability the layers are built on. Every operation here is
//! a plain function over [`Tensor`](crate::tensor::Tensor) values named
//! `xxx_op`; none of them record anything for differentiation. Gradients
//! are derived by hand in [`crate::nn`], one module at a time.
//!
//! ## Submodules
//!
//! - [`arithmetic`]: element-wise add/sub/mul/div and leading-batch-axis row broadcasting.
//! - [`linalg`]: matmul and transpose of 2-D tensors.
//! - [`reduction`]: sums, means and maxima over the batch or feature axis.
//! - [`math_elem`]: element-wise `exp` and `ln`.
//! - [`activation`]: forward kernels for relu, sigmoid and (log-)softmax.
//! - [`traits`]: the [`NeuroFloat`](traits::NeuroFloat) element bound.

pub mod traits;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;
