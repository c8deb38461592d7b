//! # Activation Functions
//!
//! Pure forward kernels for the activation modules in [`crate::nn::layers`].
//! The modules cache these outputs and apply the matching local Jacobian
//! during their own backward step.

pub mod relu;
pub mod sigmoid;
pub mod softmax;

pub use relu::relu_op;
pub use sigmoid::sigmoid_op;
pub use softmax::{log_softmax_op, softmax_op};
