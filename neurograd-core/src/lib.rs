//! A small neural-network layer library with hand-derived backward passes.
//!
//! Each layer implements [`nn::Module`]: `forward` computes the output and
//! caches what the layer's own derivative rule needs, `backward` maps the
//! gradient w.r.t. the output to the gradient w.r.t. the input. Layers with
//! learnable arrays read them from, and report their gradients to, an
//! injected [`nn::Slot`]. There is no expression graph; a network is an
//! ordered [`model::Sequential`] chain run forward, then backward in reverse.

pub mod autograd;
pub mod model;
pub mod nn;
pub mod ops;
pub mod tensor;

pub mod utils;

pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
pub use ops::traits::NeuroFloat;

pub mod error;
pub use error::NeurogradError;
