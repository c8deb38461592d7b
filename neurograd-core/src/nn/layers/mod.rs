// src/nn/layers/mod.rs
// Non-loss layers: shape, activations, dropout and the parameterized ones.

pub mod activation;
pub mod add_biases;
pub mod dropout;
pub mod matmul;
pub mod reshape;

pub use activation::{Activation, ActivationFn, IdentityFn, Linear, Relu, ReluFn, Sigmoid, SigmoidFn, Softmax, SoftmaxFn};
pub use add_biases::AddBiases;
pub use dropout::{Dropout, DEFAULT_KEEP_PROB};
pub use matmul::MatMul;
pub use reshape::Reshape;
