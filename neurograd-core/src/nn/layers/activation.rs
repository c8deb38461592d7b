//! Element-wise and row-wise activations sharing one forward/backward skeleton.
//!
//! An [`Activation`] computes its output with [`ActivationFn::transform`],
//! caches it, and on backward multiplies the incoming gradient by the local
//! Jacobian expressed in terms of that cached output.

use crate::error::NeurogradError;
use crate::nn::cache::ForwardCache;
use crate::nn::module::Module;
use crate::ops::activation::{relu_op, sigmoid_op, softmax_op};
use crate::ops::arithmetic::{mul_op, sub_cols_op};
use crate::ops::reduction::row_sum_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use log::debug;
use std::fmt::Debug;
use std::marker::PhantomData;

/// The forward transform and Jacobian-vector product of one activation.
pub trait ActivationFn: Debug + Clone + Default + Send + 'static {
    const NAME: &'static str;

    fn transform<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError>;

    /// Gradient w.r.t. the input, given the cached activation `a` and an
    /// output gradient of the same shape.
    fn grad<T: NeuroFloat>(a: &Tensor<T>, grad: &Tensor<T>) -> Result<Tensor<T>, NeurogradError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SigmoidFn;

impl ActivationFn for SigmoidFn {
    const NAME: &'static str = "sigmoid";

    fn transform<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        Ok(sigmoid_op(x))
    }

    fn grad<T: NeuroFloat>(a: &Tensor<T>, grad: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let local = a.map(|v| v * (T::one() - v));
        mul_op(grad, &local)
    }
}

/// Identity activation (registered as `linear`).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFn;

impl ActivationFn for IdentityFn {
    const NAME: &'static str = "linear";

    fn transform<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        Ok(x.clone())
    }

    fn grad<T: NeuroFloat>(_a: &Tensor<T>, grad: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        Ok(grad.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReluFn;

impl ActivationFn for ReluFn {
    const NAME: &'static str = "relu";

    fn transform<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        Ok(relu_op(x))
    }

    // Subgradient at 0 is 0.
    fn grad<T: NeuroFloat>(a: &Tensor<T>, grad: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let mask = a.map(|v| if v > T::zero() { T::one() } else { T::zero() });
        mul_op(grad, &mask)
    }
}

/// Row-wise softmax over the last axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftmaxFn;

impl ActivationFn for SoftmaxFn {
    const NAME: &'static str = "softmax";

    fn transform<T: NeuroFloat>(x: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        softmax_op(x)
    }

    fn grad<T: NeuroFloat>(a: &Tensor<T>, grad: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        // (g - Σ_row a ⊙ g) ⊙ a, row by row.
        let m = row_sum_op(&mul_op(a, grad)?)?;
        mul_op(&sub_cols_op(grad, &m)?, a)
    }
}

/// A parameter-free activation layer.
#[derive(Debug, Clone)]
pub struct Activation<T, F: ActivationFn> {
    cache: ForwardCache<Tensor<T>>,
    _marker: PhantomData<F>,
}

pub type Sigmoid<T = f32> = Activation<T, SigmoidFn>;
pub type Linear<T = f32> = Activation<T, IdentityFn>;
pub type Relu<T = f32> = Activation<T, ReluFn>;
pub type Softmax<T = f32> = Activation<T, SoftmaxFn>;

impl<T: NeuroFloat, F: ActivationFn> Activation<T, F> {
    pub fn new() -> Self {
        Activation {
            cache: ForwardCache::new(F::NAME),
            _marker: PhantomData,
        }
    }

    /// The output of the pending forward call, if any.
    pub fn activation(&self) -> Option<&Tensor<T>> {
        self.cache.cached().ok()
    }
}

impl<T: NeuroFloat, F: ActivationFn> Default for Activation<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NeuroFloat, F: ActivationFn> Module<T> for Activation<T, F> {
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.cache.check_forward()?;
        let activation = F::transform(input)?;
        debug!("{}: forward {:?}", F::NAME, input.shape());
        self.cache.store(activation.clone());
        Ok(activation)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let activation = self.cache.cached()?;
        check_same_shape(activation.shape(), grad_output.shape(), F::NAME)?;
        let grad_input = F::grad(activation, grad_output)?;
        debug!("{}: backward {:?}", F::NAME, grad_output.shape());
        self.cache.finish_backward();
        Ok(grad_input)
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
