//! Terminal modules turning a prediction and a target into a scalar loss.
//!
//! All losses share [`LossLayer`]: `forward` checks the prediction against
//! the stored target, evaluates the loss and the unscaled input gradient
//! through a [`LossFn`], caches the gradient and returns the prediction
//! unchanged. `backward` multiplies the cached gradient by the incoming
//! one-element scale.

use crate::error::NeurogradError;
use crate::nn::cache::ForwardCache;
use crate::nn::module::{loss_scale, Loss, Module};
use crate::ops::arithmetic::scale_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use log::debug;
use std::fmt::Debug;
use std::marker::PhantomData;

pub mod crossent;
pub mod l2;
pub mod softmax_crossent;

pub use crossent::CrossEntFn;
pub use l2::L2Fn;
pub use softmax_crossent::SoftmaxCrossEntFn;

pub type CrossEnt<T = f32> = LossLayer<T, CrossEntFn>;
pub type L2<T = f32> = LossLayer<T, L2Fn>;
pub type SoftmaxCrossEnt<T = f32> = LossLayer<T, SoftmaxCrossEntFn>;

/// The value and input gradient of one loss formula.
pub trait LossFn: Debug + Clone + Default + Send + 'static {
    const NAME: &'static str;

    /// Returns the scalar loss and its gradient w.r.t. `x` for a unit scale.
    /// `x` and `t` are guaranteed to have the same shape.
    fn evaluate<T: NeuroFloat>(x: &Tensor<T>, t: &Tensor<T>) -> Result<(T, Tensor<T>), NeurogradError>;
}

/// Number of rows along the leading batch axes.
pub(crate) fn batch_rows<T: NeuroFloat>(x: &Tensor<T>) -> usize {
    x.numel() / x.features().max(1)
}

#[derive(Debug, Clone)]
pub struct LossLayer<T, F: LossFn> {
    target: Option<Tensor<T>>,
    loss: Option<T>,
    cache: ForwardCache<Tensor<T>>,
    _marker: PhantomData<F>,
}

impl<T: NeuroFloat, F: LossFn> LossLayer<T, F> {
    pub fn new() -> Self {
        LossLayer {
            target: None,
            loss: None,
            cache: ForwardCache::new(F::NAME),
            _marker: PhantomData,
        }
    }

    pub fn target(&self) -> Option<&Tensor<T>> {
        self.target.as_ref()
    }
}

impl<T: NeuroFloat, F: LossFn> Default for LossLayer<T, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NeuroFloat, F: LossFn> Module<T> for LossLayer<T, F> {
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.cache.check_forward()?;
        let target = self.target.as_ref().ok_or_else(|| NeurogradError::InvalidSequence {
            module: F::NAME.to_string(),
            operation: "forward".to_string(),
            reason: "called before set_target".to_string(),
        })?;
        check_same_shape(target.shape(), input.shape(), F::NAME)?;

        let (loss, grad) = F::evaluate(input, target)?;
        debug!("{}: forward {:?}, loss = {:?}", F::NAME, input.shape(), loss);
        self.loss = Some(loss);
        self.cache.store(grad);
        Ok(input.clone())
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let grad = self.cache.cached()?;
        let scale = loss_scale(grad_output, F::NAME)?;
        let grad_input = scale_op(grad, scale);
        debug!("{}: backward, scale = {:?}", F::NAME, scale);
        self.cache.finish_backward();
        Ok(grad_input)
    }

    /// Discards the cached gradient and loss value. The target is kept.
    fn reset(&mut self) {
        self.cache.reset();
        self.loss = None;
    }
}

impl<T: NeuroFloat, F: LossFn> Loss<T> for LossLayer<T, F> {
    fn set_target(&mut self, target: Tensor<T>) -> Result<(), NeurogradError> {
        self.target = Some(target);
        Ok(())
    }

    fn loss(&self) -> Option<T> {
        self.loss
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
