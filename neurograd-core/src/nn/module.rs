use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// The forward/backward contract every layer implements.
///
/// A module is one stage of a differentiable pipeline. `forward` computes
/// the output and caches whatever the module's own backward rule needs;
/// `backward` takes the gradient of the final scalar loss w.r.t. that
/// output and returns the gradient w.r.t. the input. Modules owning
/// parameters also report the parameter gradients to their
/// [`Slot`](crate::nn::slot::Slot) during `backward`.
///
/// Calls must alternate `forward`, `backward`, `forward`, … on an instance.
/// Any other order fails with [`NeurogradError::InvalidSequence`].
pub trait Module<T: NeuroFloat>: Debug + Send {
    /// Registry name of the module variant (e.g. `"matmul"`).
    fn name(&self) -> &'static str;

    /// Performs the forward pass and caches the state needed by `backward`.
    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError>;

    /// Maps the gradient w.r.t. the output to the gradient w.r.t. the input,
    /// consuming the state cached by the preceding `forward`.
    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError>;

    /// Discards any cached forward state, returning the module to its freshly constructed state.
    ///
    /// Use this to run a forward pass that will never be followed by a
    /// backward pass (inference), or to abandon a half-finished pass.
    fn reset(&mut self);
}

/// A terminal module that turns a prediction and a target into a scalar objective.
///
/// `forward` returns the prediction unchanged and stores the loss value;
/// `backward` seeds the gradient chain from that stored state. The
/// gradient passed to `backward` must hold a single element: it scales
/// the seed (use [`Loss::backward_seed`] for a scale of one).
pub trait Loss<T: NeuroFloat>: Module<T> {
    /// Stores the target used by the next `forward`.
    fn set_target(&mut self, target: Tensor<T>) -> Result<(), NeurogradError>;

    /// The loss computed by the most recent `forward`, if any.
    fn loss(&self) -> Option<T>;

    /// Runs `backward` with a unit scale.
    fn backward_seed(&mut self) -> Result<Tensor<T>, NeurogradError> {
        self.backward(&Tensor::scalar(T::one()))
    }
}

/// Reads the single scaling element of a loss's incoming gradient.
pub(crate) fn loss_scale<T: NeuroFloat>(grad: &Tensor<T>, module: &str) -> Result<T, NeurogradError> {
    grad.item().map_err(|_| NeurogradError::ShapeMismatch {
        expected: vec![1],
        actual: grad.shape().to_vec(),
        operation: format!("{} backward (incoming gradient must hold one element)", module),
    })
}
