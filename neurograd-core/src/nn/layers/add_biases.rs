use crate::error::NeurogradError;
use crate::nn::cache::ForwardCache;
use crate::nn::module::Module;
use crate::nn::slot::{lock_slot, SharedSlot};
use crate::ops::arithmetic::add_rows_op;
use crate::ops::reduction::sum_rows_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use log::debug;

/// Name of the bias parameter in the slot.
pub const BIAS: &str = "b";

#[derive(Debug, Clone)]
struct BiasState {
    input_shape: Vec<usize>,
    bias_shape: Vec<usize>,
}

/// Adds a learnable bias row `b` to every row of its input.
///
/// `b` lives in the slot with shape `[features]` or `[1, features]`.
/// The bias gradient is the batch-sum of the incoming gradient; the input
/// gradient is the incoming gradient unchanged.
#[derive(Debug, Clone)]
pub struct AddBiases<T: NeuroFloat = f32> {
    slot: SharedSlot<T>,
    cache: ForwardCache<BiasState>,
}

impl<T: NeuroFloat> AddBiases<T> {
    /// # Errors
    /// `UnknownParameter` if the slot has no `b`, `ShapeMismatch` if `b` is not a row.
    pub fn new(slot: SharedSlot<T>) -> Result<Self, NeurogradError> {
        {
            let guard = lock_slot(&slot, "AddBiases::new")?;
            let b = guard.val(BIAS)?;
            if !matches!(b.shape(), [_] | [1, _]) {
                return Err(NeurogradError::shape_mismatch(
                    &[1, b.features()],
                    b.shape(),
                    "add_biases (bias must be [f] or [1, f])",
                ));
            }
        }
        Ok(AddBiases {
            slot,
            cache: ForwardCache::new("add_biases"),
        })
    }

    pub fn slot(&self) -> &SharedSlot<T> {
        &self.slot
    }
}

impl<T: NeuroFloat> Module<T> for AddBiases<T> {
    fn name(&self) -> &'static str {
        "add_biases"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.cache.check_forward()?;
        let b = lock_slot(&self.slot, "add_biases forward")?.val(BIAS)?;
        let output = add_rows_op(input, &b)?;
        debug!("AddBiases: forward {:?} + {:?}", input.shape(), b.shape());
        self.cache.store(BiasState {
            input_shape: input.shape().to_vec(),
            bias_shape: b.shape().to_vec(),
        });
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let state = self.cache.cached()?;
        check_same_shape(&state.input_shape, grad_output.shape(), "add_biases backward")?;
        lock_slot(&self.slot, "add_biases backward")?.set_grad(BIAS, &|| {
            sum_rows_op(grad_output)?.reshape(&state.bias_shape)
        })?;
        debug!("AddBiases: backward {:?}", grad_output.shape());
        self.cache.finish_backward();
        Ok(grad_output.clone())
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[cfg(test)]
#[path = "add_biases_test.rs"]
mod tests;
