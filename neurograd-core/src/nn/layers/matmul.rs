use crate::error::NeurogradError;
use crate::nn::cache::ForwardCache;
use crate::nn::module::Module;
use crate::nn::slot::{lock_slot, SharedSlot};
use crate::ops::linalg::{matmul_op, transpose_op};
use crate::ops::traits::NeuroFloat;
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use log::debug;

/// Name of the weight parameter in the slot.
pub const WEIGHT: &str = "w";

/// Multiplies its `[batch, in]` input by a learnable `[in, out]` weight `w`.
///
/// Backward reports `xᵗ · grad` for `w` and returns `grad · wᵗ`.
#[derive(Debug, Clone)]
pub struct MatMul<T: NeuroFloat = f32> {
    slot: SharedSlot<T>,
    cache: ForwardCache<Tensor<T>>,
}

impl<T: NeuroFloat> MatMul<T> {
    /// # Errors
    /// `UnknownParameter` if the slot has no `w`, `ShapeMismatch` if `w` is not 2-D.
    pub fn new(slot: SharedSlot<T>) -> Result<Self, NeurogradError> {
        {
            let guard = lock_slot(&slot, "MatMul::new")?;
            let w = guard.val(WEIGHT)?;
            if w.rank() != 2 {
                return Err(NeurogradError::shape_mismatch(&[0, 0], w.shape(), "matmul (weight must be 2-D)"));
            }
        }
        Ok(MatMul {
            slot,
            cache: ForwardCache::new("matmul"),
        })
    }

    pub fn slot(&self) -> &SharedSlot<T> {
        &self.slot
    }
}

impl<T: NeuroFloat> Module<T> for MatMul<T> {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.cache.check_forward()?;
        let w = lock_slot(&self.slot, "matmul forward")?.val(WEIGHT)?;
        let output = matmul_op(input, &w)?;
        debug!("MatMul: forward {:?} x {:?}", input.shape(), w.shape());
        self.cache.store(input.clone());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let x = self.cache.cached()?;
        let mut slot = lock_slot(&self.slot, "matmul backward")?;
        let w = slot.val(WEIGHT)?;
        check_same_shape(&[x.batch_size(), w.features()], grad_output.shape(), "matmul backward")?;

        // Input gradient first: a failure must not leave a half-reported step.
        let grad_input = matmul_op(grad_output, &transpose_op(&w)?)?;
        slot.set_grad(WEIGHT, &|| matmul_op(&transpose_op(x)?, grad_output))?;
        drop(slot);

        debug!("MatMul: backward {:?} -> {:?}", grad_output.shape(), grad_input.shape());
        self.cache.finish_backward();
        Ok(grad_input)
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
