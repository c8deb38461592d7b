use crate::error::NeurogradError;
use crate::nn::cache::ForwardCache;
use crate::nn::module::Module;
use crate::ops::traits::NeuroFloat;
use crate::tensor::utils::infer_shape;
use crate::tensor::Tensor;
use log::debug;
use std::marker::PhantomData;

/// Reinterprets its input in a fixed target shape without touching the values.
///
/// The target may contain one `-1` dimension, inferred from the element count.
#[derive(Debug, Clone)]
pub struct Reshape<T = f32> {
    target: Vec<isize>,
    cache: ForwardCache<Vec<usize>>,
    _marker: PhantomData<T>,
}

impl<T: NeuroFloat> Reshape<T> {
    /// Creates a reshape layer.
    ///
    /// # Errors
    /// `InvalidArgument` if `target` holds more than one `-1` or any other negative dimension.
    pub fn new(target: &[isize]) -> Result<Self, NeurogradError> {
        if target.iter().filter(|&&d| d == -1).count() > 1 || target.iter().any(|&d| d < -1) {
            return Err(NeurogradError::InvalidArgument(format!(
                "invalid reshape target {:?}",
                target
            )));
        }
        Ok(Reshape {
            target: target.to_vec(),
            cache: ForwardCache::new("reshape"),
            _marker: PhantomData,
        })
    }

    pub fn target(&self) -> &[isize] {
        &self.target
    }
}

impl<T: NeuroFloat> Module<T> for Reshape<T> {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.cache.check_forward()?;
        let shape = infer_shape(&self.target, input.numel())?;
        let output = input.reshape(&shape)?;
        debug!("Reshape: {:?} -> {:?}", input.shape(), shape);
        self.cache.store(input.shape().to_vec());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let grad_input = grad_output.reshape(self.cache.cached()?)?;
        self.cache.finish_backward();
        Ok(grad_input)
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
