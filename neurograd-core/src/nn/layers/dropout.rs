use crate::error::NeurogradError;
use crate::nn::cache::ForwardCache;
use crate::nn::module::Module;
use crate::ops::arithmetic::{mul_rows_op, scale_op};
use crate::ops::traits::NeuroFloat;
use crate::tensor::create::bernoulli_with;
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Keep probability used when none is configured.
pub const DEFAULT_KEEP_PROB: f64 = 0.5;

#[derive(Debug, Clone)]
struct DropState<T> {
    mask: Tensor<T>,
    input_shape: Vec<usize>,
}

/// Inverted dropout.
///
/// Every forward call draws a fresh keep-mask of shape `[1, features]`
/// (one mask shared by all rows of the batch) and returns
/// `x * mask / keep_prob`, so the expected activation is unchanged.
/// Backward applies the same mask and scale to the gradient.
///
/// The random source is injectable through [`Dropout::with_rng`], which is
/// how tests make the mask deterministic.
#[derive(Debug, Clone)]
pub struct Dropout<T = f32, R = StdRng> {
    keep_prob: f64,
    rng: R,
    cache: ForwardCache<DropState<T>>,
}

impl<T: NeuroFloat> Dropout<T, StdRng> {
    /// Creates a dropout layer seeded from system entropy.
    ///
    /// # Errors
    /// `InvalidArgument` unless `0 < keep_prob <= 1`.
    pub fn new(keep_prob: f64) -> Result<Self, NeurogradError> {
        Self::with_rng(keep_prob, StdRng::from_entropy())
    }

    /// Creates a dropout layer with a reproducible mask sequence.
    pub fn seeded(keep_prob: f64, seed: u64) -> Result<Self, NeurogradError> {
        Self::with_rng(keep_prob, StdRng::seed_from_u64(seed))
    }
}

impl<T: NeuroFloat, R: Rng + Send> Dropout<T, R> {
    pub fn with_rng(keep_prob: f64, rng: R) -> Result<Self, NeurogradError> {
        // NaN fails both comparisons.
        if !(keep_prob > 0.0 && keep_prob <= 1.0) {
            return Err(NeurogradError::InvalidArgument(format!(
                "keep_prob must be in (0, 1], got {}",
                keep_prob
            )));
        }
        Ok(Dropout {
            keep_prob,
            rng,
            cache: ForwardCache::new("drop"),
        })
    }

    pub fn keep_prob(&self) -> f64 {
        self.keep_prob
    }

    /// The mask drawn by the pending forward call, if any.
    pub fn mask(&self) -> Option<&Tensor<T>> {
        self.cache.cached().ok().map(|state| &state.mask)
    }

    fn inv_keep(&self) -> T {
        T::one() / T::from_f64(self.keep_prob)
    }
}

impl<T, R> Module<T> for Dropout<T, R>
where
    T: NeuroFloat,
    R: Rng + Send + std::fmt::Debug,
{
    fn name(&self) -> &'static str {
        "drop"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.cache.check_forward()?;
        if input.rank() == 0 {
            return Err(NeurogradError::shape_mismatch(&[1, 1], input.shape(), "drop"));
        }
        let features = input.features();
        let mask: Tensor<T> = bernoulli_with(&[1, features], self.keep_prob, &mut self.rng)?;
        let output = scale_op(&mul_rows_op(input, &mask)?, self.inv_keep());
        debug!(
            "Dropout: forward {:?}, kept {}/{} features",
            input.shape(),
            mask.data().iter().filter(|&&m| m > T::zero()).count(),
            features
        );
        self.cache.store(DropState {
            mask,
            input_shape: input.shape().to_vec(),
        });
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        let state = self.cache.cached()?;
        check_same_shape(&state.input_shape, grad_output.shape(), "drop")?;
        let grad_input = scale_op(&mul_rows_op(grad_output, &state.mask)?, self.inv_keep());
        self.cache.finish_backward();
        Ok(grad_input)
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[cfg(test)]
#[path = "dropout_test.rs"]
mod tests;
