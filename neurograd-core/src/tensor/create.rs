// src/tensor/create.rs

use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use crate::tensor::utils::checked_numel;
use crate::tensor::Tensor;
use rand::distributions::Bernoulli;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new tensor filled with zeros with the specified shape.
///
/// # Errors
/// `TensorCreationError` if the element count of `shape` overflows `usize`.
pub fn zeros<T: NeuroFloat>(shape: &[usize]) -> Result<Tensor<T>, NeurogradError> {
    full(shape, T::zero())
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones<T: NeuroFloat>(shape: &[usize]) -> Result<Tensor<T>, NeurogradError> {
    full(shape, T::one())
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full<T: NeuroFloat>(shape: &[usize], value: T) -> Result<Tensor<T>, NeurogradError> {
    let numel = numel_for(shape)?;
    Ok(Tensor {
        data: vec![value; numel],
        shape: shape.to_vec(),
    })
}

/// Creates a zero tensor with the same shape as `tensor`.
pub fn zeros_like<T: NeuroFloat>(tensor: &Tensor<T>) -> Tensor<T> {
    tensor.map(|_| T::zero())
}

/// Creates a tensor of ones with the same shape as `tensor`.
pub fn ones_like<T: NeuroFloat>(tensor: &Tensor<T>) -> Tensor<T> {
    tensor.map(|_| T::one())
}

// Element count of a shape a creation helper is about to allocate.
fn numel_for(shape: &[usize]) -> Result<usize, NeurogradError> {
    checked_numel(shape).ok_or_else(|| NeurogradError::TensorCreationError {
        data_len: 0,
        shape: shape.to_vec(),
    })
}

/// Samples a tensor from `N(0, std²)` using the caller's random source.
///
/// # Errors
/// `TensorCreationError` if the element count of `shape` overflows `usize`.
pub fn randn_with<T, R>(shape: &[usize], std: T, rng: &mut R) -> Result<Tensor<T>, NeurogradError>
where
    T: NeuroFloat,
    R: Rng + ?Sized,
{
    let numel = numel_for(shape)?;
    let data = (0..numel)
        .map(|_| {
            let z: f64 = StandardNormal.sample(&mut *rng);
            T::from_f64(z) * std
        })
        .collect();
    Ok(Tensor {
        data,
        shape: shape.to_vec(),
    })
}

/// Draws a 0/1 tensor where each element is 1 with probability `p`.
///
/// # Errors
/// `InvalidArgument` if `p` is not a probability, `TensorCreationError` if the
/// element count of `shape` overflows `usize`.
pub fn bernoulli_with<T, R>(shape: &[usize], p: f64, rng: &mut R) -> Result<Tensor<T>, NeurogradError>
where
    T: NeuroFloat,
    R: Rng + ?Sized,
{
    let dist = Bernoulli::new(p).map_err(|e| {
        NeurogradError::InvalidArgument(format!("Bernoulli probability {}: {}", p, e))
    })?;
    let numel = numel_for(shape)?;
    let data = (0..numel)
        .map(|_| if dist.sample(&mut *rng) { T::one() } else { T::zero() })
        .collect();
    Ok(Tensor {
        data,
        shape: shape.to_vec(),
    })
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
