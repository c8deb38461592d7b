// src/tensor/mod.rs

use crate::error::NeurogradError;
use crate::ops::traits::NeuroFloat;
use utils::checked_numel;

pub mod create;
mod debug;
pub mod utils;

// Re-export creation functions to make them public
pub use create::{full, ones, ones_like, zeros, zeros_like};

/// A dense, row-major, CPU tensor.
///
/// Unlike a graph-tracking tensor, a `Tensor` here is plain data: it owns
/// its buffer, and cloning it copies the values. Modules rely on this to
/// keep exclusive copies of whatever they cache during `forward`.
///
/// Most of the library works on 2-D `[batch, features]` tensors; the
/// "row" operations treat the last axis as the feature axis and every
/// leading axis as batch.
#[derive(Clone, PartialEq)]
pub struct Tensor<T = f32> {
    pub(crate) data: Vec<T>,
    pub(crate) shape: Vec<usize>,
}

impl<T: NeuroFloat> Tensor<T> {
    /// Creates a new tensor from row-major data and a shape.
    ///
    /// # Errors
    /// Returns `NeurogradError::TensorCreationError` if `data.len()` does not
    /// match the number of elements implied by `shape`, or if that number
    /// overflows `usize`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, NeurogradError> {
        if checked_numel(&shape) != Some(data.len()) {
            return Err(NeurogradError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Tensor {
            data: vec![value],
            shape: Vec::new(),
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Borrows the row-major element buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the tensor and returns its element buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Size of the last axis (the feature axis). Rank-0 tensors count as one feature.
    pub fn features(&self) -> usize {
        self.shape.last().copied().unwrap_or(1)
    }

    /// Size of the leading (batch) axis. Rank-0 tensors count as a batch of one.
    pub fn batch_size(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    /// Returns the single value of a one-element tensor.
    ///
    /// # Errors
    /// `ShapeMismatch` if the tensor holds anything other than exactly one element.
    pub fn item(&self) -> Result<T, NeurogradError> {
        match self.data.as_slice() {
            [value] => Ok(*value),
            _ => Err(NeurogradError::shape_mismatch(&[1], &self.shape, "item")),
        }
    }

    /// Returns a copy of the tensor with a new shape. Values are copied bit for bit.
    ///
    /// # Errors
    /// `ShapeMismatch` if the element counts differ (an overflowing target count never matches).
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, NeurogradError> {
        if checked_numel(shape) != Some(self.numel()) {
            return Err(NeurogradError::shape_mismatch(shape, &self.shape, "reshape"));
        }
        Ok(Tensor {
            data: self.data.clone(),
            shape: shape.to_vec(),
        })
    }

    /// Applies `f` to every element, producing a tensor of the same shape.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Iterates over rows (contiguous chunks of the last axis).
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.features().max(1))
    }

    /// Approximate equality used by tests and the gradient checker.
    pub fn all_close(&self, other: &Self, tolerance: T) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= tolerance)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
