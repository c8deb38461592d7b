//! Parameter storage for modules with learnable arrays.
//!
//! A [`Slot`] is injected into a parameterized module at construction. The
//! module reads parameters with [`Slot::val`] during `forward`/`backward`
//! and reports exactly one gradient per parameter per `backward` through
//! [`Slot::set_grad`], which accumulates it. Callers clear accumulators
//! between training steps with [`Slot::zero_grad`].

use crate::error::NeurogradError;
use crate::ops::arithmetic::add_op;
use crate::ops::traits::NeuroFloat;
use crate::tensor::create::randn_with;
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use log::trace;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lazily evaluated gradient handed to [`Slot::set_grad`].
pub type GradFn<'a, T> = &'a dyn Fn() -> Result<Tensor<T>, NeurogradError>;

pub trait Slot<T: NeuroFloat>: Debug {
    /// Returns a copy of the named parameter.
    ///
    /// # Errors
    /// `UnknownParameter` if the slot has no parameter with that name.
    fn val(&self, name: &str) -> Result<Tensor<T>, NeurogradError>;

    /// Evaluates `grad_fn` and adds the result to the named gradient accumulator.
    ///
    /// # Errors
    /// `UnknownParameter` if the name is absent, `ShapeMismatch` if the
    /// gradient's shape differs from the parameter's, or any error from `grad_fn`.
    fn set_grad(&mut self, name: &str, grad_fn: GradFn<'_, T>) -> Result<(), NeurogradError>;

    /// The accumulated gradient of the named parameter (`None` when nothing was accumulated yet).
    fn grad(&self, name: &str) -> Result<Option<Tensor<T>>, NeurogradError>;

    /// Replaces the value of an existing parameter, keeping its shape.
    fn set_val(&mut self, name: &str, value: Tensor<T>) -> Result<(), NeurogradError>;

    /// Clears every gradient accumulator.
    fn zero_grad(&mut self);
}

/// A slot shared between the module that owns it and the code that
/// inspects or updates its parameters.
///
/// All access goes through the mutex, so several module instances on
/// separate threads may accumulate into the same slot.
pub type SharedSlot<T> = Arc<Mutex<dyn Slot<T> + Send>>;

/// Wraps a slot implementation into a [`SharedSlot`].
pub fn shared<T, S>(slot: S) -> SharedSlot<T>
where
    T: NeuroFloat,
    S: Slot<T> + Send + 'static,
{
    Arc::new(Mutex::new(slot))
}

/// Locks a shared slot, mapping a poisoned mutex to `LockError`.
pub fn lock_slot<'a, T: NeuroFloat>(
    slot: &'a SharedSlot<T>,
    operation: &str,
) -> Result<MutexGuard<'a, dyn Slot<T> + Send + 'static>, NeurogradError> {
    slot.lock().map_err(|e| NeurogradError::LockError {
        lock_type: "slot mutex".to_string(),
        reason: format!("{} failed: {}", operation, e),
    })
}

#[derive(Debug, Clone)]
struct ParamEntry<T> {
    value: Tensor<T>,
    grad: Option<Tensor<T>>,
}

/// In-memory [`Slot`] keyed by parameter name.
#[derive(Debug, Clone)]
pub struct ParamSlot<T> {
    params: BTreeMap<String, ParamEntry<T>>,
}

impl<T: NeuroFloat> Default for ParamSlot<T> {
    fn default() -> Self {
        ParamSlot {
            params: BTreeMap::new(),
        }
    }
}

impl<T: NeuroFloat> ParamSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_param(mut self, name: &str, value: Tensor<T>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style insert of a parameter drawn from `N(0, std²)`.
    ///
    /// # Errors
    /// `TensorCreationError` if the element count of `shape` overflows `usize`.
    pub fn with_normal<R: Rng + ?Sized>(
        self,
        name: &str,
        shape: &[usize],
        std: T,
        rng: &mut R,
    ) -> Result<Self, NeurogradError> {
        Ok(self.with_param(name, randn_with(shape, std, rng)?))
    }

    /// Inserts or replaces a parameter (and drops its gradient), returning the previous value.
    pub fn insert(&mut self, name: &str, value: Tensor<T>) -> Option<Tensor<T>> {
        self.params
            .insert(name.to_string(), ParamEntry { value, grad: None })
            .map(|entry| entry.value)
    }

    /// Parameter names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.params.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&ParamEntry<T>, NeurogradError> {
        self.params.get(name).ok_or_else(|| NeurogradError::UnknownParameter {
            name: name.to_string(),
        })
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut ParamEntry<T>, NeurogradError> {
        self.params.get_mut(name).ok_or_else(|| NeurogradError::UnknownParameter {
            name: name.to_string(),
        })
    }
}

impl<T: NeuroFloat> Slot<T> for ParamSlot<T> {
    fn val(&self, name: &str) -> Result<Tensor<T>, NeurogradError> {
        Ok(self.entry(name)?.value.clone())
    }

    fn set_grad(&mut self, name: &str, grad_fn: GradFn<'_, T>) -> Result<(), NeurogradError> {
        let entry = self.entry_mut(name)?;
        let grad = grad_fn()?;
        check_same_shape(entry.value.shape(), grad.shape(), "Slot::set_grad")?;
        trace!("ParamSlot: accumulating gradient {:?} into '{}'", grad.shape(), name);
        entry.grad = Some(match entry.grad.take() {
            Some(existing) => add_op(&existing, &grad)?,
            None => grad,
        });
        Ok(())
    }

    fn grad(&self, name: &str) -> Result<Option<Tensor<T>>, NeurogradError> {
        Ok(self.entry(name)?.grad.clone())
    }

    fn set_val(&mut self, name: &str, value: Tensor<T>) -> Result<(), NeurogradError> {
        let entry = self.entry_mut(name)?;
        check_same_shape(entry.value.shape(), value.shape(), "Slot::set_val")?;
        entry.value = value;
        Ok(())
    }

    fn zero_grad(&mut self) {
        for entry in self.params.values_mut() {
            entry.grad = None;
        }
    }
}

#[cfg(test)]
#[path = "slot_test.rs"]
mod tests;
