use crate::error::NeurogradError;
use crate::nn::module::{Loss, Module};
use crate::nn::registry::{build_module, AnyModule, ModuleConfig};
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;
use log::debug;
use std::collections::BTreeMap;

/// An ordered chain of modules.
///
/// `forward` feeds each module's output to the next; `backward` runs the
/// modules in reverse order, so the gradient handed to it is the one the
/// last module expects (a one-element scale when the chain ends in a loss).
///
/// A failed `forward` leaves the modules before the failing one waiting
/// for their backward call; call [`Module::reset`] before reusing the chain.
/// An empty chain has nothing to run: both passes fail with `InvalidSequence`.
#[derive(Debug, Clone)]
pub struct Sequential<T: NeuroFloat = f32> {
    modules: Vec<AnyModule<T>>,
    named_modules: BTreeMap<String, usize>,
}

impl<T: NeuroFloat> Default for Sequential<T> {
    fn default() -> Self {
        Sequential {
            modules: Vec::new(),
            named_modules: BTreeMap::new(),
        }
    }
}

impl<T: NeuroFloat> Sequential<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append of an unnamed module.
    pub fn with<M: Into<AnyModule<T>>>(mut self, module: M) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Appends a module reachable by `name` through [`Sequential::get`].
    pub fn add_module<M: Into<AnyModule<T>>>(&mut self, name: &str, module: M) {
        let index = self.modules.len();
        self.modules.push(module.into());
        self.named_modules.insert(name.to_string(), index);
    }

    /// Builds the module registered as `kind` and appends it under `name`.
    pub fn add_from_registry(
        &mut self,
        name: &str,
        kind: &str,
        config: &ModuleConfig<T>,
    ) -> Result<(), NeurogradError> {
        let module = build_module(kind, config)?;
        self.add_module(name, module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AnyModule<T>> {
        self.named_modules.get(name).and_then(|&i| self.modules.get(i))
    }

    pub fn modules(&self) -> &[AnyModule<T>] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn require_modules(&self, operation: &str) -> Result<(), NeurogradError> {
        if self.modules.is_empty() {
            return Err(NeurogradError::InvalidSequence {
                module: "sequential".to_string(),
                operation: operation.to_string(),
                reason: "the sequence has no modules".to_string(),
            });
        }
        Ok(())
    }

    fn terminal_loss(&mut self) -> Result<&mut dyn Loss<T>, NeurogradError> {
        self.modules
            .last_mut()
            .and_then(|m| m.as_loss_mut())
            .ok_or_else(|| NeurogradError::InvalidArgument("the last module of the sequence is not a loss".to_string()))
    }
}

impl<T: NeuroFloat> Module<T> for Sequential<T> {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.require_modules("forward")?;
        let mut current = input.clone();
        for module in &mut self.modules {
            current = module.forward(&current)?;
        }
        debug!("Sequential: forward through {} modules -> {:?}", self.modules.len(), current.shape());
        Ok(current)
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        self.require_modules("backward")?;
        let mut grad = grad_output.clone();
        for module in self.modules.iter_mut().rev() {
            grad = module.backward(&grad)?;
        }
        Ok(grad)
    }

    fn reset(&mut self) {
        for module in &mut self.modules {
            module.reset();
        }
    }
}

impl<T: NeuroFloat> Loss<T> for Sequential<T> {
    /// Sets the target of the terminal loss module.
    ///
    /// # Errors
    /// `InvalidArgument` if the sequence does not end in a loss.
    fn set_target(&mut self, target: Tensor<T>) -> Result<(), NeurogradError> {
        self.terminal_loss()?.set_target(target)
    }

    fn loss(&self) -> Option<T> {
        self.modules.last().and_then(|m| m.as_loss()).and_then(|l| l.loss())
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
