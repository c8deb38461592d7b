//! Name-based construction of modules.
//!
//! [`build_module`] resolves a registry name (including the short aliases
//! `bias` and `dot`) to a configured [`AnyModule`], the closed set of
//! module variants this crate provides.

use crate::error::NeurogradError;
use crate::nn::layers::{AddBiases, Dropout, Linear, MatMul, Relu, Reshape, Sigmoid, Softmax, DEFAULT_KEEP_PROB};
use crate::nn::losses::{CrossEnt, SoftmaxCrossEnt, L2};
use crate::nn::module::{Loss, Module};
use crate::nn::slot::SharedSlot;
use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Every name [`build_module`] accepts, aliases included.
const MODULE_TYPES: &[&str] = &[
    "reshape",
    "sigmoid",
    "softmax",
    "drop",
    "linear",
    "relu",
    "bias",
    "add_biases",
    "dot",
    "matmul",
    "crossent",
    "l2",
    "softmax_crossent",
];

pub fn module_types() -> &'static [&'static str] {
    MODULE_TYPES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Reshape,
    Sigmoid,
    Linear,
    Relu,
    Softmax,
    Drop,
    AddBiases,
    MatMul,
    CrossEnt,
    L2,
    SoftmaxCrossEnt,
}

impl ModuleKind {
    /// Canonical registry name.
    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::Reshape => "reshape",
            ModuleKind::Sigmoid => "sigmoid",
            ModuleKind::Linear => "linear",
            ModuleKind::Relu => "relu",
            ModuleKind::Softmax => "softmax",
            ModuleKind::Drop => "drop",
            ModuleKind::AddBiases => "add_biases",
            ModuleKind::MatMul => "matmul",
            ModuleKind::CrossEnt => "crossent",
            ModuleKind::L2 => "l2",
            ModuleKind::SoftmaxCrossEnt => "softmax_crossent",
        }
    }

    pub fn is_loss(self) -> bool {
        matches!(self, ModuleKind::CrossEnt | ModuleKind::L2 | ModuleKind::SoftmaxCrossEnt)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModuleKind {
    type Err = NeurogradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reshape" => Ok(ModuleKind::Reshape),
            "sigmoid" => Ok(ModuleKind::Sigmoid),
            "linear" => Ok(ModuleKind::Linear),
            "relu" => Ok(ModuleKind::Relu),
            "softmax" => Ok(ModuleKind::Softmax),
            "drop" => Ok(ModuleKind::Drop),
            "bias" | "add_biases" => Ok(ModuleKind::AddBiases),
            "dot" | "matmul" => Ok(ModuleKind::MatMul),
            "crossent" => Ok(ModuleKind::CrossEnt),
            "l2" => Ok(ModuleKind::L2),
            "softmax_crossent" => Ok(ModuleKind::SoftmaxCrossEnt),
            _ => Err(NeurogradError::UnknownModuleType(s.to_string())),
        }
    }
}

/// Construction parameters for [`build_module`].
///
/// Only the entries a variant needs are read: `reshape` needs
/// `target_shape`, `matmul`/`add_biases` need `slot`, `drop` reads
/// `keep_prob` (default 0.5) and an optional `seed`.
#[derive(Debug, Clone)]
pub struct ModuleConfig<T: NeuroFloat> {
    pub target_shape: Option<Vec<isize>>,
    pub keep_prob: Option<f64>,
    pub seed: Option<u64>,
    pub slot: Option<SharedSlot<T>>,
}

impl<T: NeuroFloat> Default for ModuleConfig<T> {
    fn default() -> Self {
        ModuleConfig {
            target_shape: None,
            keep_prob: None,
            seed: None,
            slot: None,
        }
    }
}

impl<T: NeuroFloat> ModuleConfig<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_shape(mut self, shape: &[isize]) -> Self {
        self.target_shape = Some(shape.to_vec());
        self
    }

    pub fn keep_prob(mut self, keep_prob: f64) -> Self {
        self.keep_prob = Some(keep_prob);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn slot(mut self, slot: SharedSlot<T>) -> Self {
        self.slot = Some(slot);
        self
    }

    fn require_slot(&self, kind: ModuleKind) -> Result<SharedSlot<T>, NeurogradError> {
        self.slot
            .clone()
            .ok_or_else(|| NeurogradError::InvalidArgument(format!("module '{}' requires a slot", kind)))
    }
}

/// Builds the module registered under `name`.
///
/// # Errors
/// `UnknownModuleType` for unrecognised names, `InvalidArgument` when a
/// required config entry is missing or invalid, plus any construction error
/// of the variant itself (e.g. `UnknownParameter` for a slot lacking `w`).
pub fn build_module<T: NeuroFloat>(name: &str, config: &ModuleConfig<T>) -> Result<AnyModule<T>, NeurogradError> {
    let kind: ModuleKind = name.parse()?;
    debug!("build_module: '{}' -> {}", name, kind);
    let module = match kind {
        ModuleKind::Reshape => {
            let target = config.target_shape.as_deref().ok_or_else(|| {
                NeurogradError::InvalidArgument("module 'reshape' requires a target shape".to_string())
            })?;
            AnyModule::Reshape(Reshape::new(target)?)
        }
        ModuleKind::Sigmoid => AnyModule::Sigmoid(Sigmoid::new()),
        ModuleKind::Linear => AnyModule::Linear(Linear::new()),
        ModuleKind::Relu => AnyModule::Relu(Relu::new()),
        ModuleKind::Softmax => AnyModule::Softmax(Softmax::new()),
        ModuleKind::Drop => {
            let keep_prob = config.keep_prob.unwrap_or(DEFAULT_KEEP_PROB);
            let layer = match config.seed {
                Some(seed) => Dropout::seeded(keep_prob, seed)?,
                None => Dropout::new(keep_prob)?,
            };
            AnyModule::Drop(layer)
        }
        ModuleKind::AddBiases => AnyModule::AddBiases(AddBiases::new(config.require_slot(kind)?)?),
        ModuleKind::MatMul => AnyModule::MatMul(MatMul::new(config.require_slot(kind)?)?),
        ModuleKind::CrossEnt => AnyModule::CrossEnt(CrossEnt::new()),
        ModuleKind::L2 => AnyModule::L2(L2::new()),
        ModuleKind::SoftmaxCrossEnt => AnyModule::SoftmaxCrossEnt(SoftmaxCrossEnt::new()),
    };
    Ok(module)
}

/// The closed set of module variants.
#[derive(Debug, Clone)]
pub enum AnyModule<T: NeuroFloat = f32> {
    Reshape(Reshape<T>),
    Sigmoid(Sigmoid<T>),
    Linear(Linear<T>),
    Relu(Relu<T>),
    Softmax(Softmax<T>),
    Drop(Dropout<T>),
    AddBiases(AddBiases<T>),
    MatMul(MatMul<T>),
    CrossEnt(CrossEnt<T>),
    L2(L2<T>),
    SoftmaxCrossEnt(SoftmaxCrossEnt<T>),
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            AnyModule::Reshape($m) => $body,
            AnyModule::Sigmoid($m) => $body,
            AnyModule::Linear($m) => $body,
            AnyModule::Relu($m) => $body,
            AnyModule::Softmax($m) => $body,
            AnyModule::Drop($m) => $body,
            AnyModule::AddBiases($m) => $body,
            AnyModule::MatMul($m) => $body,
            AnyModule::CrossEnt($m) => $body,
            AnyModule::L2($m) => $body,
            AnyModule::SoftmaxCrossEnt($m) => $body,
        }
    };
}

impl<T: NeuroFloat> AnyModule<T> {
    pub fn kind(&self) -> ModuleKind {
        match self {
            AnyModule::Reshape(_) => ModuleKind::Reshape,
            AnyModule::Sigmoid(_) => ModuleKind::Sigmoid,
            AnyModule::Linear(_) => ModuleKind::Linear,
            AnyModule::Relu(_) => ModuleKind::Relu,
            AnyModule::Softmax(_) => ModuleKind::Softmax,
            AnyModule::Drop(_) => ModuleKind::Drop,
            AnyModule::AddBiases(_) => ModuleKind::AddBiases,
            AnyModule::MatMul(_) => ModuleKind::MatMul,
            AnyModule::CrossEnt(_) => ModuleKind::CrossEnt,
            AnyModule::L2(_) => ModuleKind::L2,
            AnyModule::SoftmaxCrossEnt(_) => ModuleKind::SoftmaxCrossEnt,
        }
    }

    /// The slot of a parameterized variant.
    pub fn slot(&self) -> Option<&SharedSlot<T>> {
        match self {
            AnyModule::AddBiases(m) => Some(m.slot()),
            AnyModule::MatMul(m) => Some(m.slot()),
            _ => None,
        }
    }

    pub fn as_loss_mut(&mut self) -> Option<&mut dyn Loss<T>> {
        match self {
            AnyModule::CrossEnt(m) => Some(m),
            AnyModule::L2(m) => Some(m),
            AnyModule::SoftmaxCrossEnt(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_loss(&self) -> Option<&dyn Loss<T>> {
        match self {
            AnyModule::CrossEnt(m) => Some(m),
            AnyModule::L2(m) => Some(m),
            AnyModule::SoftmaxCrossEnt(m) => Some(m),
            _ => None,
        }
    }
}

impl<T: NeuroFloat> Module<T> for AnyModule<T> {
    fn name(&self) -> &'static str {
        dispatch!(self, m => m.name())
    }

    fn forward(&mut self, input: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        dispatch!(self, m => m.forward(input))
    }

    fn backward(&mut self, grad_output: &Tensor<T>) -> Result<Tensor<T>, NeurogradError> {
        dispatch!(self, m => m.backward(grad_output))
    }

    fn reset(&mut self) {
        dispatch!(self, m => m.reset())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl<T: NeuroFloat> From<$ty> for AnyModule<T> {
                fn from(module: $ty) -> Self {
                    AnyModule::$variant(module)
                }
            }
        )*
    };
}

impl_from_variant!(
    Reshape(Reshape<T>),
    Sigmoid(Sigmoid<T>),
    Linear(Linear<T>),
    Relu(Relu<T>),
    Softmax(Softmax<T>),
    Drop(Dropout<T>),
    AddBiases(AddBiases<T>),
    MatMul(MatMul<T>),
    CrossEnt(CrossEnt<T>),
    L2(L2<T>),
    SoftmaxCrossEnt(SoftmaxCrossEnt<T>),
);

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
