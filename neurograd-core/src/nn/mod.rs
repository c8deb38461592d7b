// src/nn/mod.rs
// Modules with hand-written forward/backward passes, their parameter slots and the registry.

pub mod cache;
pub mod layers;
pub mod losses;
pub mod module;
pub mod registry;
pub mod slot;

pub use cache::{CacheState, ForwardCache};
pub use layers::{AddBiases, Dropout, Linear, MatMul, Relu, Reshape, Sigmoid, Softmax};
pub use losses::{CrossEnt, SoftmaxCrossEnt, L2};
pub use module::{Loss, Module};
pub use registry::{build_module, module_types, AnyModule, ModuleConfig, ModuleKind};
pub use slot::{lock_slot, shared, ParamSlot, SharedSlot, Slot};
