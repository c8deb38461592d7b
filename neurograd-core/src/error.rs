use thiserror::Error;

/// Custom error type for the neurograd layer library.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NeurogradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Unknown module type: {0}")]
    UnknownModuleType(String),

    #[error("Unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// A forward/backward call arrived out of order on a module instance.
    /// Always a bug in the code driving the modules, never transient.
    #[error("Invalid call sequence on module '{module}': {operation} {reason}")]
    InvalidSequence {
        module: String,
        operation: String,
        reason: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },
}

impl NeurogradError {
    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        NeurogradError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            operation: operation.to_string(),
        }
    }
}
