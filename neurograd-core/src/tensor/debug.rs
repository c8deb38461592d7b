// src/tensor/debug.rs
use crate::tensor::Tensor;
use std::fmt;

const PREVIEW_LEN: usize = 8;

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(shape={:?}, data=", self.shape)?;
        if self.data.len() <= PREVIEW_LEN {
            write!(f, "{:?}", self.data)?;
        } else {
            write!(
                f,
                "{:?} ... ({} elements)",
                &self.data[..PREVIEW_LEN],
                self.data.len()
            )?;
        }
        write!(f, ")")
    }
}
