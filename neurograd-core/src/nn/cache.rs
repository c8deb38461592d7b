//! Single-slot cache holding what a module's backward step needs.
//!
//! Each module instance owns one [`ForwardCache`]. It moves through
//! `Uninitialized -> ForwardDone -> BackwardDone -> ForwardDone -> ...`;
//! only `forward` moves it to `ForwardDone` (from `Uninitialized` or
//! `BackwardDone`) and only `backward` moves it to `BackwardDone` (from
//! `ForwardDone`). Every other transition is an `InvalidSequence` error.

use crate::error::NeurogradError;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheState<S> {
    Uninitialized,
    ForwardDone(S),
    BackwardDone,
}

#[derive(Debug, Clone)]
pub struct ForwardCache<S> {
    module: &'static str,
    state: CacheState<S>,
}

impl<S> ForwardCache<S> {
    pub fn new(module: &'static str) -> Self {
        ForwardCache {
            module,
            state: CacheState::Uninitialized,
        }
    }

    pub fn state(&self) -> &CacheState<S> {
        &self.state
    }

    /// True while a forward result is waiting for its backward call.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, CacheState::ForwardDone(_))
    }

    /// Fails unless a forward call is allowed now.
    pub fn check_forward(&self) -> Result<(), NeurogradError> {
        match self.state {
            CacheState::ForwardDone(_) => Err(self.sequence_error(
                "forward",
                "called twice without an intervening backward",
            )),
            CacheState::Uninitialized | CacheState::BackwardDone => Ok(()),
        }
    }

    /// Records the state captured by a forward call. Call [`check_forward`](Self::check_forward) first.
    pub fn store(&mut self, value: S) {
        self.state = CacheState::ForwardDone(value);
    }

    /// Borrows the cached state for a backward call without consuming it.
    pub fn cached(&self) -> Result<&S, NeurogradError> {
        match &self.state {
            CacheState::ForwardDone(value) => Ok(value),
            CacheState::Uninitialized => Err(self.sequence_error("backward", "called before any forward")),
            CacheState::BackwardDone => Err(self.sequence_error(
                "backward",
                "called twice without an intervening forward",
            )),
        }
    }

    /// Marks the pending forward state as consumed.
    pub fn finish_backward(&mut self) {
        if self.is_pending() {
            self.state = CacheState::BackwardDone;
        }
    }

    /// Takes ownership of the cached state, completing the backward transition.
    pub fn take(&mut self) -> Result<S, NeurogradError> {
        self.cached()?;
        match std::mem::replace(&mut self.state, CacheState::BackwardDone) {
            CacheState::ForwardDone(value) => Ok(value),
            // cached() above guarantees ForwardDone
            _ => Err(self.sequence_error("backward", "called before any forward")),
        }
    }

    pub fn reset(&mut self) {
        self.state = CacheState::Uninitialized;
    }

    fn sequence_error(&self, operation: &str, reason: &str) -> NeurogradError {
        NeurogradError::InvalidSequence {
            module: self.module.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
