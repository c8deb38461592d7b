//! Gradient verification.
//!
//! Differentiation itself is manual: every module implements its own
//! backward rule. This module checks those rules numerically.

pub mod grad_check;

pub use grad_check::{
    check_input_grad, check_loss_input_grad, check_loss_param_grad, check_param_grad, GradCheckError,
};
