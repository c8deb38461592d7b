//! Finite-difference verification of hand-derived backward rules.
//!
//! Every check compares an analytical gradient (from `backward`, or from
//! the slot for parameters) with central differences
//! `(L(v + ε) - L(v - ε)) / 2ε` of a scalar objective `L`:
//!
//! * for plain modules, `L = Σ upstream ⊙ forward(x)`, and `backward`
//!   receives `upstream`;
//! * for losses, `L` is the value reported by [`Loss::loss`], and
//!   `backward` receives a unit seed.
//!
//! Checks run in `f64`. Each objective evaluation calls `forward` and then
//! `reset`, so the module is left without a pending forward afterwards.

use crate::error::NeurogradError;
use crate::nn::module::{Loss, Module};
use crate::nn::slot::{lock_slot, SharedSlot};
use crate::tensor::utils::check_same_shape;
use crate::tensor::Tensor;
use approx::{abs_diff_eq, relative_eq};
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for {target} at element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        target: String,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward pass failed during gradient check: {0}")]
    ForwardPassError(NeurogradError),
    #[error("Backward pass failed during gradient check: {0}")]
    BackwardPassError(NeurogradError),
    #[error("Parameter '{name}' received no gradient from backward")]
    MissingAnalyticalGrad { name: String },
    #[error("Numerical gradient is NaN or infinite for {target}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNaNOrInfinite {
        target: String,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for {target}, element {element_index}: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        target: String,
        element_index: usize,
        value: f64,
    },
    #[error("Tensor error during gradient check: {0}")]
    TensorError(NeurogradError),
}

impl From<NeurogradError> for GradCheckError {
    fn from(err: NeurogradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks `module.backward(upstream)` against finite differences w.r.t. `x`.
pub fn check_input_grad<M>(
    module: &mut M,
    x: &Tensor<f64>,
    upstream: &Tensor<f64>,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    M: Module<f64> + ?Sized,
{
    module.reset();
    module.forward(x).map_err(GradCheckError::ForwardPassError)?;
    let analytical = module.backward(upstream).map_err(GradCheckError::BackwardPassError)?;

    let numerical = numerical_grad(x, epsilon, "input", |x_perturbed| {
        weighted_objective(module, x_perturbed, upstream)
    })?;
    compare("input", &analytical, x.shape(), &numerical, tolerance)
}

/// Checks the gradient a module reports for slot parameter `name`.
///
/// The slot's accumulators are cleared first. The parameter value is
/// restored before returning, whatever the outcome.
pub fn check_param_grad<M>(
    module: &mut M,
    slot: &SharedSlot<f64>,
    name: &str,
    x: &Tensor<f64>,
    upstream: &Tensor<f64>,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    M: Module<f64> + ?Sized,
{
    lock_slot(slot, "grad check")?.zero_grad();
    module.reset();
    module.forward(x).map_err(GradCheckError::ForwardPassError)?;
    module.backward(upstream).map_err(GradCheckError::BackwardPassError)?;

    param_check(slot, name, epsilon, tolerance, || weighted_objective(module, x, upstream))
}

/// Checks a loss module's seeded `backward` against finite differences of its loss w.r.t. `x`.
pub fn check_loss_input_grad<L>(
    loss: &mut L,
    x: &Tensor<f64>,
    target: &Tensor<f64>,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    L: Loss<f64> + ?Sized,
{
    loss.set_target(target.clone())?;
    loss.reset();
    loss.forward(x).map_err(GradCheckError::ForwardPassError)?;
    let analytical = loss.backward_seed().map_err(GradCheckError::BackwardPassError)?;

    let numerical = numerical_grad(x, epsilon, "input", |x_perturbed| loss_objective(loss, x_perturbed))?;
    compare("input", &analytical, x.shape(), &numerical, tolerance)
}

/// Checks the gradient of a loss-terminated chain w.r.t. slot parameter `name`.
pub fn check_loss_param_grad<L>(
    loss: &mut L,
    slot: &SharedSlot<f64>,
    name: &str,
    x: &Tensor<f64>,
    target: &Tensor<f64>,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    L: Loss<f64> + ?Sized,
{
    lock_slot(slot, "grad check")?.zero_grad();
    loss.set_target(target.clone())?;
    loss.reset();
    loss.forward(x).map_err(GradCheckError::ForwardPassError)?;
    loss.backward_seed().map_err(GradCheckError::BackwardPassError)?;

    param_check(slot, name, epsilon, tolerance, || loss_objective(loss, x))
}

/// Shared tail of the parameter checks. `objective` evaluates the scalar
/// objective at the slot's current parameter values.
fn param_check<F>(
    slot: &SharedSlot<f64>,
    name: &str,
    epsilon: f64,
    tolerance: f64,
    mut objective: F,
) -> Result<(), GradCheckError>
where
    F: FnMut() -> Result<f64, NeurogradError>,
{
    let (original, analytical) = {
        let guard = lock_slot(slot, "grad check")?;
        let analytical = guard
            .grad(name)?
            .ok_or_else(|| GradCheckError::MissingAnalyticalGrad { name: name.to_string() })?;
        (guard.val(name)?, analytical)
    };

    let target = format!("parameter '{}'", name);
    let numerical = numerical_grad(&original, epsilon, &target, |value| {
        lock_slot(slot, "grad check")?.set_val(name, value.clone())?;
        objective()
    });
    lock_slot(slot, "grad check")?.set_val(name, original.clone())?;

    compare(&target, &analytical, original.shape(), &numerical?, tolerance)
}

/// `Σ upstream ⊙ forward(x)`, leaving the module reset.
fn weighted_objective<M>(module: &mut M, x: &Tensor<f64>, upstream: &Tensor<f64>) -> Result<f64, NeurogradError>
where
    M: Module<f64> + ?Sized,
{
    module.reset();
    let y = module.forward(x);
    module.reset();
    let y = y?;
    check_same_shape(y.shape(), upstream.shape(), "grad check upstream")?;
    Ok(y.data().iter().zip(upstream.data().iter()).map(|(a, b)| a * b).sum())
}

/// The loss value reported after `forward(x)`, leaving the module reset.
fn loss_objective<L>(loss: &mut L, x: &Tensor<f64>) -> Result<f64, NeurogradError>
where
    L: Loss<f64> + ?Sized,
{
    loss.reset();
    let result = loss.forward(x).and_then(|_| {
        loss.loss().ok_or_else(|| NeurogradError::InvalidSequence {
            module: loss.name().to_string(),
            operation: "loss".to_string(),
            reason: "no loss value after forward".to_string(),
        })
    });
    loss.reset();
    result
}

fn numerical_grad<F>(values: &Tensor<f64>, epsilon: f64, target: &str, mut eval: F) -> Result<Vec<f64>, GradCheckError>
where
    F: FnMut(&Tensor<f64>) -> Result<f64, NeurogradError>,
{
    let mut grads = Vec::with_capacity(values.numel());
    let mut perturbed = values.clone();
    for i in 0..values.numel() {
        let original = values.data()[i];

        perturbed.data[i] = original + epsilon;
        let loss_plus = eval(&perturbed).map_err(GradCheckError::ForwardPassError)?;
        perturbed.data[i] = original - epsilon;
        let loss_minus = eval(&perturbed).map_err(GradCheckError::ForwardPassError)?;
        perturbed.data[i] = original;

        let grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                target: target.to_string(),
                element_index: i,
                loss_plus,
                loss_minus,
            });
        }
        grads.push(grad);
    }
    Ok(grads)
}

fn compare(
    target: &str,
    analytical: &Tensor<f64>,
    expected_shape: &[usize],
    numerical: &[f64],
    tolerance: f64,
) -> Result<(), GradCheckError> {
    check_same_shape(expected_shape, analytical.shape(), "grad check analytical gradient")?;

    let mut max_difference = 0.0f64;
    for (i, (&a, &n)) in analytical.data().iter().zip(numerical.iter()).enumerate() {
        if !a.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                target: target.to_string(),
                element_index: i,
                value: a,
            });
        }
        let difference = (a - n).abs();
        max_difference = max_difference.max(difference);
        if !abs_diff_eq!(a, n, epsilon = tolerance) && !relative_eq!(a, n, max_relative = tolerance) {
            return Err(GradCheckError::GradientMismatch {
                target: target.to_string(),
                element_index: i,
                analytical_grad: a,
                numerical_grad: n,
                difference,
            });
        }
    }
    debug!("grad check on {}: {} elements, max difference {:e}", target, numerical.len(), max_difference);
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
