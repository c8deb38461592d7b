use super::*;
use crate::nn::cache::ForwardCache;
use crate::nn::layers::{MatMul, Sigmoid};
use crate::nn::losses::SoftmaxCrossEnt;
use crate::nn::slot::{shared, ParamSlot};
use crate::utils::testing::create_test_tensor;

// Doubles its input but reports a tripled gradient.
#[derive(Debug)]
struct WrongBackward {
    cache: ForwardCache<()>,
}

impl Module<f64> for WrongBackward {
    fn name(&self) -> &'static str {
        "wrong"
    }

    fn forward(&mut self, input: &Tensor<f64>) -> Result<Tensor<f64>, NeurogradError> {
        self.cache.check_forward()?;
        self.cache.store(());
        Ok(input.map(|v| 2.0 * v))
    }

    fn backward(&mut self, grad_output: &Tensor<f64>) -> Result<Tensor<f64>, NeurogradError> {
        self.cache.take()?;
        Ok(grad_output.map(|g| 3.0 * g))
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[test]
fn test_correct_module_passes() {
    let mut layer: Sigmoid<f64> = Sigmoid::new();
    let x = create_test_tensor(vec![0.3, -1.2, 2.0, 0.0], vec![2, 2]);
    let upstream = create_test_tensor(vec![1.0, -0.5, 0.25, 2.0], vec![2, 2]);
    check_input_grad(&mut layer, &x, &upstream, 1e-6, 1e-4).unwrap();
}

#[test]
fn test_wrong_backward_is_reported() {
    let mut module = WrongBackward { cache: ForwardCache::new("wrong") };
    let x = create_test_tensor(vec![1.0, 2.0], vec![1, 2]);
    let upstream = create_test_tensor(vec![1.0, 1.0], vec![1, 2]);
    match check_input_grad(&mut module, &x, &upstream, 1e-6, 1e-4) {
        Err(GradCheckError::GradientMismatch {
            element_index,
            analytical_grad,
            numerical_grad,
            ..
        }) => {
            assert_eq!(element_index, 0);
            assert!((analytical_grad - 3.0).abs() < 1e-12);
            assert!((numerical_grad - 2.0).abs() < 1e-6);
        }
        other => panic!("expected GradientMismatch, got {:?}", other),
    }
}

#[test]
fn test_param_check_restores_value() {
    let w = create_test_tensor(vec![0.5, -0.25, 1.0, 2.0], vec![2, 2]);
    let slot: SharedSlot<f64> = shared(ParamSlot::new().with_param("w", w.clone()));
    let mut layer = MatMul::new(slot.clone()).unwrap();
    let x = create_test_tensor(vec![1.0, 2.0, -1.0, 0.5], vec![2, 2]);
    let upstream = create_test_tensor(vec![1.0, 0.0, 0.5, -1.0], vec![2, 2]);
    check_param_grad(&mut layer, &slot, "w", &x, &upstream, 1e-6, 1e-4).unwrap();
    assert_eq!(lock_slot(&slot, "test").unwrap().val("w").unwrap(), w);
}

#[test]
fn test_missing_parameter_gradient() {
    let slot: SharedSlot<f64> = shared(
        ParamSlot::new()
            .with_param("w", create_test_tensor(vec![1.0], vec![1, 1]))
            .with_param("unused", create_test_tensor(vec![1.0], vec![1])),
    );
    let mut layer = MatMul::new(slot.clone()).unwrap();
    let x = create_test_tensor(vec![1.0], vec![1, 1]);
    let result = check_param_grad(&mut layer, &slot, "unused", &x, &x, 1e-6, 1e-4);
    assert_eq!(
        result,
        Err(GradCheckError::MissingAnalyticalGrad { name: "unused".to_string() })
    );
}

#[test]
fn test_loss_check() {
    let mut loss: SoftmaxCrossEnt<f64> = SoftmaxCrossEnt::new();
    let x = create_test_tensor(vec![0.2, -0.7, 1.5, 0.0, 0.1, -0.3], vec![2, 3]);
    let t = create_test_tensor(vec![0.0, 1.0, 0.0, 0.5, 0.5, 0.0], vec![2, 3]);
    check_loss_input_grad(&mut loss, &x, &t, 1e-6, 1e-4).unwrap();
}
