use super::*;
use crate::nn::slot::{shared, ParamSlot};
use crate::utils::testing::create_test_tensor;

#[test]
fn test_add_biases_forward_backward() -> Result<(), NeurogradError> {
    let slot: SharedSlot<f64> = shared(ParamSlot::new().with_param(BIAS, create_test_tensor(vec![1.0, -1.0], vec![2])));
    let mut layer = AddBiases::new(slot.clone())?;

    let x = create_test_tensor(vec![0.0, 0.0, 10.0, 20.0, -5.0, 5.0], vec![3, 2]);
    let y = layer.forward(&x)?;
    assert_eq!(y.data(), &[1.0, -1.0, 11.0, 19.0, -4.0, 4.0]);

    let g = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]);
    let grad_x = layer.backward(&g)?;
    assert_eq!(grad_x, g);

    let grad_b = lock_slot(&slot, "test")?.grad(BIAS)?.expect("b gradient reported");
    assert_eq!(grad_b.shape(), &[2]);
    assert_eq!(grad_b.data(), &[9.0, 12.0]);
    Ok(())
}

#[test]
fn test_row_shaped_bias_keeps_its_shape() -> Result<(), NeurogradError> {
    let slot: SharedSlot<f64> = shared(ParamSlot::new().with_param(BIAS, create_test_tensor(vec![0.5, 0.5, 0.5], vec![1, 3])));
    let mut layer = AddBiases::new(slot.clone())?;
    layer.forward(&create_test_tensor(vec![0.0; 6], vec![2, 3]))?;
    layer.backward(&create_test_tensor(vec![1.0; 6], vec![2, 3]))?;
    let grad_b = lock_slot(&slot, "test")?.grad(BIAS)?.expect("b gradient reported");
    assert_eq!(grad_b.shape(), &[1, 3]);
    assert_eq!(grad_b.data(), &[2.0, 2.0, 2.0]);
    Ok(())
}

#[test]
fn test_feature_mismatch() {
    let slot: SharedSlot<f64> = shared(ParamSlot::new().with_param(BIAS, create_test_tensor(vec![0.0; 3], vec![3])));
    let mut layer = AddBiases::new(slot).unwrap();
    let result = layer.forward(&create_test_tensor(vec![0.0; 4], vec![2, 2]));
    assert!(matches!(result, Err(NeurogradError::ShapeMismatch { .. })));
}

#[test]
fn test_construction_checks_bias() {
    let missing: SharedSlot<f64> = shared(ParamSlot::new());
    assert!(matches!(AddBiases::new(missing), Err(NeurogradError::UnknownParameter { .. })));

    let matrix: SharedSlot<f64> = shared(ParamSlot::new().with_param(BIAS, create_test_tensor(vec![0.0; 4], vec![2, 2])));
    assert!(matches!(AddBiases::new(matrix), Err(NeurogradError::ShapeMismatch { .. })));
}

#[test]
fn test_backward_requires_forward() {
    let slot: SharedSlot<f64> = shared(ParamSlot::new().with_param(BIAS, create_test_tensor(vec![0.0], vec![1])));
    let mut layer = AddBiases::new(slot).unwrap();
    let g = create_test_tensor(vec![1.0], vec![1, 1]);
    assert!(matches!(layer.backward(&g), Err(NeurogradError::InvalidSequence { .. })));
}
