use super::*;
use crate::nn::slot::{shared, ParamSlot};
use crate::utils::testing::create_test_tensor;

fn param_slot() -> SharedSlot<f64> {
    shared(
        ParamSlot::new()
            .with_param("w", create_test_tensor(vec![1.0; 6], vec![3, 2]))
            .with_param("b", create_test_tensor(vec![0.0; 2], vec![2])),
    )
}

#[test]
fn test_every_registered_name_builds() {
    let config = ModuleConfig::new().target_shape(&[-1]).slot(param_slot()).seed(3);
    for name in module_types() {
        let module = build_module::<f64>(name, &config)
            .unwrap_or_else(|e| panic!("failed to build '{}': {}", name, e));
        assert_eq!(module.name(), module.kind().name());
    }
}

#[test]
fn test_aliases() {
    assert_eq!("bias".parse::<ModuleKind>().unwrap(), ModuleKind::AddBiases);
    assert_eq!("dot".parse::<ModuleKind>().unwrap(), ModuleKind::MatMul);
    let config = ModuleConfig::new().slot(param_slot());
    assert_eq!(build_module::<f64>("dot", &config).unwrap().name(), "matmul");
    assert_eq!(build_module::<f64>("bias", &config).unwrap().name(), "add_biases");
}

#[test]
fn test_unknown_module_type() {
    let config: ModuleConfig<f32> = ModuleConfig::new();
    assert_eq!(
        build_module("conv2d", &config).unwrap_err(),
        NeurogradError::UnknownModuleType("conv2d".to_string())
    );
}

#[test]
fn test_missing_config_entries() {
    let config: ModuleConfig<f64> = ModuleConfig::new();
    for name in ["reshape", "matmul", "add_biases"] {
        assert!(matches!(
            build_module(name, &config),
            Err(NeurogradError::InvalidArgument(_))
        ));
    }
    let bad_drop = ModuleConfig::<f64>::new().keep_prob(0.0);
    assert!(matches!(
        build_module("drop", &bad_drop),
        Err(NeurogradError::InvalidArgument(_))
    ));
}

#[test]
fn test_drop_defaults_to_half() {
    let config: ModuleConfig<f64> = ModuleConfig::new();
    match build_module("drop", &config).unwrap() {
        AnyModule::Drop(layer) => assert_eq!(layer.keep_prob(), 0.5),
        other => panic!("expected drop, got {:?}", other.kind()),
    }
}

#[test]
fn test_loss_access() {
    let config: ModuleConfig<f64> = ModuleConfig::new();
    let mut loss = build_module("l2", &config).unwrap();
    assert!(loss.kind().is_loss());
    assert!(loss.as_loss_mut().is_some());

    let mut relu = build_module("relu", &config).unwrap();
    assert!(relu.as_loss_mut().is_none());
    assert!(relu.slot().is_none());
}

#[test]
fn test_backward_on_fresh_module_fails_for_every_variant() {
    let config = ModuleConfig::new().target_shape(&[-1]).slot(param_slot());
    let grad = create_test_tensor(vec![1.0], vec![1, 1]);
    for name in module_types() {
        let mut module = build_module::<f64>(name, &config).unwrap();
        assert!(
            matches!(module.backward(&grad), Err(NeurogradError::InvalidSequence { .. })),
            "{} accepted backward before forward",
            name
        );
    }
}
