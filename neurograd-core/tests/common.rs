use neurograd_core::nn::{shared, ParamSlot, SharedSlot};
use neurograd_core::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Finite-difference step and tolerance used by the gradient checks.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-6;
#[allow(dead_code)]
pub const TOLERANCE: f64 = 1e-4;

// Each integration test file compiles this module separately, so helpers
// unused by one of them would otherwise warn.
#[allow(dead_code)]
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor<f64> {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A slot holding `w` `[inputs, outputs]` drawn from N(0, 0.5²) and a zero bias `b` `[outputs]`.
#[allow(dead_code)]
pub fn dense_slot(inputs: usize, outputs: usize, seed: u64) -> SharedSlot<f64> {
    let mut rng = seeded_rng(seed);
    shared(
        ParamSlot::<f64>::new()
            .with_normal("w", &[inputs, outputs], 0.5, &mut rng)
            .expect("weight init failed")
            .with_param("b", Tensor::new(vec![0.1; outputs], vec![outputs]).expect("bias creation failed")),
    )
}
