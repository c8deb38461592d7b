//! # Training a small MLP with registry-built modules
//!
//! Builds `dot -> bias -> sigmoid -> dropout -> dot -> bias -> softmax_crossent`
//! by name through the module registry, then runs a manual gradient-descent
//! loop: forward, loss, backward seed, and a parameter update done directly
//! on the shared slots.
//!
//! ## Running
//! `cargo run --example mlp`

use neurograd_core::model::Sequential;
use neurograd_core::nn::{lock_slot, shared, Loss, Module, ModuleConfig, ParamSlot, SharedSlot};
use neurograd_core::{NeurogradError, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

const LEARNING_RATE: f32 = 0.5;
const EPOCHS: usize = 50;

/// A slot holding a dense layer's `w` `[inputs, outputs]` and bias `b` `[outputs]`.
fn dense(inputs: usize, outputs: usize, rng: &mut StdRng) -> Result<SharedSlot<f32>, NeurogradError> {
    let slot = ParamSlot::<f32>::new()
        .with_normal("w", &[inputs, outputs], 0.5, rng)?
        .with_param("b", Tensor::new(vec![0.0; outputs], vec![outputs])?);
    Ok(shared(slot))
}

fn build(hidden: &SharedSlot<f32>, out: &SharedSlot<f32>) -> Result<Sequential<f32>, NeurogradError> {
    let mut net = Sequential::new();
    net.add_from_registry("fc1", "dot", &ModuleConfig::new().slot(hidden.clone()))?;
    net.add_from_registry("b1", "bias", &ModuleConfig::new().slot(hidden.clone()))?;
    net.add_from_registry("act1", "sigmoid", &ModuleConfig::new())?;
    net.add_from_registry("drop1", "drop", &ModuleConfig::new().keep_prob(0.9).seed(17))?;
    net.add_from_registry("fc2", "dot", &ModuleConfig::new().slot(out.clone()))?;
    net.add_from_registry("b2", "bias", &ModuleConfig::new().slot(out.clone()))?;
    net.add_from_registry("loss", "softmax_crossent", &ModuleConfig::new())?;
    Ok(net)
}

/// Plain gradient step `p -= lr * dp` on every parameter of `slot`, then clears the gradients.
fn sgd_step(slot: &SharedSlot<f32>, lr: f32) -> Result<(), NeurogradError> {
    let mut guard = lock_slot(slot, "sgd step")?;
    for name in ["w", "b"] {
        let Some(grad) = guard.grad(name)? else { continue };
        let value = guard.val(name)?;
        let updated: Vec<f32> = value
            .data()
            .iter()
            .zip(grad.data())
            .map(|(v, g)| v - lr * g)
            .collect();
        guard.set_val(name, Tensor::new(updated, value.shape().to_vec())?)?;
    }
    guard.zero_grad();
    Ok(())
}

fn main() -> Result<(), NeurogradError> {
    let mut rng = StdRng::seed_from_u64(42);
    let hidden = dense(2, 8, &mut rng)?;
    let out = dense(8, 2, &mut rng)?;
    let mut net = build(&hidden, &out)?;
    println!("MLP built from: {:?}", net.modules().iter().map(|m| m.kind().name()).collect::<Vec<_>>());

    // XOR, one-hot encoded.
    let x = Tensor::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0], vec![4, 2])?;
    let t = Tensor::new(vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0], vec![4, 2])?;
    net.set_target(t)?;

    for epoch in 0..EPOCHS {
        net.forward(&x)?;
        let loss = net.loss().unwrap_or(f32::NAN);
        net.backward_seed()?;
        sgd_step(&hidden, LEARNING_RATE)?;
        sgd_step(&out, LEARNING_RATE)?;
        if epoch % 10 == 0 || epoch + 1 == EPOCHS {
            println!("Epoch [{}/{}], Loss: {:.4}", epoch + 1, EPOCHS, loss);
        }
    }

    println!("Training done.");
    Ok(())
}
