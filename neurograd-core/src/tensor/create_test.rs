use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_zeros_ones_full() {
    let z: Tensor<f32> = zeros(&[2, 3]).unwrap();
    assert_eq!(z.shape(), &[2, 3]);
    assert!(z.data().iter().all(|&v| v == 0.0));

    let o: Tensor<f64> = ones(&[4]).unwrap();
    assert_eq!(o.data(), &[1.0, 1.0, 1.0, 1.0]);

    let f = full(&[1, 2], 2.5f32).unwrap();
    assert_eq!(f.data(), &[2.5, 2.5]);
}

#[test]
fn test_like_constructors() {
    let t = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![3, 1]).unwrap();
    assert_eq!(zeros_like(&t).shape(), &[3, 1]);
    assert_eq!(ones_like(&t).data(), &[1.0, 1.0, 1.0]);
}

#[test]
fn test_randn_with_is_seeded() {
    let a: Tensor<f64> = randn_with(&[3, 4], 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
    let b: Tensor<f64> = randn_with(&[3, 4], 1.0, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.shape(), &[3, 4]);
}

#[test]
fn test_randn_scaled_by_std() {
    let mut rng = StdRng::seed_from_u64(11);
    let t: Tensor<f64> = randn_with(&[2000], 0.01, &mut rng).unwrap();
    let max_abs = t.data().iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!(max_abs < 0.1, "std 0.01 samples should stay small, got {}", max_abs);
}

#[test]
fn test_bernoulli_with_extremes() {
    let mut rng = StdRng::seed_from_u64(3);
    let all: Tensor<f32> = bernoulli_with(&[1, 16], 1.0, &mut rng).unwrap();
    assert!(all.data().iter().all(|&v| v == 1.0));
    let none: Tensor<f32> = bernoulli_with(&[1, 16], 0.0, &mut rng).unwrap();
    assert!(none.data().iter().all(|&v| v == 0.0));
}

#[test]
fn test_bernoulli_with_invalid_probability() {
    let mut rng = StdRng::seed_from_u64(3);
    let result: Result<Tensor<f32>, _> = bernoulli_with(&[2], 1.5, &mut rng);
    assert!(matches!(result, Err(NeurogradError::InvalidArgument(_))));
}

#[test]
fn test_creation_rejects_overflowing_shape() {
    let huge = [1usize << 32, 1usize << 32];
    let mut rng = StdRng::seed_from_u64(5);
    assert!(matches!(zeros::<f32>(&huge), Err(NeurogradError::TensorCreationError { .. })));
    assert!(matches!(full(&huge, 1.0f64), Err(NeurogradError::TensorCreationError { .. })));
    let normal: Result<Tensor<f64>, _> = randn_with(&huge, 1.0, &mut rng);
    assert!(matches!(normal, Err(NeurogradError::TensorCreationError { .. })));
    let mask: Result<Tensor<f32>, _> = bernoulli_with(&huge, 0.5, &mut rng);
    assert!(matches!(mask, Err(NeurogradError::TensorCreationError { .. })));
}

#[test]
fn test_zero_sized_dimension_allows_large_siblings() {
    let t: Tensor<f32> = zeros(&[usize::MAX, 0]).unwrap();
    assert_eq!(t.numel(), 0);
}
