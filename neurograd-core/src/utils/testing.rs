use crate::ops::traits::NeuroFloat;
use crate::tensor::Tensor;

/// Checks that a tensor has the expected shape and that every element is
/// within `tolerance` of the expected data.
///
/// Panics with the first offending index otherwise.
pub fn check_tensor_near<T: NeuroFloat>(
    actual: &Tensor<T>,
    expected_shape: &[usize],
    expected_data: &[T],
    tolerance: T,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.data().len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (&a, &e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if !(diff <= tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a tensor for testing purposes.
#[cfg(test)]
pub(crate) fn create_test_tensor<T: NeuroFloat>(data: Vec<T>, shape: Vec<usize>) -> Tensor<T> {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}
