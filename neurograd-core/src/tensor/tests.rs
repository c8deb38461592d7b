use super::*;

#[test]
fn test_tensor_new_and_accessors() {
    let t = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.batch_size(), 2);
    assert_eq!(t.features(), 3);
    assert_eq!(t.data()[5], 6.0);
}

#[test]
fn test_tensor_new_length_mismatch() {
    let err = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![2, 2]).unwrap_err();
    assert_eq!(
        err,
        NeurogradError::TensorCreationError { data_len: 3, shape: vec![2, 2] }
    );
}

#[test]
fn test_tensor_equality() {
    let t1 = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
    let t2 = Tensor::new(vec![1.0f32, 2.0], vec![2]).unwrap();
    let t3 = Tensor::new(vec![1.0f32, 2.5], vec![2]).unwrap();
    let t4 = Tensor::new(vec![1.0f32, 2.0], vec![1, 2]).unwrap();
    assert_eq!(t1, t2, "Tensors with same data and shape should be equal");
    assert_ne!(t1, t3, "Tensors with different data should not be equal");
    assert_ne!(t1, t4, "Tensors with different shape should not be equal");
}

#[test]
fn test_tensor_new_rejects_overflowing_shape() {
    let shape = vec![1usize << 32, 1usize << 32];
    let err = Tensor::<f32>::new(vec![], shape.clone()).unwrap_err();
    assert_eq!(err, NeurogradError::TensorCreationError { data_len: 0, shape });
}

#[test]
fn test_scalar_and_item() {
    let s = Tensor::scalar(3.5f64);
    assert_eq!(s.shape(), &[] as &[usize]);
    assert_eq!(s.item().unwrap(), 3.5);

    let not_scalar = Tensor::new(vec![1.0f64, 2.0], vec![2]).unwrap();
    assert!(matches!(not_scalar.item(), Err(NeurogradError::ShapeMismatch { .. })));
}

#[test]
fn test_reshape_copies_values() {
    let t = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let r = t.reshape(&[4, 1]).unwrap();
    assert_eq!(r.shape(), &[4, 1]);
    assert_eq!(r.data(), t.data());
    assert!(t.reshape(&[3]).is_err());
}

#[test]
fn test_reshape_overflowing_target_is_shape_mismatch() {
    let empty = Tensor::<f64>::new(vec![], vec![0]).unwrap();
    let err = empty.reshape(&[1usize << 62, 4]).unwrap_err();
    assert!(matches!(err, NeurogradError::ShapeMismatch { .. }));
}

#[test]
fn test_rows_iterate_last_axis() {
    let t = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
    let rows: Vec<&[f32]> = t.rows().collect();
    assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0][..], &[5.0, 6.0][..]]);
}

#[test]
fn test_all_close() {
    let a = Tensor::new(vec![1.0f64, 2.0], vec![2]).unwrap();
    let b = Tensor::new(vec![1.0f64 + 1e-9, 2.0], vec![2]).unwrap();
    assert!(a.all_close(&b, 1e-6));
    assert!(!a.all_close(&b.reshape(&[1, 2]).unwrap(), 1e-6));
}

#[test]
fn test_debug_preview() {
    let t = crate::tensor::zeros::<f32>(&[3, 4]).unwrap();
    let text = format!("{:?}", t);
    assert!(text.contains("shape=[3, 4]"));
    assert!(text.contains("12 elements"));
}
