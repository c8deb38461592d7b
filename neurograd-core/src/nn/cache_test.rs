use super::*;

#[test]
fn test_cache_valid_cycle() -> Result<(), NeurogradError> {
    let mut cache = ForwardCache::new("test");
    assert_eq!(cache.state(), &CacheState::Uninitialized);

    cache.check_forward()?;
    cache.store(3usize);
    assert!(cache.is_pending());
    assert_eq!(*cache.cached()?, 3);

    assert_eq!(cache.take()?, 3);
    assert_eq!(cache.state(), &CacheState::BackwardDone);

    cache.check_forward()?;
    cache.store(4usize);
    assert_eq!(*cache.cached()?, 4);
    cache.finish_backward();
    assert_eq!(cache.state(), &CacheState::BackwardDone);
    Ok(())
}

#[test]
fn test_backward_before_forward() {
    let mut cache: ForwardCache<usize> = ForwardCache::new("relu");
    match cache.take() {
        Err(NeurogradError::InvalidSequence { module, operation, .. }) => {
            assert_eq!(module, "relu");
            assert_eq!(operation, "backward");
        }
        other => panic!("Expected InvalidSequence, got {:?}", other),
    }
}

#[test]
fn test_backward_twice() {
    let mut cache = ForwardCache::new("relu");
    cache.store(1u8);
    assert!(cache.take().is_ok());
    assert!(matches!(cache.take(), Err(NeurogradError::InvalidSequence { .. })));
    assert!(matches!(cache.cached(), Err(NeurogradError::InvalidSequence { .. })));
}

#[test]
fn test_forward_twice() {
    let mut cache = ForwardCache::new("matmul");
    cache.check_forward().unwrap();
    cache.store(1u8);
    assert!(matches!(cache.check_forward(), Err(NeurogradError::InvalidSequence { .. })));
}

#[test]
fn test_reset_returns_to_uninitialized() {
    let mut cache = ForwardCache::new("matmul");
    cache.store(1u8);
    cache.reset();
    assert_eq!(cache.state(), &CacheState::Uninitialized);
    assert!(cache.check_forward().is_ok());
    assert!(cache.cached().is_err());
}
