use crate::error::NeurogradError;

/// Number of elements implied by `shape`, or `None` if the product overflows `usize`.
///
/// A zero-sized dimension makes the count 0 regardless of the other dimensions.
pub fn checked_numel(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |n, &d| n.checked_mul(d))
}

/// Resolves a reshape target that may contain a single `-1` (inferred) dimension.
///
/// Example: `[-1, 4]` with 12 elements -> `[3, 4]`.
pub fn infer_shape(target: &[isize], numel: usize) -> Result<Vec<usize>, NeurogradError> {
    let mut inferred_at = None;
    for (i, &dim) in target.iter().enumerate() {
        match dim {
            -1 => {
                if inferred_at.replace(i).is_some() {
                    return Err(NeurogradError::InvalidArgument(format!(
                        "reshape target {:?} has more than one -1 dimension",
                        target
                    )));
                }
            }
            d if d >= 0 => {}
            d => {
                return Err(NeurogradError::InvalidArgument(format!(
                    "reshape target {:?} has negative dimension {}",
                    target, d
                )))
            }
        }
    }

    let mut shape: Vec<usize> = target.iter().map(|&d| d.max(0) as usize).collect();
    let known_dims: Vec<usize> = target
        .iter()
        .filter(|&&d| d != -1)
        .map(|&d| d as usize)
        .collect();
    let known = checked_numel(&known_dims).ok_or_else(|| NeurogradError::ShapeMismatch {
        expected: shape.clone(),
        actual: vec![numel],
        operation: "reshape (element count overflows usize)".to_string(),
    })?;

    match inferred_at {
        Some(i) => {
            if known == 0 || numel % known != 0 {
                return Err(NeurogradError::ShapeMismatch {
                    expected: shape,
                    actual: vec![numel],
                    operation: "reshape (infer -1)".to_string(),
                });
            }
            shape[i] = numel / known;
        }
        None => {
            if known != numel {
                return Err(NeurogradError::ShapeMismatch {
                    expected: shape,
                    actual: vec![numel],
                    operation: "reshape".to_string(),
                });
            }
        }
    }
    Ok(shape)
}

/// Fails with `ShapeMismatch` unless both shapes are identical.
pub fn check_same_shape(expected: &[usize], actual: &[usize], operation: &str) -> Result<(), NeurogradError> {
    if expected != actual {
        return Err(NeurogradError::shape_mismatch(expected, actual, operation));
    }
    Ok(())
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
