//! Fields and their coordinates.
//!
//! A field is an `ndarray` array of rank 1 to 3 holding samples on a uniform
//! grid. Operations that ignore singleton axes call [`canonicalize`] exactly
//! once on entry; every coordinate they report afterwards refers to the
//! canonical axes.
use ndarray::{ArrayBase, ArrayD, Axis, Data, Dimension};

use crate::{GridError, Result};

/// An N-dimensional field of samples.
pub type Field<T> = ArrayD<T>;

/// Largest rank the interpolating transforms accept.
pub const MAX_RANK: usize = 3;

/// Drop every axis of length one.
///
/// A field whose axes all have length one keeps its rank, so a `1x1` field
/// stays `1x1` instead of collapsing to a scalar.
pub fn canonicalize<T, S, D>(field: &ArrayBase<S, D>) -> Field<T>
where
    T: Clone,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut view = field.view().into_dyn();
    if field.shape().iter().all(|&n| n == 1) {
        return view.to_owned();
    }

    // Remove from the back so earlier axis numbers stay valid
    for i in (0..field.ndim()).rev() {
        if field.shape()[i] == 1 {
            view = view.index_axis_move(Axis(i), 0);
        }
    }
    view.to_owned()
}

/// Shape of the field after [`canonicalize`], without copying any data.
pub fn canonical_shape(shape: &[usize]) -> Vec<usize> {
    if shape.iter().all(|&n| n == 1) {
        return shape.to_vec();
    }
    shape.iter().copied().filter(|&n| n != 1).collect()
}

/// Convert a zero-based index into the one-based convention used when
/// reporting positions to the simulator.
pub fn to_one_based(index: &[usize]) -> Vec<usize> {
    index.iter().map(|i| i + 1).collect()
}

/// Convert a one-based index back to zero-based.
///
/// # Errors
/// * If any component is zero, which has no one-based meaning
pub fn from_one_based(index: &[usize]) -> Result<Vec<usize>> {
    index
        .iter()
        .map(|&i| {
            i.checked_sub(1)
                .ok_or_else(|| GridError::range("one-based index components start at 1"))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{array, Array3, IxDyn};

    #[test]
    fn test_canonicalize_drops_singletons() {
        let a = Array3::from_shape_fn((1, 3, 1), |(_, j, _)| j as f64);
        let c = canonicalize(&a);
        assert_eq!(c.shape(), &[3]);
        assert_eq!(c.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);

        let b = Array3::from_shape_fn((2, 1, 3), |(i, _, k)| (10 * i + k) as f64);
        let c = canonicalize(&b);
        assert_eq!(c.shape(), &[2, 3]);
        assert_eq!(c[IxDyn(&[1, 2])], 12.0);
    }

    #[test]
    fn test_canonicalize_keeps_all_singleton_rank() {
        let a = array![[5.0_f64]];
        let c = canonicalize(&a);
        assert_eq!(c.shape(), &[1, 1]);
        assert_eq!(canonical_shape(&[1, 1]), vec![1, 1]);
        assert_eq!(canonical_shape(&[1, 4, 1]), vec![4]);
    }

    #[test]
    fn test_one_based_round_trip() {
        assert_eq!(to_one_based(&[2, 3]), vec![3, 4]);
        assert_eq!(from_one_based(&[3, 4]).unwrap(), vec![2, 3]);
        assert!(matches!(from_one_based(&[0, 1]), Err(GridError::Range(_))));
    }
}
