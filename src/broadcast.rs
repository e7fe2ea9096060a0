//! Lift a vector onto one axis of a higher-rank field for broadcasting
//! against a grid.
use ndarray::{ArrayD, IxDyn};

use crate::{GridError, Result};

/// Reshape `vector` to rank `target_rank`, with every dimension singleton
/// except `axis`, which holds the vector in order.
///
/// # Errors
/// * If `axis` is not below `target_rank`
pub fn broadcast_axis<T: Clone>(
    vector: &[T],
    target_rank: usize,
    axis: usize,
) -> Result<ArrayD<T>> {
    if axis >= target_rank {
        return Err(GridError::range(format!(
            "axis {axis} is out of bounds for a rank {target_rank} field"
        )));
    }

    let mut shape = vec![1_usize; target_rank];
    shape[axis] = vector.len();
    ArrayD::from_shape_vec(IxDyn(&shape), vector.to_vec())
        .map_err(|e| GridError::internal_invariant(e.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{Array3, Axis};

    #[test]
    fn test_broadcast_axis_shapes() {
        let v = [1.0_f64, 2.0, 3.0];
        let b = broadcast_axis(&v, 3, 1).unwrap();
        assert_eq!(b.shape(), &[1, 3, 1]);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), v.to_vec());

        let b = broadcast_axis(&v, 2, 0).unwrap();
        assert_eq!(b.shape(), &[3, 1]);
    }

    #[test]
    fn test_broadcast_against_grid() {
        let v = [1.0_f64, 10.0];
        let b = broadcast_axis(&v, 3, 2).unwrap();
        let grid = Array3::<f64>::ones((3, 4, 2)).into_dyn();
        let scaled = &grid * &b;
        assert_eq!(scaled.shape(), &[3, 4, 2]);
        assert!(scaled.index_axis(Axis(2), 1).iter().all(|&x| x == 10.0));
        assert!(scaled.index_axis(Axis(2), 0).iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_axis_out_of_bounds() {
        assert!(matches!(
            broadcast_axis(&[1, 2], 2, 2),
            Err(GridError::Range(_))
        ));
        assert!(matches!(broadcast_axis(&[1], 0, 0), Err(GridError::Range(_))));
    }
}
