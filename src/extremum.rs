//! Locate the minimum or maximum of a field.
//!
//! Positions are reported one-based, the convention the simulator's
//! reference results use. Scanning itself is zero-based; the conversion
//! happens once, through [`to_one_based`], when the result is built.
use ndarray::{ArrayBase, Data, Dimension, IntoDimension};
use num_traits::Float;

use crate::field::to_one_based;
use crate::{GridError, Result};

/// Which extremum to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Min,
    Max,
}

/// An extremal value and its one-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum<T> {
    pub value: T,
    /// One-based index, one component per axis.
    pub index: Vec<usize>,
}

/// Find the global minimum or maximum of a field.
///
/// Samples are visited in row-major order (first axis slowest) and ties keep
/// the first occurrence. A NaN counts as the extremum, and the first NaN wins.
///
/// # Errors
/// * If the field is empty
pub fn locate_extremum<T, S, D>(field: &ArrayBase<S, D>, kind: ExtremumKind) -> Result<Extremum<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut best: Option<(D::Pattern, T)> = None;
    for (idx, &v) in field.indexed_iter() {
        let replace = match &best {
            None => true,
            Some((_, b)) if b.is_nan() => false,
            Some((_, b)) => {
                v.is_nan()
                    || match kind {
                        ExtremumKind::Min => v < *b,
                        ExtremumKind::Max => v > *b,
                    }
            }
        };
        if replace {
            best = Some((idx, v));
        }
    }

    let (pattern, value) =
        best.ok_or_else(|| GridError::shape("cannot locate the extremum of an empty field"))?;
    let index = pattern.into_dimension();

    Ok(Extremum {
        value,
        index: to_one_based(index.slice()),
    })
}

/// Minimum value and its one-based index.
pub fn min_nd<T, S, D>(field: &ArrayBase<S, D>) -> Result<Extremum<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    locate_extremum(field, ExtremumKind::Min)
}

/// Maximum value and its one-based index.
pub fn max_nd<T, S, D>(field: &ArrayBase<S, D>) -> Result<Extremum<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    locate_extremum(field, ExtremumKind::Max)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use ndarray::{array, Array1, Array2, Array3, ShapeBuilder};

    #[test]
    fn test_max_reports_one_based_index() {
        let mut a = Array2::<f64>::zeros((4, 5));
        a[[2, 3]] = 7.5;
        let m = max_nd(&a).unwrap();
        assert_eq!(m.value, 7.5);
        assert_eq!(m.index, vec![3, 4]);
    }

    #[test]
    fn test_ties_keep_first_in_row_major_order() {
        let a = array![[0.0_f64, 2.0], [2.0, 1.0]];
        assert_eq!(max_nd(&a).unwrap().index, vec![1, 2]);

        let b = array![[3.0_f64, -1.0, 5.0], [-1.0, 9.0, 9.0]];
        assert_eq!(min_nd(&b).unwrap().index, vec![1, 2]);
        assert_eq!(max_nd(&b).unwrap().index, vec![2, 2]);
    }

    #[test]
    fn test_column_major_input_scans_logically() {
        // Memory order must not influence which tie wins
        let a = array![[1.0_f64, 4.0], [4.0, 0.0]];
        let f = Array2::from_shape_vec((2, 2).f(), vec![1.0, 4.0, 4.0, 0.0]).unwrap();
        assert_eq!(f, a);
        assert_eq!(max_nd(&f).unwrap().index, vec![1, 2]);
    }

    #[test]
    fn test_random_3d_matches_brute_force() {
        let mut rng = rng_fixed_seed();
        let a = random_field(&mut rng, &[3, 4, 5]);
        let a3: Array3<f64> = a.clone().into_dimensionality().unwrap();

        let mut best = (f64::INFINITY, [0, 0, 0]);
        for ((i, j, k), &v) in a3.indexed_iter() {
            if v < best.0 {
                best = (v, [i, j, k]);
            }
        }
        let m = min_nd(&a).unwrap();
        assert_eq!(m.value, best.0);
        assert_eq!(m.index, vec![best.1[0] + 1, best.1[1] + 1, best.1[2] + 1]);
    }

    #[test]
    fn test_nan_and_empty() {
        let a = array![1.0_f64, f64::NAN, 3.0, f64::NAN];
        let m = max_nd(&a).unwrap();
        assert!(m.value.is_nan());
        assert_eq!(m.index, vec![2]);

        let empty = Array1::<f64>::zeros(0);
        assert!(matches!(min_nd(&empty), Err(GridError::Shape(_))));
    }
}
