//! Interpolate a field sampled on one rectilinear grid onto another.
use itertools::Itertools;
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};
use num_traits::Float;

use crate::interp::MultilinearRectilinear;
use crate::{GridError, Result};

/// Value used for query points outside the source grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outside<T> {
    /// Use a fixed value.
    Fill(T),
    /// Keep the input value at the same index. Interpolated values that come
    /// out NaN inside the grid are replaced the same way. The query grid must
    /// then have the same shape as the source grid.
    KeepOriginal,
}

/// Multilinear interpolation of `values`, sampled on the tensor grid of
/// `grid_axes`, at every point of the tensor grid of `query_axes`.
///
/// The output has one axis per query axis, with the first axis varying
/// slowest.
///
/// # Errors
/// * If the rank is not 1, 2 or 3, or the query rank differs from it
/// * If the shape of `values` does not match the grid axis lengths
/// * If any grid axis is empty or not strictly increasing
/// * If `Outside::KeepOriginal` is used with a differently shaped query grid
pub fn regrid<T, S, D>(
    grid_axes: &[&[T]],
    values: &ArrayBase<S, D>,
    query_axes: &[&[T]],
    outside: Outside<T>,
) -> Result<ArrayD<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    let rank = grid_axes.len();
    if query_axes.len() != rank {
        return Err(GridError::shape(format!(
            "{} query axes given for a rank {rank} grid",
            query_axes.len()
        )));
    }
    let grid_shape: Vec<usize> = grid_axes.iter().map(|a| a.len()).collect();
    if values.shape() != grid_shape.as_slice() {
        return Err(GridError::shape(format!(
            "values of shape {:?} do not match grid axes of lengths {grid_shape:?}",
            values.shape()
        )));
    }
    let query_shape: Vec<usize> = query_axes.iter().map(|a| a.len()).collect();
    if matches!(outside, Outside::KeepOriginal) && query_shape != grid_shape {
        return Err(GridError::shape(format!(
            "keeping original values needs a {grid_shape:?} query grid, got {query_shape:?}"
        )));
    }

    let vals: Vec<T> = values.iter().copied().collect();
    let out = match rank {
        1 => regrid_fixed::<T, 1>(grid_axes, &vals, query_axes, outside)?,
        2 => regrid_fixed::<T, 2>(grid_axes, &vals, query_axes, outside)?,
        3 => regrid_fixed::<T, 3>(grid_axes, &vals, query_axes, outside)?,
        _ => {
            return Err(GridError::shape(format!(
                "regridding supports ranks 1 to 3, got {rank}"
            )))
        }
    };

    ArrayD::from_shape_vec(IxDyn(&query_shape), out)
        .map_err(|e| GridError::internal_invariant(e.to_string()))
}

fn regrid_fixed<T: Float, const N: usize>(
    grid_axes: &[&[T]],
    vals: &[T],
    query_axes: &[&[T]],
    outside: Outside<T>,
) -> Result<Vec<T>> {
    let grids: [&[T]; N] = grid_axes.try_into().map_err(|_| "Dimension mismatch")?;
    let interpolator = MultilinearRectilinear::new(grids, vals)?;

    let mut out = Vec::with_capacity(query_axes.iter().map(|a| a.len()).product());
    let mut x = [T::zero(); N];
    for (i, point) in query_axes
        .iter()
        .map(|a| a.iter().copied())
        .multi_cartesian_product()
        .enumerate()
    {
        x.copy_from_slice(&point);
        // With KeepOriginal the query shape equals the grid shape, so flat
        // indices line up
        let v = match (interpolator.contains(&x), outside) {
            (true, Outside::Fill(_)) => interpolator.interp_one(x),
            (false, Outside::Fill(fill)) => fill,
            (true, Outside::KeepOriginal) => {
                let v = interpolator.interp_one(x);
                if v.is_nan() {
                    vals[i]
                } else {
                    v
                }
            }
            (false, Outside::KeepOriginal) => vals[i],
        };
        out.push(v);
    }

    Ok(out)
}
