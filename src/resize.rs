//! Resample a field onto a differently sized grid over the same domain.
//!
//! Both the source and the target grids span `[0, 1]` on every axis, so the
//! transform only changes the sample count per axis; it carries no notion of
//! physical units.
//!
//! ```rust
//! use ndarray::array;
//! use wavegrid::{resize, InterpMode};
//!
//! let field = array![[0.0_f64, 1.0], [2.0, 3.0]];
//! let resized = resize(&field, &[3, 3], InterpMode::Linear).unwrap();
//! assert_eq!(resized.shape(), &[3, 3]);
//! assert!((resized[[1, 1]] - 1.5).abs() < 1e-12);
//! ```
use itertools::Itertools;
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn, ShapeBuilder};
use num_traits::Float;

use crate::diagnostics::{Diagnostics, Operation, Stopwatch, TracingDiagnostics};
use crate::field::{canonicalize, MAX_RANK};
use crate::interp::{interpn, InterpMode};
use crate::utils::linspace;
use crate::{GridError, Result};

/// Resample `field` to `new_shape`, reporting progress through `tracing`.
pub fn resize<T, S, D>(
    field: &ArrayBase<S, D>,
    new_shape: &[usize],
    mode: InterpMode,
) -> Result<ArrayD<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    resize_with(field, new_shape, mode, &TracingDiagnostics)
}

/// Resample `field` to `new_shape`, reporting progress through `diagnostics`.
///
/// The field is canonicalized first, so `new_shape` lists one size per
/// non-singleton axis.
///
/// # Errors
/// * If `new_shape` is empty or has a zero entry
/// * If `new_shape` does not have one entry per canonical axis
/// * If the canonical field is empty or has more than three axes
/// * If the interpolation method cannot run on the field (cubic needs at
///   least four samples per axis)
/// * If the output does not come out with shape `new_shape`
pub fn resize_with<T, S, D>(
    field: &ArrayBase<S, D>,
    new_shape: &[usize],
    mode: InterpMode,
    diagnostics: &dyn Diagnostics,
) -> Result<ArrayD<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    if new_shape.is_empty() || new_shape.contains(&0) {
        return Err(GridError::shape(format!(
            "requested size {new_shape:?} must have positive entries"
        )));
    }

    let field = canonicalize(field);
    if field.ndim() != new_shape.len() {
        return Err(GridError::shape(format!(
            "resolution input must match data dimensionality: got {} sizes for a rank {} field",
            new_shape.len(),
            field.ndim()
        )));
    }
    if field.ndim() > MAX_RANK {
        return Err(GridError::shape(format!(
            "fields of rank {} are not supported (maximum {MAX_RANK})",
            field.ndim()
        )));
    }
    if field.is_empty() {
        return Err(GridError::shape("cannot resize an empty field"));
    }
    if field.shape().iter().any(|&n| n < mode.min_points()) {
        return Err(GridError::Interpolation(format!(
            "{mode:?} resizing needs at least {} samples per axis, got {:?}",
            mode.min_points(),
            field.shape()
        )));
    }

    // Source grid: `n` points spanning [0, 1] on every axis
    let dims = field.shape().to_vec();
    let starts = vec![T::zero(); dims.len()];
    let steps = dims
        .iter()
        .map(|&n| match n {
            1 => Ok(T::one()),
            _ => T::from(n - 1)
                .map(|d| T::one() / d)
                .ok_or_else(|| GridError::shape("axis length is not representable")),
        })
        .collect::<Result<Vec<T>>>()?;
    let vals: Vec<T> = field.iter().copied().collect();

    let watch = Stopwatch::start(diagnostics, Operation::Resize);

    let new_axes: Vec<Vec<T>> = new_shape
        .iter()
        .map(|&n| linspace(T::zero(), T::one(), n))
        .collect();
    let queries = query_points(&new_axes);
    let obs: Vec<&[T]> = queries.iter().map(|q| &q[..]).collect();

    let mut flat = vec![T::zero(); new_shape.iter().product()];
    interpn(mode, &dims, &starts, &steps, &vals, &obs, &mut flat)?;

    let resized = restore_axis_order(flat, new_shape)?;
    if resized.shape() != new_shape {
        return Err(GridError::internal_invariant(format!(
            "resized field has shape {:?} instead of the requested {new_shape:?}",
            resized.shape()
        )));
    }

    watch.finish();
    Ok(resized)
}

/// Axis enumeration order of the query set, slowest first.
///
/// Queries follow "xy" mesh ordering: the second axis varies slowest, then
/// the first, then any remaining axes in order.
fn query_axis_order(rank: usize) -> Vec<usize> {
    match rank {
        0 | 1 => (0..rank).collect(),
        _ => [1, 0].into_iter().chain(2..rank).collect(),
    }
}

/// Every combination of target axis coordinates, as one coordinate vector
/// per axis, enumerated in "xy" mesh order.
pub(crate) fn query_points<T: Float>(axes: &[Vec<T>]) -> Vec<Vec<T>> {
    let order = query_axis_order(axes.len());
    let n: usize = axes.iter().map(|a| a.len()).product();
    let mut coords: Vec<Vec<T>> = vec![Vec::with_capacity(n); axes.len()];

    for point in order
        .iter()
        .map(|&a| axes[a].iter().copied())
        .multi_cartesian_product()
    {
        for (p, &a) in order.iter().enumerate() {
            coords[a].push(point[p]);
        }
    }

    coords
}

/// Arrange the flat interpolation result, enumerated in query order, into a
/// field of shape `new_shape`.
///
/// Rank 3 results are laid out as `(n1, n0, n2)` and the first two axes are
/// swapped afterwards; lower ranks are filled in column-major order. Both
/// undo the "xy" query enumeration.
pub(crate) fn restore_axis_order<T: Clone>(flat: Vec<T>, new_shape: &[usize]) -> Result<ArrayD<T>> {
    let restored = if new_shape.len() == 3 {
        let swapped = [new_shape[1], new_shape[0], new_shape[2]];
        let mut out = ArrayD::from_shape_vec(IxDyn(&swapped), flat)
            .map_err(|e| GridError::internal_invariant(e.to_string()))?;
        out.swap_axes(0, 1);
        out
    } else {
        ArrayD::from_shape_vec(IxDyn(new_shape).f(), flat)
            .map_err(|e| GridError::internal_invariant(e.to_string()))?
    };

    Ok(restored.as_standard_layout().into_owned())
}
