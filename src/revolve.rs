//! Form a 3D volume by revolving a 2D cross-section about its first axis.
use ndarray::{Array3, ArrayBase, Data, Dimension, Ix2};
use num_traits::Float;
use rayon::prelude::*;

use crate::diagnostics::{Diagnostics, Operation, Stopwatch, TracingDiagnostics};
use crate::interp::{Interp1D, Linear1D, RegularGrid1D};
use crate::{GridError, Result};

/// Revolve an `(m, n)` section into an `(m, 2n - 1, 2n - 1)` volume,
/// reporting progress through `tracing`.
pub fn revolve_2d_to_3d<T, S, D>(section: &ArrayBase<S, D>) -> Result<Array3<T>>
where
    T: Float + Send + Sync,
    S: Data<Elem = T>,
    D: Dimension,
{
    revolve_2d_to_3d_with(section, &TracingDiagnostics)
}

/// Revolve an `(m, n)` section into an `(m, 2n - 1, 2n - 1)` volume.
///
/// Row `i` of the section is a radial profile sampled at radii `0..n`.
/// Slice `i` of the volume holds that profile evaluated, with linear
/// interpolation, at each sample's distance from the slice center
/// `(n - 1, n - 1)`. Samples further than `n - 1` from the center are zero.
///
/// Slices are filled in parallel.
///
/// # Errors
/// * If `section` is not two-dimensional
/// * If either dimension of `section` is zero
pub fn revolve_2d_to_3d_with<T, S, D>(
    section: &ArrayBase<S, D>,
    diagnostics: &dyn Diagnostics,
) -> Result<Array3<T>>
where
    T: Float + Send + Sync,
    S: Data<Elem = T>,
    D: Dimension,
{
    let section = section.view().into_dimensionality::<Ix2>().map_err(|_| {
        GridError::shape(format!(
            "revolution needs a two-dimensional section, got rank {}",
            section.ndim()
        ))
    })?;
    let (m, n) = section.dim();
    if m == 0 || n == 0 {
        return Err(GridError::shape(format!(
            "cannot revolve an empty section of shape ({m}, {n})"
        )));
    }

    let watch = Stopwatch::start(diagnostics, Operation::Revolve);

    let radius = radius_map::<T>(n)?;
    let w = 2 * n - 1;
    let mut volume = Array3::<T>::zeros((m, w, w));
    let slices = volume
        .as_slice_mut()
        .ok_or_else(|| GridError::internal_invariant("volume is not contiguous"))?;

    slices
        .par_chunks_mut(w * w)
        .enumerate()
        .try_for_each(|(i, slice)| -> Result<()> {
            let profile = section.row(i).to_vec();
            let grid = RegularGrid1D::new(T::zero(), T::one(), &profile)?;
            let interp = Linear1D::with_fill(grid, T::zero());
            interp.eval(&radius, slice)?;
            Ok(())
        })?;

    watch.finish();
    Ok(volume)
}

/// Distance of every sample in a `(2n - 1, 2n - 1)` slice from its center,
/// in row-major order.
fn radius_map<T: Float>(n: usize) -> Result<Vec<T>> {
    let w = 2 * n - 1;
    let coords = (0..w)
        .map(|k| T::from(k as f64 - (n - 1) as f64))
        .collect::<Option<Vec<T>>>()
        .ok_or_else(|| GridError::shape("section is too wide"))?;

    Ok(coords
        .iter()
        .flat_map(|&y| coords.iter().map(move |&z| y.hypot(z)))
        .collect())
}
