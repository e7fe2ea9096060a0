//! Interpolation on regular and rectilinear grids of rank 1 to 3.
//!
//! The resampler evaluates one of the regular-grid methods at an arbitrary
//! list of observation points; revolution uses the one-dimensional linear
//! method with a fill value outside the grid.
//!
//! | Method                  | Footprint per point | Grid requirement      |
//! |-------------------------|---------------------|-----------------------|
//! | [`NearestRegular`]      | 1                   | >= 1 point per axis   |
//! | [`MultilinearRegular`]  | 2^ndims             | >= 1 point per axis   |
//! | [`MulticubicRegular`]   | 4^ndims             | >= 4 points per axis  |
//! | [`MultilinearRectilinear`] | 2^ndims + log2(gridsize) | strictly increasing axes |
//!
//! All methods assume C-style ordering of vals
//! (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
//!
//! ```rust
//! use wavegrid::interp::{interpn, InterpMode};
//!
//! let dims = [2, 2];
//! let starts = [0.0_f64, 0.0];
//! let steps = [1.0_f64, 1.0];
//! let z = [0.0, 1.0, 2.0, 3.0];
//!
//! let xobs = [0.5_f64];
//! let yobs = [0.5_f64];
//! let mut out = [0.0; 1];
//! let obs = [&xobs[..], &yobs[..]];
//! interpn(InterpMode::Linear, &dims, &starts, &steps, &z, &obs, &mut out).unwrap();
//! assert!((out[0] - 1.5).abs() < 1e-12);
//! ```
use num_traits::Float;

pub mod cubic;
pub mod linear;
pub mod nearest;
pub mod one_dim;
pub mod rectilinear;

pub use cubic::MulticubicRegular;
pub use linear::MultilinearRegular;
pub use nearest::NearestRegular;
pub use one_dim::{Interp1D, Linear1D, RegularGrid1D};
pub use rectilinear::MultilinearRectilinear;

/// Interpolation method used when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpMode {
    /// Value of the closest sample; exact half-cell ties take the lower one.
    Nearest,
    /// Multilinear.
    #[default]
    Linear,
    /// Hermite spline with centered-difference slopes.
    Cubic,
}

impl InterpMode {
    /// Fewest samples per axis the method can evaluate on.
    pub fn min_points(self) -> usize {
        match self {
            InterpMode::Nearest | InterpMode::Linear => 1,
            InterpMode::Cubic => cubic::FP,
        }
    }
}

/// Evaluate an interpolant on a regular grid of 1 to 3 dimensions.
///
/// `obs` holds one coordinate slice per dimension, each the same length as `out`.
pub fn interpn<T: Float>(
    mode: InterpMode,
    dims: &[usize],
    starts: &[T],
    steps: &[T],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), &'static str> {
    let ndims = dims.len();
    if starts.len() != ndims || steps.len() != ndims || obs.len() != ndims {
        return Err("Dimension mismatch");
    }

    match ndims {
        1 => interpn_fixed::<T, 1>(mode, dims, starts, steps, vals, obs, out),
        2 => interpn_fixed::<T, 2>(mode, dims, starts, steps, vals, obs, out),
        3 => interpn_fixed::<T, 3>(mode, dims, starts, steps, vals, obs, out),
        _ => Err("Dimension must be between 1 and 3"),
    }
}

fn interpn_fixed<T: Float, const N: usize>(
    mode: InterpMode,
    dims: &[usize],
    starts: &[T],
    steps: &[T],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), &'static str> {
    let dims: [usize; N] = dims.try_into().map_err(|_| "Dimension mismatch")?;
    let starts: [T; N] = starts.try_into().map_err(|_| "Dimension mismatch")?;
    let steps: [T; N] = steps.try_into().map_err(|_| "Dimension mismatch")?;
    let obs: &[&[T]; N] = obs.try_into().map_err(|_| "Dimension mismatch")?;

    match mode {
        InterpMode::Nearest => NearestRegular::new(dims, starts, steps, vals)?.interp(obs, out),
        InterpMode::Linear => MultilinearRegular::new(dims, starts, steps, vals)?.interp(obs, out),
        InterpMode::Cubic => MulticubicRegular::new(dims, starts, steps, vals)?.interp(obs, out),
    }
}

/// Cumulative product of higher dimensions for each dimension, which is the
/// stride between blocks relating to a given index along that dimension.
#[inline]
pub(crate) fn dimprod<const N: usize>(dims: &[usize; N]) -> [usize; N] {
    let mut dimprod = [1_usize; N];
    let mut acc = 1;
    (0..N).for_each(|i| {
        dimprod[N - i - 1] = acc;
        acc *= dims[N - i - 1];
    });
    dimprod
}

/// Index a single value from an array
#[inline]
pub(crate) fn index_arr<T: Copy>(loc: &[usize], dimprod: &[usize], data: &[T]) -> T {
    let mut i = 0;
    for j in 0..dimprod.len() {
        i += loc[j] * dimprod[j];
    }

    data[i]
}

/// Shared validation for the regular-grid constructors.
pub(crate) fn check_regular<T: Float, const N: usize>(
    dims: &[usize; N],
    steps: &[T; N],
    vals: &[T],
    min_points: usize,
) -> Result<(), &'static str> {
    if N == 0 {
        return Err("Dimension mismatch");
    }
    let nvals: usize = dims.iter().product();
    if vals.len() != nvals {
        return Err("Dimension mismatch");
    }
    if dims.iter().any(|&n| n < min_points) {
        return Err("Grid has too few entries for this method");
    }
    if !steps.iter().all(|&x| x > T::zero()) {
        return Err("All grids must be monotonically increasing");
    }
    Ok(())
}

/// Evaluate a hermite spline function on an interval from x0 to x1,
/// with imposed slopes k0 and k1 at the endpoints, and normalized
/// coordinate t = (x - x0) / (x1 - x0).
#[inline]
pub(crate) fn normalized_hermite_spline<T: Float>(t: T, y0: T, dy: T, k0: T, k1: T) -> T {
    // `a` and `b` are the difference between this function and a linear one going
    // forward or backward with the imposed slopes.
    let a = k0 - dy;
    let b = -k1 + dy;

    let t2 = t * t;
    let t3 = t.powi(3);

    let c1 = dy + a;
    let c2 = b - (a + a);
    let c3 = a - b;

    y0 + (c1 * t) + (c2 * t2) + (c3 * t3)
}

/// Second-order central difference on non-uniform grid per
///
/// A. E. P. Veldman and K. Rinzema, “Playing with nonuniform grids”.
/// https://pure.rug.nl/ws/portalfiles/portal/3332271/1992JEngMathVeldman.pdf
///
/// Method B, a distance-weighted average of the forward and backward
/// differences s.t. the closer points have more influence on the estimate
/// of the derivative.
#[inline]
pub(crate) fn centered_difference_nonuniform<T: Float>(y0: T, y1: T, y2: T, h01: T, h12: T) -> T {
    let a = h01 / (h01 + h12);
    let b = (y2 - y1) / h12;
    let c = h12 / (h12 + h01);
    let d = (y1 - y0) / h01;

    a * b + c * d
}
