//! Multicubic interpolation on a regular grid.
//!
//! Inside the grid this is a piecewise Hermite spline whose first
//! derivative is continuous across cell faces. Slopes at each grid point are matched to a
//! second-order central difference, so no coefficients are solved for or
//! stored and each observation depends only on its 4^N neighborhood.
//!
//! In the last interval before each boundary, a natural spline condition
//! (third derivative zero at the last grid point) makes the interpolant
//! quadratic, which avoids the wobble a full cubic would introduce where
//! there is not enough data to support it. Points off the grid continue the
//! boundary interval's quadratic.
use num_traits::{Float, NumCast};

use super::{check_regular, dimprod, normalized_hermite_spline};

/// Footprint size
pub(crate) const FP: usize = 4;

#[derive(Clone, Copy, PartialEq)]
enum Saturation {
    None,
    Low,
    High,
}

/// An N-dimensional multicubic interpolator on a regular grid.
///
/// Every dimension must have at least four entries.
///
/// `vals` is in row-major order, last axis fastest.
///
/// Operation Complexity
/// * O(4^N) for interpolation and extrapolation in all regions.
///
/// Memory Complexity
/// * Evaluation recurses once per dimension, so peak stack usage is O(N).
pub struct MulticubicRegular<'a, T: Float, const N: usize> {
    dims: [usize; N],
    starts: [T; N],
    steps: [T; N],
    dimprod: [usize; N],
    vals: &'a [T],
}

impl<'a, T: Float, const N: usize> MulticubicRegular<'a, T, N> {
    /// Validate the grid and borrow its values.
    ///
    /// # Errors
    /// * If the number of values does not match the grid size
    /// * If any axis has fewer than four samples
    /// * If any step is not positive
    pub fn new(
        dims: [usize; N],
        starts: [T; N],
        steps: [T; N],
        vals: &'a [T],
    ) -> Result<Self, &'static str> {
        check_regular(&dims, &steps, vals, FP)
            .map_err(|e| match e {
                "Grid has too few entries for this method" => {
                    "All grids must have at least four entries"
                }
                other => other,
            })?;

        Ok(Self {
            dims,
            starts,
            steps,
            dimprod: dimprod(&dims),
            vals,
        })
    }

    /// Evaluate at `out.len()` points given as one coordinate slice per axis.
    pub fn interp(&self, x: &[&[T]; N], out: &mut [T]) -> Result<(), &'static str> {
        if !x.iter().all(|xx| xx.len() == out.len()) {
            return Err("Dimension mismatch");
        }

        let mut tmp = [T::zero(); N];
        for i in 0..out.len() {
            (0..N).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_one(tmp)?;
        }

        Ok(())
    }

    /// Interpolate the value at a point.
    pub fn interp_one(&self, x: [T; N]) -> Result<T, &'static str> {
        let mut origin = [0_usize; N]; // Indices of lower corner of the 4-cube
        let mut sat = [Saturation::None; N];
        let mut dts = [T::zero(); N]; // Normalized coordinate w.r.t. cube index 1

        for i in 0..N {
            (origin[i], sat[i]) = self.get_loc(x[i], i)?;
            let index_one_loc = self.starts[i]
                + self.steps[i]
                    * <T as NumCast>::from(origin[i] + 1)
                        .ok_or("Unrepresentable coordinate value")?;
            dts[i] = (x[i] - index_one_loc) / self.steps[i];
        }

        Ok(self.interp_dim(0, 0, &origin, &dts, &sat))
    }

    /// Reduce one dimension of the footprint, recursing into the next
    /// dimension for each of the four samples along this one.
    fn interp_dim(
        &self,
        dim: usize,
        offset: usize,
        origin: &[usize; N],
        dts: &[T; N],
        sat: &[Saturation; N],
    ) -> T {
        let mut store = [T::zero(); FP];
        for (p, s) in store.iter_mut().enumerate() {
            let k = offset + (origin[dim] + p) * self.dimprod[dim];
            *s = if dim + 1 == N {
                self.vals[k]
            } else {
                self.interp_dim(dim + 1, k, origin, dts, sat)
            };
        }
        interp_inner(&store, dts[dim], sat[dim])
    }

    /// Get the two-lower index along this dimension where `x` is found,
    /// saturating to the bounds at the edges if necessary.
    ///
    /// At the high bound of a given dimension, saturates to the fourth internal
    /// point in order to capture a full 4-cube.
    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> Result<(usize, Saturation), &'static str> {
        let floc = ((v - self.starts[dim]) / self.steps[dim]).floor();
        // Bottom of the cell aligned to place t=0 at cube index 1
        let iloc = <isize as NumCast>::from(floc).ok_or("Unrepresentable coordinate value")? - 1;

        let n = self.dims[dim] as isize;
        let dimmax = (n - 4).max(0);
        let loc = iloc.max(0).min(dimmax) as usize;

        let saturation = if iloc < 0 {
            Saturation::Low
        } else if iloc >= n - 3 {
            Saturation::High
        } else {
            Saturation::None
        };

        Ok((loc, saturation))
    }
}

/// Calculate slopes and offsets & select evaluation method
#[inline]
fn interp_inner<T: Float>(vals: &[T; FP], t: T, sat: Saturation) -> T {
    let one = T::one();
    let two = one + one;

    match sat {
        Saturation::None => {
            //       |-> t
            // --|---|---|---|--
            //         x
            let y0 = vals[1];
            let dy = vals[2] - vals[1];

            // Take slopes from centered difference
            let k0 = (vals[2] - vals[0]) / two;
            let k1 = (vals[3] - vals[1]) / two;

            normalized_hermite_spline(t, y0, dy, k0, k1)
        }
        Saturation::Low => {
            //   t <-|
            // --|---|---|---|--
            //     x
            //
            // Flip direction to maintain symmetry with the high side
            let t = -t;
            let y0 = vals[1];
            let dy = vals[0] - vals[1];

            let k0 = -(vals[2] - vals[0]) / two;
            let k1 = two * dy - k0; // Natural spline boundary condition

            normalized_hermite_spline(t, y0, dy, k0, k1)
        }
        Saturation::High => {
            //           |-> t
            // --|---|---|---|--
            //             x
            //
            // Shift cell up an index; `t` is measured from index 1
            let t = t - one;
            let y0 = vals[2];
            let dy = vals[3] - vals[2];

            let k0 = (vals[3] - vals[1]) / two;
            let k1 = two * dy - k0; // Natural spline boundary condition

            normalized_hermite_spline(t, y0, dy, k0, k1)
        }
    }
}

#[cfg(test)]
mod test {
    use super::MulticubicRegular;
    use crate::utils::*;

    /// A hermite spline with natural boundary condition
    /// reproduces an N-dimensional quadratic function exactly.
    #[test]
    fn test_interp_1d_to_3d_quadratic() {
        for ndims in 1..=3 {
            let dims: Vec<usize> = vec![5; ndims];
            let xs: Vec<Vec<f64>> = (0..ndims)
                .map(|i| linspace(-5.0 * (i as f64), 5.0 * ((i + 1) as f64), dims[i]))
                .collect();
            let grid = meshgrid((0..ndims).map(|i| &xs[i]).collect());
            let u: Vec<f64> = grid.iter().map(|p| p.iter().map(|v| v * v).sum()).collect();
            let starts: Vec<f64> = xs.iter().map(|x| x[0]).collect();
            let steps: Vec<f64> = xs.iter().map(|x| x[1] - x[0]).collect();

            // Observation points, including a little way off the grid
            let xobs: Vec<Vec<f64>> = (0..ndims)
                .map(|i| linspace(-6.0 * (i as f64), 6.0 * ((i + 1) as f64), dims[i] + 3))
                .collect();
            let gridobs = meshgrid((0..ndims).map(|i| &xobs[i]).collect());
            let uobs: Vec<f64> = gridobs
                .iter()
                .map(|p| p.iter().map(|v| v * v).sum())
                .collect();
            let obs_t = transpose_points(&gridobs, ndims);

            for i in 0..gridobs.len() {
                let v = match ndims {
                    1 => MulticubicRegular::new([dims[0]], [starts[0]], [steps[0]], &u)
                        .unwrap()
                        .interp_one([obs_t[0][i]]),
                    2 => MulticubicRegular::new(
                        [dims[0], dims[1]],
                        [starts[0], starts[1]],
                        [steps[0], steps[1]],
                        &u,
                    )
                    .unwrap()
                    .interp_one([obs_t[0][i], obs_t[1][i]]),
                    _ => MulticubicRegular::new(
                        [dims[0], dims[1], dims[2]],
                        [starts[0], starts[1], starts[2]],
                        [steps[0], steps[1], steps[2]],
                        &u,
                    )
                    .unwrap()
                    .interp_one([obs_t[0][i], obs_t[1][i], obs_t[2][i]]),
                }
                .unwrap();
                assert!((v - uobs[i]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_requires_four_entries() {
        let z = [0.0; 3];
        let r = MulticubicRegular::new([3], [0.0], [1.0], &z);
        assert!(matches!(r, Err("All grids must have at least four entries")));
    }
}
