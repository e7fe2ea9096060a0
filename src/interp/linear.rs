//! Multilinear interpolation on a regular grid.
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Repeated_linear_interpolation
use num_traits::{Float, NumCast};

use super::{check_regular, dimprod};

/// An N-dimensional multilinear interpolator on a regular grid.
///
/// Points outside the grid are extrapolated from the nearest cell on each
/// dimension independently. A dimension with a single entry is treated as
/// constant along that dimension.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// Operation Complexity
/// * O(2^N) for interpolation and extrapolation in all regions.
pub struct MultilinearRegular<'a, T: Float, const N: usize> {
    /// Size of each dimension
    dims: [usize; N],

    /// Starting point of each dimension
    starts: [T; N],

    /// Step size for each dimension
    steps: [T; N],

    /// Cumulative products of higher dimensions, used for indexing
    dimprod: [usize; N],

    /// Values at each point, size prod(dims)
    vals: &'a [T],
}

impl<'a, T: Float, const N: usize> MultilinearRegular<'a, T, N> {
    /// Build a new interpolator, using O(N) calculations and storage.
    ///
    /// # Errors
    /// * If the number of values does not match the grid size
    /// * If any dimension is empty
    /// * If any step sizes have zero or negative magnitude
    pub fn new(
        dims: [usize; N],
        starts: [T; N],
        steps: [T; N],
        vals: &'a [T],
    ) -> Result<Self, &'static str> {
        check_regular(&dims, &steps, vals, 1)?;

        Ok(Self {
            dims,
            starts,
            steps,
            dimprod: dimprod(&dims),
            vals,
        })
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If the size of the coordinate slices does not match the output
    ///   * If a coordinate cannot be represented as a grid index
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

    /// Interpolate the value at a point,
    /// using fixed-size intermediate storage of O(N) and no allocation.
    pub fn interp_one(&self, x: [T; N]) -> Result<T, &'static str> {
        let mut origin = [0_usize; N]; // Indices of lower corner of hypercube
        let mut ts = [T::zero(); N]; // Normalized location inside the cell
        let mut ioffs = [false; N]; // Offset index for selected vertex

        for j in 0..N {
            (origin[j], ts[j]) = self.get_loc(x[j], j)?;
        }

        // Traverse vertices, summing weighted contributions.
        //
        // Every 2^nth vertex, flip which side of the cube we are examining
        // in the nth dimension. Because i % 2^n has double the period for
        // each sequential n, this visits each vertex exactly once.
        let mut interped = T::zero();
        let nverts = 1_usize << N;
        for i in 0..nverts {
            for j in 0..N {
                if i % (1_usize << j) == 0 {
                    ioffs[j] = !ioffs[j];
                }
            }

            let mut k = 0;
            let mut weight = T::one();
            for j in 0..N {
                // Saturate to the bound on single-entry dimensions
                let idx = (origin[j] + ioffs[j] as usize).min(self.dims[j] - 1);
                k += self.dimprod[j] * idx;
                weight = weight * if ioffs[j] { ts[j] } else { T::one() - ts[j] };
            }

            interped = interped + weight * self.vals[k];
        }

        Ok(interped)
    }

    /// Lower corner index and normalized offset along one dimension.
    ///
    /// The lower corner is clipped to the interior so points off the grid
    /// extrapolate from the outermost cell.
    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> Result<(usize, T), &'static str> {
        if self.dims[dim] < 2 {
            return Ok((0, T::zero()));
        }

        let floc = (v - self.starts[dim]) / self.steps[dim];
        let iloc = <isize as NumCast>::from(floc.floor())
            .ok_or("Unrepresentable coordinate value")?;
        let dimmax = self.dims[dim] - 2;
        let loc = (iloc.max(0) as usize).min(dimmax);
        let t = floc - <T as NumCast>::from(loc).ok_or("Unrepresentable coordinate value")?;

        Ok((loc, t))
    }
}

#[cfg(test)]
mod test {
    use super::MultilinearRegular;
    use crate::testing::*;
    use crate::utils::*;

    #[test]
    fn test_interp_one_2d() {
        let (nx, ny) = (3, 4);
        let x = linspace(-1.0, 1.0, nx);
        let y = linspace(2.0, 4.0, ny);
        let xy = meshgrid(Vec::from([&x, &y]));

        // z = x * y^2
        let z: Vec<f64> = (0..nx * ny).map(|i| xy[i][0] * xy[i][1] * xy[i][1]).collect();

        let dims = [nx, ny];
        let starts = [x[0], y[0]];
        let steps = [x[1] - x[0], y[1] - y[0]];
        let interpolator = MultilinearRegular::new(dims, starts, steps, &z).unwrap();

        // Check values at every incident vertex
        xy.iter().zip(z.iter()).for_each(|(xyi, zi)| {
            let zii = interpolator.interp_one([xyi[0], xyi[1]]).unwrap();
            assert!((*zi - zii).abs() < 1e-12)
        });
    }

    #[test]
    fn test_interp_random_3d_at_vertices() {
        let mut rng = rng_fixed_seed();
        let dims = [4, 3, 5];
        let n = dims.iter().product();
        let z = randn(&mut rng, n);

        let xs: Vec<Vec<f64>> = dims.iter().map(|&d| linspace(0.0, 1.0, d)).collect();
        let grid = meshgrid(xs.iter().collect());
        let obs_t = transpose_points(&grid, 3);
        let obs = [&obs_t[0][..], &obs_t[1][..], &obs_t[2][..]];

        let starts = [0.0; 3];
        let steps = [1.0 / 3.0, 0.5, 0.25];
        let mut out = vec![0.0; n];
        MultilinearRegular::new(dims, starts, steps, &z)
            .unwrap()
            .interp(&obs, &mut out)
            .unwrap();

        (0..n).for_each(|i| assert!((out[i] - z[i]).abs() < 1e-12));
    }

    #[test]
    fn test_linear_function_inside_and_outside() {
        // z = x + 2y is reproduced exactly, including off-grid
        let x = linspace(0.0, 10.0, 5);
        let y = linspace(-5.0, 5.0, 3);
        let grid = meshgrid(vec![&x, &y]);
        let z: Vec<f64> = grid.iter().map(|p| p[0] + 2.0 * p[1]).collect();

        let interpolator =
            MultilinearRegular::new([5, 3], [0.0, -5.0], [2.5, 5.0], &z).unwrap();
        for (px, py) in [(1.3, 0.7), (-2.0, 3.0), (11.0, -7.5), (10.0, 5.0)] {
            let v = interpolator.interp_one([px, py]).unwrap();
            assert!((v - (px + 2.0 * py)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_entry_dimension_is_constant() {
        let z = [1.0_f64, 3.0];
        let interpolator = MultilinearRegular::new([1, 2], [0.0, 0.0], [1.0, 1.0], &z).unwrap();
        assert!((interpolator.interp_one([0.7_f64, 0.5]).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let z = [1.0, 2.0, 3.0];
        assert!(MultilinearRegular::new([2, 2], [0.0; 2], [1.0; 2], &z).is_err());
        assert!(MultilinearRegular::new([3], [0.0], [0.0], &z).is_err());
    }
}
