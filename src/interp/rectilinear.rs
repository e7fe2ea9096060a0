//! Multilinear interpolation on a rectilinear grid, where each axis may have
//! uneven spacing.
use num_traits::Float;

use super::{dimprod, index_arr};

/// An N-dimensional multilinear interpolator on a rectilinear grid.
///
/// Rectilinear methods perform a bisection search to find the relevant grid
/// cell, which takes a worst-case number of iterations of log2(number of grid elements).
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
pub struct MultilinearRectilinear<'a, T: Float, const N: usize> {
    /// x, y, ... coordinate grids, each entry of size dims[i]
    grids: [&'a [T]; N],

    /// Cumulative products of higher dimensions, used for indexing
    dimprod: [usize; N],

    /// Values at each point, size prod(dims)
    vals: &'a [T],
}

impl<'a, T: Float, const N: usize> MultilinearRectilinear<'a, T, N> {
    /// Build a new interpolator, using O(N) calculations and storage.
    ///
    /// # Errors
    /// * If the number of values does not match the grid size
    /// * If any grid is empty or not strictly increasing
    pub fn new(grids: [&'a [T]; N], vals: &'a [T]) -> Result<Self, &'static str> {
        let mut dims = [0_usize; N];
        (0..N).for_each(|i| dims[i] = grids[i].len());

        let nvals: usize = dims.iter().product();
        if N == 0 || vals.len() != nvals {
            return Err("Dimension mismatch");
        }
        if dims.iter().any(|&n| n == 0) {
            return Err("Grid must have at least one entry");
        }
        let increasing = grids.iter().all(|g| g.windows(2).all(|w| w[1] > w[0]));
        if !increasing {
            return Err("All grids must be monotonically increasing");
        }

        Ok(Self {
            grids,
            dimprod: dimprod(&dims),
            vals,
        })
    }

    /// Whether a point lies inside the grid's bounds, edges included.
    pub fn contains(&self, x: &[T; N]) -> bool {
        (0..N).all(|j| {
            let g = self.grids[j];
            x[j] >= g[0] && x[j] <= g[g.len() - 1]
        })
    }

    /// Interpolate the value at a point, extrapolating from the outermost
    /// cell on each dimension for points outside the grid.
    pub fn interp_one(&self, x: [T; N]) -> T {
        let mut origin = [0_usize; N];
        let mut ts = [T::zero(); N];
        for j in 0..N {
            (origin[j], ts[j]) = self.get_loc(x[j], j);
        }

        let mut loc = [0_usize; N];
        let mut interped = T::zero();
        for i in 0..(1_usize << N) {
            let mut weight = T::one();
            for j in 0..N {
                let upper = (i >> j) & 1 == 1;
                loc[j] = (origin[j] + upper as usize).min(self.grids[j].len() - 1);
                weight = weight * if upper { ts[j] } else { T::one() - ts[j] };
            }
            interped = interped + weight * index_arr(&loc, &self.dimprod, self.vals);
        }

        interped
    }

    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> (usize, T) {
        let grid = self.grids[dim];
        if grid.len() < 2 {
            return (0, T::zero());
        }

        let above = grid.partition_point(|x| *x < v);
        let i = above.saturating_sub(1).min(grid.len() - 2);
        let t = (v - grid[i]) / (grid[i + 1] - grid[i]);
        (i, t)
    }
}
