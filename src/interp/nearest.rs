//! Nearest-neighbor interpolation on a regular grid.
use num_traits::{Float, NumCast};

use super::{check_regular, dimprod, index_arr};

/// An N-dimensional nearest-neighbor interpolator on a regular grid.
///
/// A point exactly halfway between two samples takes the lower one.
/// Points outside the grid take the value of the closest edge sample.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
pub struct NearestRegular<'a, T: Float, const N: usize> {
    dims: [usize; N],
    starts: [T; N],
    steps: [T; N],
    dimprod: [usize; N],
    vals: &'a [T],
}

impl<'a, T: Float, const N: usize> NearestRegular<'a, T, N> {
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

    /// Value of the sample nearest to a point.
    pub fn interp_one(&self, x: [T; N]) -> Result<T, &'static str> {
        let mut loc = [0_usize; N];
        for j in 0..N {
            loc[j] = self.get_loc(x[j], j)?;
        }
        Ok(index_arr(&loc, &self.dimprod, self.vals))
    }

    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> Result<usize, &'static str> {
        let n = self.dims[dim];
        if n < 2 {
            return Ok(0);
        }

        let floc = (v - self.starts[dim]) / self.steps[dim];
        let iloc = <isize as NumCast>::from(floc.floor())
            .ok_or("Unrepresentable coordinate value")?;
        let lower = (iloc.max(0) as usize).min(n - 2);
        let t = floc - <T as NumCast>::from(lower).ok_or("Unrepresentable coordinate value")?;

        let half = T::one() / (T::one() + T::one());
        let loc = if t <= half { lower } else { lower + 1 };
        Ok(loc.min(n - 1))
    }
}
