//! One-dimensional linear interpolation on a regular grid, with a fill
//! value outside the grid. Revolution evaluates one of these per slice.

use num_traits::{Float, NumCast};

/// Extrapolation flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// The cell bracketing an observation point, and where the point lies
/// relative to the grid.
pub struct GridSample<T> {
    pub x0: T,
    pub y0: T,
    pub x1: T,
    pub y1: T,
    pub extrap: Extrap,
}

/// Interpolant over a single axis.
pub trait Interp1D<T: Float> {
    /// Value at `loc`.
    fn eval_one(&self, loc: T) -> Result<T, &'static str>;

    /// Values at each of `locs`, written to `out`.
    #[inline]
    fn eval(&self, locs: &[T], out: &mut [T]) -> Result<(), &'static str> {
        if locs.len() != out.len() {
            return Err("Length mismatch");
        }

        for i in 0..locs.len() {
            out[i] = self.eval_one(locs[i])?;
        }

        Ok(())
    }
}

/// Samples at `start`, `start + step`, `start + 2 * step`, ...
#[derive(Clone, Copy)]
pub struct RegularGrid1D<'a, T: Float> {
    start: T,
    stop: T,
    step: T,
    vals: &'a [T],
}

impl<'a, T: Float> RegularGrid1D<'a, T> {
    /// # Errors
    /// * If `vals` is empty
    /// * If `step` is not positive
    pub fn new(start: T, step: T, vals: &'a [T]) -> Result<Self, &'static str> {
        if vals.is_empty() {
            return Err("Grid must have at least one entry");
        }
        if step <= T::zero() {
            return Err("All grids must be monotonically increasing");
        }
        let stop =
            start + step * <T as NumCast>::from(vals.len() - 1).ok_or("Unrepresentable number")?;
        Ok(Self {
            start,
            stop,
            step,
            vals,
        })
    }

    /// Lower sample of the cell holding `loc`, clamped to the outermost cells
    #[inline]
    pub fn index(&self, loc: T) -> Result<(usize, Extrap), &'static str> {
        let extrap = match loc {
            x if x > self.stop => Extrap::OutsideHigh,
            x if x < self.start => Extrap::OutsideLow,
            _ => Extrap::Inside,
        };

        if self.vals.len() < 2 {
            return Ok((0, extrap));
        }

        let i = T::floor((loc - self.start) / self.step);

        // Clip to inside of grid
        let i = <isize as NumCast>::from(i)
            .ok_or("Unrepresentable number")?
            .max(0)
            .min((self.vals.len() - 2) as isize) as usize;

        Ok((i, extrap))
    }

    /// Values and locations bracketing an observation point.
    ///
    /// Outside the grid, the outermost cell is returned. A single-entry
    /// grid reports a flat cell one step wide.
    #[inline]
    pub fn at(&self, loc: T) -> Result<GridSample<T>, &'static str> {
        let (i, extrap) = self.index(loc)?;

        let x0 = self.start + self.step * <T as NumCast>::from(i).ok_or("Unrepresentable number")?;
        let x1 = x0 + self.step;

        let y0 = self.vals[i];
        let y1 = *self.vals.get(i + 1).unwrap_or(&y0);

        Ok(GridSample {
            x0,
            y0,
            x1,
            y1,
            extrap,
        })
    }
}

/// Linear interpolation inside the grid, with a fixed fill value outside.
pub struct Linear1D<'a, T: Float> {
    grid: RegularGrid1D<'a, T>,
    fill: T,
}

impl<'a, T: Float> Linear1D<'a, T> {
    /// Linear interpolation, returning `fill` anywhere outside the grid.
    pub fn with_fill(grid: RegularGrid1D<'a, T>, fill: T) -> Self {
        Self { grid, fill }
    }
}

impl<'a, T: Float> Interp1D<T> for Linear1D<'a, T> {
    #[inline]
    fn eval_one(&self, loc: T) -> Result<T, &'static str> {
        let GridSample {
            x0,
            y0,
            x1,
            y1,
            extrap,
        } = self.grid.at(loc)?;

        match extrap {
            Extrap::OutsideLow | Extrap::OutsideHigh => Ok(self.fill),
            Extrap::Inside => {
                let slope = (y1 - y0) / (x1 - x0);
                Ok(y0 + slope * (loc - x0))
            }
        }
    }
}
