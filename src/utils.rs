//! Convenience methods for constructing grids in a way that echoes,
//! but does not exactly match, methods common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// A single point sits at `start`, and zero points give an empty vector.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = T::from(n - 1).unwrap_or_else(T::one);
            let dx: T = (stop - start) / last;
            // Pin the endpoint so unit axes end exactly at `stop`
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        stop
                    } else {
                        start + T::from(i).unwrap_or_else(T::zero) * dx
                    }
                })
                .collect()
        }
    }
}

/// Generates a meshgrid in C ordering (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn)
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

/// Split a list of points into one coordinate vector per dimension,
/// the layout the interpolators consume.
pub fn transpose_points<T: Copy>(points: &[Vec<T>], ndims: usize) -> Vec<Vec<T>> {
    (0..ndims)
        .map(|j| points.iter().map(|p| p[j]).collect())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace() {
        let x = linspace(0.0_f64, 1.0, 5);
        assert_eq!(x, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0_f64, 1.0, 1), vec![0.0]);
        assert!(linspace(0.0_f64, 1.0, 0).is_empty());

        // Endpoint is exact even when the step is not representable
        let x = linspace(0.0_f64, 1.0, 7);
        assert_eq!(x[6], 1.0);
    }

    #[test]
    fn test_meshgrid_c_order() {
        let x = vec![0.0_f64, 1.0];
        let y = vec![10.0_f64, 20.0, 30.0];
        let grid = meshgrid(vec![&x, &y]);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], vec![0.0, 10.0]);
        assert_eq!(grid[1], vec![0.0, 20.0]);
        assert_eq!(grid[3], vec![1.0, 10.0]);

        let t = transpose_points(&grid, 2);
        assert_eq!(t[0], vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(t[1], vec![10.0, 20.0, 30.0, 10.0, 20.0, 30.0]);
    }
}
