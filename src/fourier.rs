//! Band-limited resampling in the frequency domain.
//!
//! Each axis whose size changes is transformed with an FFT, its spectrum is
//! truncated or zero-padded to the new length, and the result is transformed
//! back. The field is treated as one period of a periodic signal, so output
//! sample `j` on an axis resized from `n` to `p` sits at `j * n / p` in input
//! sample units.
//!
//! ```rust
//! use ndarray::Array1;
//! use wavegrid::interpftn;
//!
//! let tau = std::f64::consts::TAU;
//! let coarse = Array1::from_shape_fn(8, |i| (tau * i as f64 / 8.0).sin());
//! let fine = interpftn(&coarse, &[16]).unwrap();
//! for (j, v) in fine.iter().enumerate() {
//!     assert!((v - (tau * j as f64 / 16.0).sin()).abs() < 1e-12);
//! }
//! ```
use std::sync::Arc;

use ndarray::{ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn, Zip};
use num_complex::Complex64;
use num_traits::{Float, NumCast};
use rustfft::{Fft, FftDirection, FftPlanner};

use crate::diagnostics::{Diagnostics, Operation, Stopwatch, TracingDiagnostics};
use crate::field::canonicalize;
use crate::{GridError, Result};

/// Resample `field` to `new_size` with Fourier interpolation, reporting
/// progress through `tracing`.
pub fn interpftn<T, S, D>(field: &ArrayBase<S, D>, new_size: &[usize]) -> Result<ArrayD<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    interpftn_with(field, new_size, &TracingDiagnostics)
}

/// Resample `field` to `new_size` with Fourier interpolation, reporting
/// progress through `diagnostics`.
///
/// `new_size` lists one size per non-singleton axis of `field`. The output
/// drops the singleton axes. Axes whose size already matches are left as
/// they are.
///
/// The spectrum is split and joined at the Nyquist bin the same way on
/// every axis: when growing an even-length axis the Nyquist term is shared
/// equally between the positive and negative frequencies, and when
/// shrinking to an even length the two halves are folded back together.
///
/// # Errors
/// * If the size count differs from the number of non-singleton axes
/// * If `new_size` has a zero entry
/// * If the field is empty
pub fn interpftn_with<T, S, D>(
    field: &ArrayBase<S, D>,
    new_size: &[usize],
    diagnostics: &dyn Diagnostics,
) -> Result<ArrayD<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    let resolved = field.shape().iter().filter(|&&n| n != 1).count();
    if new_size.len() != resolved {
        return Err(GridError::shape(format!(
            "the number of scaling coefficients must equal the number of dimensions: \
             got {} for {resolved} non-singleton axes",
            new_size.len()
        )));
    }
    if new_size.contains(&0) {
        return Err(GridError::shape(format!(
            "requested size {new_size:?} must have positive entries"
        )));
    }

    let field = canonicalize(field);
    if field.is_empty() {
        return Err(GridError::shape("cannot resample an empty field"));
    }
    if new_size.is_empty() {
        return Ok(field);
    }

    let watch = Stopwatch::start(diagnostics, Operation::FourierResize);

    let samples = field
        .iter()
        .map(|v| v.to_f64())
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| GridError::range("field value is not representable as f64"))?;
    let mut y = ArrayD::from_shape_vec(field.raw_dim(), samples)
        .map_err(|e| GridError::internal_invariant(e.to_string()))?;

    let mut planner = FftPlanner::<f64>::new();
    for (axis, &p) in new_size.iter().enumerate() {
        if y.len_of(Axis(axis)) != p {
            y = resample_axis(&mut planner, &y, Axis(axis), p);
        }
    }

    let resampled = y
        .iter()
        .map(|&v| <T as NumCast>::from(v))
        .collect::<Option<Vec<T>>>()
        .ok_or_else(|| GridError::range("resampled value is not representable"))?;
    let out = ArrayD::from_shape_vec(IxDyn(new_size), resampled)
        .map_err(|e| GridError::internal_invariant(e.to_string()))?;

    watch.finish();
    Ok(out)
}

/// Resample every lane of `y` along `axis` to `p` samples.
fn resample_axis(
    planner: &mut FftPlanner<f64>,
    y: &ArrayD<f64>,
    axis: Axis,
    p: usize,
) -> ArrayD<f64> {
    let n = y.len_of(axis);
    let forward: Arc<dyn Fft<f64>> = planner.plan_fft(n, FftDirection::Forward);
    let inverse: Arc<dyn Fft<f64>> = planner.plan_fft(p, FftDirection::Inverse);

    let zero = Complex64::new(0.0, 0.0);
    let scratch_len = forward
        .get_inplace_scratch_len()
        .max(inverse.get_inplace_scratch_len());
    let mut scratch = vec![zero; scratch_len];
    let mut spectrum = vec![zero; n];
    let mut resized = vec![zero; p];

    // Inverse transforms are unnormalized; scaling by 1/n also applies the
    // p/n amplitude correction for the change in length
    let scale = 1.0 / n as f64;

    let mut shape = y.shape().to_vec();
    shape[axis.index()] = p;
    let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));

    Zip::from(out.lanes_mut(axis))
        .and(y.lanes(axis))
        .for_each(|mut dst, src| {
            for (c, &v) in spectrum.iter_mut().zip(src.iter()) {
                *c = Complex64::new(v, 0.0);
            }
            forward.process_with_scratch(&mut spectrum, &mut scratch);
            resize_spectrum(&spectrum, &mut resized);
            inverse.process_with_scratch(&mut resized, &mut scratch);
            for (d, c) in dst.iter_mut().zip(resized.iter()) {
                *d = c.re * scale;
            }
        });

    out
}

/// Copy the low frequencies of `x` into `y`, zeroing the rest.
fn resize_spectrum(x: &[Complex64], y: &mut [Complex64]) {
    let (nx, num) = (x.len(), y.len());
    y.fill(Complex64::new(0.0, 0.0));

    let n = nx.min(num);
    let nyq = n / 2 + 1;
    y[..nyq].copy_from_slice(&x[..nyq]);
    if n > 2 {
        let negative = n - nyq;
        y[num - negative..].copy_from_slice(&x[nx - negative..]);
    }

    // So far y holds the +n/2 term only
    if n % 2 == 0 {
        let half = n / 2;
        if num < nx {
            y[half] += x[nx - half];
        } else if nx < num {
            y[half] *= 0.5;
            y[num - half] = y[half];
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnostics::{Event, RecordingDiagnostics};
    use crate::testing::max_abs_diff;
    use ndarray::{Array1, Array2, Array3};
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_upsample_band_limited_sine() {
        let coarse = Array1::from_shape_fn(8, |i| (TAU * i as f64 / 8.0).sin());
        let fine = interpftn(&coarse, &[16]).unwrap();
        let expected = Array1::from_shape_fn(16, |j| (TAU * j as f64 / 16.0).sin()).into_dyn();
        assert_eq!(fine.shape(), &[16]);
        assert!(max_abs_diff(&fine, &expected) < 1e-12);
    }

    #[test]
    fn test_downsample_band_limited_sine() {
        let fine = Array1::from_shape_fn(16, |i| 2.0 + (TAU * i as f64 / 16.0).cos());
        let coarse = interpftn(&fine, &[8]).unwrap();
        let expected = Array1::from_shape_fn(8, |j| 2.0 + (TAU * j as f64 / 8.0).cos()).into_dyn();
        assert!(max_abs_diff(&coarse, &expected) < 1e-12);
    }

    #[test]
    fn test_nyquist_term_is_split_when_growing() {
        let alternating = Array1::from_vec(vec![1.0_f64, -1.0, 1.0, -1.0]);
        let out = interpftn(&alternating, &[8]).unwrap();
        let expected = Array1::from_shape_fn(8, |j| (PI * j as f64 / 2.0).cos()).into_dyn();
        assert!(max_abs_diff(&out, &expected) < 1e-12);
    }

    #[test]
    fn test_constant_field_stays_constant() {
        let field = Array2::from_elem((4, 6), 3.5_f64);
        let out = interpftn(&field, &[8, 3]).unwrap();
        assert_eq!(out.shape(), &[8, 3]);
        assert!(out.iter().all(|v| (v - 3.5).abs() < 1e-12));
    }

    #[test]
    fn test_separable_2d() {
        let f = |i: f64, j: f64, ni: f64, nj: f64| (TAU * i / ni).cos() * (TAU * j / nj).sin();
        let field = Array2::from_shape_fn((4, 6), |(i, j)| f(i as f64, j as f64, 4.0, 6.0));
        let out = interpftn(&field, &[8, 12]).unwrap();
        let expected =
            Array2::from_shape_fn((8, 12), |(i, j)| f(i as f64, j as f64, 8.0, 12.0)).into_dyn();
        assert!(max_abs_diff(&out, &expected) < 1e-12);
    }

    #[test]
    fn test_matching_size_is_unchanged() {
        let field = Array2::from_shape_fn((3, 5), |(i, j)| (i * 5 + j) as f64);
        let out = interpftn(&field, &[3, 5]).unwrap();
        assert_eq!(out, field.into_dyn());
    }

    #[test]
    fn test_singleton_axes_are_dropped() {
        let field = Array3::from_shape_fn((1, 8, 1), |(_, j, _)| (TAU * j as f64 / 8.0).sin());
        let out = interpftn(&field, &[16]).unwrap();
        assert_eq!(out.shape(), &[16]);
        assert!((out[[4]] - 1.0).abs() < 1e-12);

        let cell = Array2::from_elem((1, 1), 2.0_f64);
        let out = interpftn(&cell, &[]).unwrap();
        assert_eq!(out.shape(), &[1, 1]);
    }

    #[test]
    fn test_size_count_must_match_resolved_axes() {
        let row = Array2::<f64>::zeros((1, 8));
        assert!(matches!(interpftn(&row, &[4, 4]), Err(GridError::Shape(_))));
        assert!(interpftn(&row, &[4]).is_ok());

        let plane = Array2::<f64>::zeros((4, 8));
        assert!(matches!(interpftn(&plane, &[4]), Err(GridError::Shape(_))));
        assert!(matches!(interpftn(&plane, &[4, 0]), Err(GridError::Shape(_))));
    }

    #[test]
    fn test_single_precision() {
        let coarse = Array1::from_shape_fn(6, |i| (TAU * i as f64 / 6.0).sin() as f32);
        let fine = interpftn(&coarse, &[12]).unwrap();
        for (j, v) in fine.iter().enumerate() {
            assert!((*v as f64 - (TAU * j as f64 / 12.0).sin()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_reports_progress() {
        let sink = RecordingDiagnostics::new();
        let field = Array1::from_elem(5, 1.0_f64);
        interpftn_with(&field, &[9], &sink).unwrap();
        assert_eq!(
            sink.events(),
            vec![
                Event::Started(Operation::FourierResize),
                Event::Completed(Operation::FourierResize),
            ]
        );

        let sink = RecordingDiagnostics::new();
        assert!(interpftn_with(&field, &[9, 9], &sink).is_err());
        assert!(sink.events().is_empty());
    }
}
