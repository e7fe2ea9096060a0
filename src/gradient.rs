//! Finite-difference gradient of a sampled field.
//!
//! Interior samples use a second-order centered difference. The first and
//! last sample along each axis use a first-order forward or backward
//! difference, so every derivative keeps the input shape. An axis of length
//! one has zero derivative.
use ndarray::{ArrayBase, ArrayD, ArrayView1, ArrayViewMut1, Axis, Data, Dimension, Zip};
use num_traits::Float;

use crate::diagnostics::{Diagnostics, Event, Operation, Stopwatch, TracingDiagnostics};
use crate::interp::centered_difference_nonuniform;
use crate::{GridError, Result};

const DEFAULT_DERIV_ORDER: u32 = 1;
const DEFAULT_ACCURACY_ORDER: u32 = 2;

/// Sample spacing along the differentiated axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Spacing<T> {
    /// One spacing shared by every axis.
    Uniform(T),
    /// One spacing per axis, or a single entry shared by every axis.
    PerAxis(Vec<T>),
    /// Sample coordinates per axis, or a single coordinate list shared by
    /// every axis. Each list must match the length of its axis.
    Coordinates(Vec<Vec<T>>),
}

/// Gradient configuration.
///
/// `deriv_order` and `accuracy_order` are deprecated: a value other than the
/// defaults (1 and 2) is reported through the diagnostics sink and ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientOptions<T> {
    pub spacing: Option<Spacing<T>>,
    pub axis: Option<usize>,
    pub deriv_order: Option<u32>,
    pub accuracy_order: Option<u32>,
}

impl<T> Default for GradientOptions<T> {
    fn default() -> Self {
        Self {
            spacing: None,
            axis: None,
            deriv_order: None,
            accuracy_order: None,
        }
    }
}

impl<T> GradientOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: Spacing<T>) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Differentiate along a single axis only.
    pub fn along(mut self, axis: usize) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_deriv_order(mut self, order: u32) -> Self {
        self.deriv_order = Some(order);
        self
    }

    pub fn with_accuracy_order(mut self, order: u32) -> Self {
        self.accuracy_order = Some(order);
        self
    }
}

/// Result of [`gradient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient<T> {
    /// Derivative along the requested axis.
    Single(ArrayD<T>),
    /// Derivatives along every axis, in axis order.
    PerAxis(Vec<ArrayD<T>>),
}

impl<T> Gradient<T> {
    /// All derivatives as a list, in axis order.
    pub fn into_vec(self) -> Vec<ArrayD<T>> {
        match self {
            Gradient::Single(d) => vec![d],
            Gradient::PerAxis(ds) => ds,
        }
    }
}

/// Spacing resolved for one axis.
enum AxisSpacing<'a, T> {
    Step(T),
    Coords(&'a [T]),
}

/// Gradient of `field`, reporting progress and deprecated options through
/// `tracing`.
pub fn gradient<T, S, D>(
    field: &ArrayBase<S, D>,
    options: &GradientOptions<T>,
) -> Result<Gradient<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    gradient_with(field, options, &TracingDiagnostics)
}

/// Gradient of `field`, reporting progress and deprecated options through
/// `diagnostics`.
///
/// # Errors
/// * If `options.axis` is not below the field's rank
/// * If the spacing list length does not match the rank, or a coordinate
///   list does not match its axis length
/// * If a uniform spacing is zero or not finite
/// * If a coordinate list is not strictly increasing
pub fn gradient_with<T, S, D>(
    field: &ArrayBase<S, D>,
    options: &GradientOptions<T>,
    diagnostics: &dyn Diagnostics,
) -> Result<Gradient<T>>
where
    T: Float,
    S: Data<Elem = T>,
    D: Dimension,
{
    if options.deriv_order.is_some_and(|o| o != DEFAULT_DERIV_ORDER) {
        diagnostics.report(&Event::Deprecated("deriv_order"), None);
    }
    if options
        .accuracy_order
        .is_some_and(|o| o != DEFAULT_ACCURACY_ORDER)
    {
        diagnostics.report(&Event::Deprecated("accuracy_order"), None);
    }

    let field = field.view().into_dyn();
    let rank = field.ndim();

    let axes: Vec<usize> = match options.axis {
        Some(axis) if axis >= rank => {
            return Err(GridError::range(format!(
                "axis {axis} is out of bounds for a rank {rank} field"
            )))
        }
        Some(axis) => vec![axis],
        None => (0..rank).collect(),
    };
    let spacings = axes
        .iter()
        .map(|&axis| axis_spacing(options.spacing.as_ref(), axis, rank, field.shape()[axis]))
        .collect::<Result<Vec<_>>>()?;

    let watch = Stopwatch::start(diagnostics, Operation::Gradient);
    let mut derivatives: Vec<ArrayD<T>> = axes
        .iter()
        .zip(spacings.iter())
        .map(|(&axis, spacing)| diff_axis(&field, axis, spacing))
        .collect();
    watch.finish();

    match options.axis {
        Some(_) => derivatives
            .pop()
            .map(Gradient::Single)
            .ok_or_else(|| GridError::internal_invariant("no derivative was computed")),
        None => Ok(Gradient::PerAxis(derivatives)),
    }
}

fn axis_spacing<'a, T: Float>(
    spacing: Option<&'a Spacing<T>>,
    axis: usize,
    rank: usize,
    len: usize,
) -> Result<AxisSpacing<'a, T>> {
    let resolved = match spacing {
        None => AxisSpacing::Step(T::one()),
        Some(Spacing::Uniform(h)) => AxisSpacing::Step(*h),
        Some(Spacing::PerAxis(hs)) => AxisSpacing::Step(*pick(hs, axis, rank, "spacing")?),
        Some(Spacing::Coordinates(xs)) => {
            let coords = pick(xs, axis, rank, "coordinate")?;
            if coords.len() != len {
                return Err(GridError::shape(format!(
                    "axis {axis} has {len} samples but {} coordinates",
                    coords.len()
                )));
            }
            if !coords.windows(2).all(|w| w[1] > w[0]) {
                return Err(GridError::range(format!(
                    "coordinates along axis {axis} must be strictly increasing"
                )));
            }
            AxisSpacing::Coords(coords)
        }
    };

    if let AxisSpacing::Step(h) = resolved {
        if h.is_zero() || !h.is_finite() {
            return Err(GridError::range("grid spacing must be finite and non-zero"));
        }
    }
    Ok(resolved)
}

/// Entry for `axis` from a list holding either one shared entry or one per axis.
fn pick<'a, E>(list: &'a [E], axis: usize, rank: usize, what: &str) -> Result<&'a E> {
    match list.len() {
        1 => Ok(&list[0]),
        n if n == rank => Ok(&list[axis]),
        n => Err(GridError::shape(format!(
            "expected 1 or {rank} {what} entries for a rank {rank} field, got {n}"
        ))),
    }
}

fn diff_axis<T: Float>(
    field: &ndarray::ArrayViewD<'_, T>,
    axis: usize,
    spacing: &AxisSpacing<'_, T>,
) -> ArrayD<T> {
    let mut out = ArrayD::zeros(field.raw_dim());
    Zip::from(out.lanes_mut(Axis(axis)))
        .and(field.lanes(Axis(axis)))
        .for_each(|o, f| match spacing {
            AxisSpacing::Step(h) => diff_lane_uniform(f, o, *h),
            AxisSpacing::Coords(x) => diff_lane_coords(f, o, x),
        });
    out
}

fn diff_lane_uniform<T: Float>(f: ArrayView1<'_, T>, mut out: ArrayViewMut1<'_, T>, h: T) {
    let n = f.len();
    if n < 2 {
        return;
    }
    let two_h = h + h;

    out[0] = (f[1] - f[0]) / h;
    for i in 1..n - 1 {
        out[i] = (f[i + 1] - f[i - 1]) / two_h;
    }
    out[n - 1] = (f[n - 1] - f[n - 2]) / h;
}

fn diff_lane_coords<T: Float>(f: ArrayView1<'_, T>, mut out: ArrayViewMut1<'_, T>, x: &[T]) {
    let n = f.len();
    if n < 2 {
        return;
    }

    out[0] = (f[1] - f[0]) / (x[1] - x[0]);
    for i in 1..n - 1 {
        out[i] = centered_difference_nonuniform(
            f[i - 1],
            f[i],
            f[i + 1],
            x[i] - x[i - 1],
            x[i + 1] - x[i],
        );
    }
    out[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);
}
