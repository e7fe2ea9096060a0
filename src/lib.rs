//! Grid resampling and reshaping utilities for acoustic field simulation.
//!
//! Fields are `ndarray` arrays of rank 1 to 3, indexed `(x)`, `(x, y)` or
//! `(x, y, z)`. Most transforms first drop singleton axes, so a `(1, n)`
//! field is treated as a vector of length `n` (see [`field::canonicalize`]).
//!
//! | Operation                 | Purpose                                              |
//! |---------------------------|------------------------------------------------------|
//! | [`extend`]                | grow a field by edge replication or constant padding |
//! | [`broadcast_axis`]        | lift a vector onto one axis of a higher-rank field   |
//! | [`min_nd`] / [`max_nd`]   | extremum value with its one-based position           |
//! | [`gradient`]              | second-order finite-difference gradient              |
//! | [`resize`]                | resample onto a grid of a different size             |
//! | [`interpftn`]             | band-limited resampling through the FFT              |
//! | [`revolve_2d_to_3d`]      | sweep an axisymmetric section into a volume          |
//! | [`regrid`]                | interpolate between two rectilinear grids            |
//!
//! Resizing (spatial and Fourier), revolution and the gradient report progress through a
//! [`diagnostics::Diagnostics`] sink. The plain entry points send events to
//! `tracing`; the `*_with` variants take an explicit sink.
//!
//! # Example
//! ```rust
//! use ndarray::array;
//! use wavegrid::{extend, max_nd, resize, InterpMode};
//!
//! let field = array![[0.0_f64, 1.0], [2.0, 3.0]];
//!
//! let padded = extend(&field, &[1], None).unwrap();
//! assert_eq!(padded.shape(), &[4, 4]);
//!
//! let fine = resize(&field, &[5, 5], InterpMode::Linear).unwrap();
//! let peak = max_nd(&fine).unwrap();
//! assert_eq!(peak.value, 3.0);
//! assert_eq!(peak.index, vec![5, 5]);
//! ```
#![allow(clippy::needless_range_loop)]

pub mod broadcast;
pub mod diagnostics;
pub mod error;
pub mod extend;
pub mod extremum;
pub mod field;
pub mod fourier;
pub mod gradient;
pub mod interp;
pub mod regrid;
pub mod resize;
pub mod revolve;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use broadcast::broadcast_axis;
pub use error::{GridError, Result};
pub use extend::{extend, PadSpec};
pub use extremum::{locate_extremum, max_nd, min_nd, Extremum, ExtremumKind};
pub use fourier::{interpftn, interpftn_with};
pub use gradient::{gradient, gradient_with, Gradient, GradientOptions, Spacing};
pub use interp::InterpMode;
pub use regrid::{regrid, Outside};
pub use resize::{resize, resize_with};
pub use revolve::{revolve_2d_to_3d, revolve_2d_to_3d_with};
