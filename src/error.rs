//! Error types for grid transforms.
//!
//! Every operation reports caller misuse and broken post-conditions through
//! [`GridError`]. Deprecation notices are not errors; they travel through
//! [`crate::diagnostics`].

use thiserror::Error;

/// Main error type for grid operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A caller-supplied shape or coefficient count does not fit the data.
    #[error("Shape error: {0}")]
    Shape(String),

    /// An axis or coordinate argument is outside its valid bounds.
    #[error("Range error: {0}")]
    Range(String),

    /// A post-condition the routine guarantees to itself was violated.
    #[error("Internal invariant failure: {0}")]
    InternalInvariant(String),

    /// The interpolation primitive rejected its inputs.
    #[error("Interpolation error: {0}")]
    Interpolation(String),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    /// Create a shape error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Create a range error.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Create an internal invariant failure.
    pub fn internal_invariant(msg: impl Into<String>) -> Self {
        Self::InternalInvariant(msg.into())
    }
}

/// The interpolators report failures as static strings; those surface to
/// callers as interpolation errors.
impl From<&'static str> for GridError {
    fn from(msg: &'static str) -> Self {
        Self::Interpolation(msg.to_owned())
    }
}
