//! Enlarge a field by extending its edge values or padding with a constant.
//!
//! Indexing follows the simulator's `mat(x)`, `mat(x, y)`, `mat(x, y, z)`
//! layout: coefficients are listed per axis in axis order.
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};
use num_traits::ToPrimitive;

use crate::field::canonicalize;
use crate::{GridError, Result};

/// Per-axis `(before, after)` extension amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadSpec(pub Vec<(usize, usize)>);

impl PadSpec {
    /// Decompose a coefficient list for a field of the given rank.
    ///
    /// * one coefficient `[a]` extends every side of every axis by `a`
    /// * `rank` coefficients `[x, y, z]` extend both sides of each axis
    /// * `2 * rank` coefficients `[x_start, x_end, y_start, y_end, ...]`
    ///
    /// Coefficients are truncated toward zero and negative values clamp to zero.
    ///
    /// # Errors
    /// * If the coefficient count is not 1, `rank` or `2 * rank`
    pub fn from_coefficients<C: ToPrimitive>(coeffs: &[C], rank: usize) -> Result<Self> {
        let amounts: Vec<usize> = coeffs.iter().map(coerce_coefficient).collect();

        let pads = match amounts.len() {
            1 => vec![(amounts[0], amounts[0]); rank],
            n if n == rank => amounts.iter().map(|&a| (a, a)).collect(),
            n if n == 2 * rank => amounts.chunks_exact(2).map(|c| (c[0], c[1])).collect(),
            n => {
                return Err(GridError::shape(format!(
                    "expected 1, {rank} or {} coefficients for a rank {rank} field, got {n}",
                    2 * rank
                )))
            }
        };

        Ok(Self(pads))
    }

    /// Shape of a field of `shape` after extension.
    pub fn extended_shape(&self, shape: &[usize]) -> Vec<usize> {
        shape
            .iter()
            .zip(self.0.iter())
            .map(|(n, (before, after))| before + n + after)
            .collect()
    }
}

fn coerce_coefficient<C: ToPrimitive>(c: &C) -> usize {
    match c.to_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as usize,
        _ => 0,
    }
}

/// Enlarge a field by `coeffs` samples per side (see [`PadSpec::from_coefficients`]).
///
/// With `edge_value` unset, each new sample takes the value of the nearest
/// original sample along every axis, which is the result of replicating the
/// outer faces one axis after another. With `edge_value` set, every new sample
/// takes that value.
///
/// The field is canonicalized first, so singleton axes are dropped and the
/// coefficient count refers to the remaining axes.
///
/// # Errors
/// * If the coefficient count is invalid for the canonical rank
/// * If the field is empty and no `edge_value` is given
pub fn extend<T, S, D, C>(
    field: &ArrayBase<S, D>,
    coeffs: &[C],
    edge_value: Option<T>,
) -> Result<ArrayD<T>>
where
    T: Clone,
    S: Data<Elem = T>,
    D: Dimension,
    C: ToPrimitive,
{
    let field = canonicalize(field);
    let pads = PadSpec::from_coefficients(coeffs, field.ndim())?;
    let shape = pads.extended_shape(field.shape());

    let extended = match edge_value {
        Some(value) => {
            let mut out = ArrayD::from_elem(IxDyn(&shape), value);
            let mut src = vec![0_usize; field.ndim()];
            for (idx, v) in field.indexed_iter() {
                for (j, s) in src.iter_mut().enumerate() {
                    *s = idx[j] + pads.0[j].0;
                }
                out[IxDyn(&src)] = v.clone();
            }
            out
        }
        None => {
            if field.is_empty() {
                return Err(GridError::shape("cannot replicate the edges of an empty field"));
            }
            let dims = field.shape().to_vec();
            let mut src = vec![0_usize; field.ndim()];
            ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
                for (j, s) in src.iter_mut().enumerate() {
                    *s = idx[j].saturating_sub(pads.0[j].0).min(dims[j] - 1);
                }
                field[IxDyn(&src)].clone()
            })
        }
    };

    Ok(extended)
}
