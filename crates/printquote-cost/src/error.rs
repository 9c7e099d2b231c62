//! Error types for estimation.

use std::fmt;

use printquote_mesh::ParseError;
use serde::Serialize;
use thiserror::Error;

/// Input field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Target width (mm).
    Width,
    /// Target height (mm).
    Height,
    /// Target thickness (mm).
    Thickness,
    /// Piece count.
    Quantity,
    /// Geometric volume derived from the mesh or the slab formula.
    Volume,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Width => "width",
            Field::Height => "height",
            Field::Thickness => "thickness",
            Field::Quantity => "quantity",
            Field::Volume => "volume",
        })
    }
}

/// An input was non-finite or not strictly positive.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("invalid {field}: {value} (must be finite and greater than zero)")]
pub struct ValidationError {
    /// Offending field.
    pub field: Field,
    /// Value that was rejected.
    pub value: f64,
}

impl ValidationError {
    pub(crate) fn new(field: Field, value: f64) -> Self {
        Self { field, value }
    }
}

/// Any failure on the bytes-to-price path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// The mesh could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The order inputs were rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for estimation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Ensure `value` is finite and strictly positive.
pub(crate) fn ensure_positive(value: f64, field: Field) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value))
    }
}
