//! Order form as typed by a customer.
//!
//! This is the only place where loose input is coerced: an unreadable or
//! zero quantity becomes 1 and an unreadable infill becomes the default.
//! Everything past [`QuoteForm::parse`] is validated strictly.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::catalog;
use crate::error::{Field, Result, ValidationError};
use crate::model::{DimensionInput, EstimateRequest};

/// A form value that may arrive as a number or as typed text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// Already numeric (e.g. a TOML number).
    Number(f64),
    /// Free text.
    Text(String),
}

impl FormValue {
    /// Numeric value, NaN when the text does not parse.
    pub fn to_number(&self) -> f64 {
        match self {
            FormValue::Number(n) => *n,
            FormValue::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

impl From<f64> for FormValue {
    fn from(n: f64) -> Self {
        FormValue::Number(n)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_owned())
    }
}

/// Raw order fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuoteForm {
    /// Target width (mm).
    pub width: Option<FormValue>,
    /// Target height (mm).
    pub height: Option<FormValue>,
    /// Target thickness (mm).
    pub thickness: Option<FormValue>,
    /// Pieces.
    pub quantity: Option<FormValue>,
    /// Infill (%).
    pub infill: Option<FormValue>,
    /// Material key; PLA when missing or unknown.
    pub material: Option<String>,
    /// Add-on keys.
    pub add_ons: Vec<String>,
}

impl QuoteForm {
    /// Turn the form into a validated request.
    pub fn parse(&self) -> Result<EstimateRequest> {
        let number = |v: &Option<FormValue>| v.as_ref().map_or(f64::NAN, FormValue::to_number);

        let dimensions = DimensionInput {
            width: number(&self.width),
            height: number(&self.height),
            thickness: number(&self.thickness),
            quantity: parse_quantity(self.quantity.as_ref())?,
        };
        dimensions.validate()?;

        let infill_percent = self
            .infill
            .as_ref()
            .map(FormValue::to_number)
            .filter(|p| p.is_finite());

        let material = catalog::material_or_default(self.material.as_deref().unwrap_or("pla"));
        let add_ons: BTreeSet<String> = self
            .add_ons
            .iter()
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(EstimateRequest {
            dimensions,
            infill_percent,
            material,
            add_ons,
        })
    }
}

/// Whole pieces, truncated toward zero; missing, unreadable, infinite or
/// zero means 1.
fn parse_quantity(value: Option<&FormValue>) -> Result<u32> {
    let raw = value.map_or(f64::NAN, FormValue::to_number).trunc();
    if !raw.is_finite() || raw == 0.0 {
        return Ok(1);
    }
    if raw < 0.0 || raw > f64::from(u32::MAX) {
        return Err(ValidationError::new(Field::Quantity, raw));
    }
    Ok(raw as u32)
}
