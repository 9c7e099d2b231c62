#![warn(missing_docs)]

//! 3D print pricing for printquote.
//!
//! Converts a geometric volume into a priced order: infill adjustment,
//! material mass and cost, machine time, add-ons, quantity discounts, a
//! one-off setup fee and a minimum unit price. The volume comes either from
//! a decoded mesh stretched to the requested size or from a plain
//! `width × height × thickness` slab.
//!
//! # Example
//!
//! ```ignore
//! use printquote_cost::{quote, QuoteForm};
//!
//! let form: QuoteForm = toml::from_str(&std::fs::read_to_string("order.toml")?)?;
//! let bytes = std::fs::read("keychain.stl")?;
//! let quote = quote(Some(&bytes), &form.parse()?)?;
//! println!("{:.2} per piece", quote.pricing.unit_price);
//! ```

pub mod catalog;
pub mod error;
pub mod form;
pub mod model;
pub mod rates;
pub mod scaling;

pub use catalog::{add_on, material, material_or_default, AddOn, MaterialProfile, ADD_ONS, MATERIALS};
pub use error::{EstimateError, Field, Result, ValidationError};
pub use form::{FormValue, QuoteForm};
pub use model::{estimate, price_volume, DimensionInput, EstimateRequest, PricingResult};
pub use scaling::{axis_scale, scaled_volume, ScaleFactors};

use printquote_mesh::MeshSummary;
use serde::Serialize;

/// A priced order together with the mesh it was priced from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    /// Decoded mesh, when one was supplied.
    pub mesh: Option<MeshSummary>,
    /// Cost breakdown.
    pub pricing: PricingResult,
}

/// Decode `mesh_bytes` (if any) and price `request` against it.
pub fn quote(
    mesh_bytes: Option<&[u8]>,
    request: &EstimateRequest,
) -> std::result::Result<Quote, EstimateError> {
    let mesh = mesh_bytes.map(printquote_mesh::decode).transpose()?;
    let pricing = estimate(request, mesh.as_ref())?;
    Ok(Quote { mesh, pricing })
}
