//! Cost model: from a geometric volume to a priced order.

use std::collections::BTreeSet;

use printquote_mesh::MeshSummary;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{self, MaterialProfile};
use crate::error::{ensure_positive, Field, Result, ValidationError};
use crate::rates::{
    adjust_for_infill, discount_rate, effective_infill_percent, HOURLY_RATE,
    MIN_PRINT_TIME_HOURS, MIN_UNIT_PRICE, PRINT_SPEED_MM3_PER_HOUR, SETUP_FEE,
};
use crate::scaling::{scaled_volume, ScaleFactors};

/// Dimensions of one piece (mm) and how many to print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionInput {
    /// Target X size.
    pub width: f64,
    /// Target Y size.
    pub height: f64,
    /// Target Z size.
    pub thickness: f64,
    /// Pieces ordered.
    pub quantity: u32,
}

impl DimensionInput {
    /// Thickness used when a decoded mesh is flat.
    pub const FALLBACK_THICKNESS: f64 = 5.0;

    /// Prefill target dimensions from a decoded mesh's bounding box.
    pub fn from_summary(summary: &MeshSummary, quantity: u32) -> Self {
        let thickness = if summary.bbox.z.is_finite() && summary.bbox.z > 0.0 {
            summary.bbox.z
        } else {
            Self::FALLBACK_THICKNESS
        };
        Self {
            width: summary.bbox.x,
            height: summary.bbox.y,
            thickness,
            quantity,
        }
    }

    /// Check every field without coercing anything.
    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.width, Field::Width)?;
        ensure_positive(self.height, Field::Height)?;
        ensure_positive(self.thickness, Field::Thickness)?;
        if self.quantity == 0 {
            return Err(ValidationError::new(Field::Quantity, 0.0));
        }
        Ok(())
    }

    /// Volume of a solid slab with these dimensions (mm³).
    pub fn slab_volume(&self) -> f64 {
        self.width * self.height * self.thickness
    }
}

/// Everything needed to price an order, apart from the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRequest {
    /// Piece dimensions and count.
    pub dimensions: DimensionInput,
    /// Requested infill (%); clamped before use, missing means 20%.
    pub infill_percent: Option<f64>,
    /// Filament.
    pub material: &'static MaterialProfile,
    /// Selected add-on keys.
    pub add_ons: BTreeSet<String>,
}

impl EstimateRequest {
    /// PLA, 20% infill, no add-ons.
    pub fn new(dimensions: DimensionInput) -> Self {
        Self {
            dimensions,
            infill_percent: None,
            material: catalog::default_material(),
            add_ons: BTreeSet::new(),
        }
    }
}

/// Full cost breakdown of one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    /// Material key used.
    pub material: &'static str,
    /// Solid volume before infill (mm³).
    pub geometric_volume_mm3: f64,
    /// Mesh rescale applied, when a mesh was priced.
    pub scale: Option<ScaleFactors>,
    /// Infill actually used (%).
    pub infill_percent: f64,
    /// Printed volume after infill (mm³).
    pub effective_volume_mm3: f64,
    /// Filament mass per piece (g).
    pub mass_grams: f64,
    /// Filament cost per piece.
    pub material_cost: f64,
    /// Machine time per piece (h).
    pub print_time_hours: f64,
    /// Machine time cost per piece.
    pub machine_cost: f64,
    /// Add-on cost per piece.
    pub add_on_cost: f64,
    /// Recognized add-ons that were charged.
    pub selected_add_ons: Vec<&'static str>,
    /// Material + machine + add-ons, per piece.
    pub variable_cost_per_piece: f64,
    /// Quantity discount applied to the variable cost.
    pub discount_rate: f64,
    /// Variable cost per piece after discount.
    pub discounted_cost_per_piece: f64,
    /// Pieces ordered.
    pub quantity: u32,
    /// One-off setup fee.
    pub setup_cost: f64,
    /// Unit price before the floor.
    pub raw_unit_price: f64,
    /// Quoted unit price.
    pub unit_price: f64,
    /// Whether the minimum unit price kicked in.
    pub price_floor_applied: bool,
    /// `unit_price * quantity`.
    pub total_cost: f64,
}

/// Price an order from a decoded mesh or, without one, a solid slab.
///
/// With a mesh, its volume is stretched to the requested dimensions.
pub fn estimate(request: &EstimateRequest, mesh: Option<&MeshSummary>) -> Result<PricingResult> {
    let dims = &request.dimensions;
    dims.validate()?;

    let (geometric_volume, scale) = match mesh {
        Some(summary) => {
            let (volume, factors) = scaled_volume(summary, dims);
            debug!(
                sx = factors.x,
                sy = factors.y,
                sz = factors.z,
                volume_mm3 = volume,
                "scaled mesh volume"
            );
            (volume, Some(factors))
        }
        None => (dims.slab_volume(), None),
    };

    let mut result = price_volume(geometric_volume, request)?;
    result.scale = scale;
    Ok(result)
}

/// Price `geometric_volume_mm3` of solid material.
pub fn price_volume(geometric_volume_mm3: f64, request: &EstimateRequest) -> Result<PricingResult> {
    ensure_positive(geometric_volume_mm3, Field::Volume)?;
    let quantity = request.dimensions.quantity;
    if quantity == 0 {
        return Err(ValidationError::new(Field::Quantity, 0.0));
    }
    let material = request.material;

    let infill_percent = effective_infill_percent(request.infill_percent);
    let effective_volume = adjust_for_infill(geometric_volume_mm3, infill_percent / 100.0);
    let mass_grams = effective_volume / 1000.0 * material.density;
    let material_cost = mass_grams * material.price_per_gram;

    let print_time_hours = (effective_volume / PRINT_SPEED_MM3_PER_HOUR).max(MIN_PRINT_TIME_HOURS);
    let machine_cost = print_time_hours * HOURLY_RATE;

    let mut selected_add_ons = Vec::new();
    let mut add_on_cost = 0.0;
    for key in &request.add_ons {
        match catalog::add_on(key) {
            Some(add_on) if !selected_add_ons.contains(&add_on.key) => {
                add_on_cost += add_on.price;
                selected_add_ons.push(add_on.key);
            }
            Some(_) => {}
            None => warn!(key = key.as_str(), "ignoring unknown add-on"),
        }
    }

    let variable_cost_per_piece = material_cost + machine_cost + add_on_cost;
    let discount_rate = discount_rate(quantity);
    let discounted_cost_per_piece = variable_cost_per_piece * (1.0 - discount_rate);

    let pieces = f64::from(quantity);
    let raw_total = SETUP_FEE + pieces * discounted_cost_per_piece;
    let raw_unit_price = raw_total / pieces;

    let price_floor_applied = raw_unit_price < MIN_UNIT_PRICE;
    let unit_price = if price_floor_applied {
        MIN_UNIT_PRICE
    } else {
        raw_unit_price
    };

    debug!(
        material = material.key,
        effective_volume_mm3 = effective_volume,
        mass_grams,
        print_time_hours,
        discount_rate,
        unit_price,
        price_floor_applied,
        "priced order"
    );

    Ok(PricingResult {
        material: material.key,
        geometric_volume_mm3,
        scale: None,
        infill_percent,
        effective_volume_mm3: effective_volume,
        mass_grams,
        material_cost,
        print_time_hours,
        machine_cost,
        add_on_cost,
        selected_add_ons,
        variable_cost_per_piece,
        discount_rate,
        discounted_cost_per_piece,
        quantity,
        setup_cost: SETUP_FEE,
        raw_unit_price,
        unit_price,
        price_floor_applied,
        total_cost: unit_price * pieces,
    })
}
