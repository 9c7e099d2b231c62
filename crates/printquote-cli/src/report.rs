//! Plain-text rendering of summaries and quotes.

use std::path::Path;

use printquote_cost::{Quote, ADD_ONS, MATERIALS};
use printquote_mesh::MeshSummary;

/// At most two decimals, trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn format_percent(ratio: f64) -> String {
    format!("{}%", format_number(ratio * 100.0))
}

pub fn print_summary(file: &Path, summary: &MeshSummary) {
    println!("Mesh: {}", file.display());
    println!("  Format: {:?}", summary.format);
    println!("  Triangles: {}", summary.triangle_count);
    println!(
        "  Dimensions: {} × {} × {} mm",
        format_number(summary.bbox.x),
        format_number(summary.bbox.y),
        format_number(summary.bbox.z)
    );
    println!("  Volume: {} mm³", format_number(summary.volume_mm3));
}

pub fn print_quote(quote: &Quote) {
    let p = &quote.pricing;

    if let Some(mesh) = &quote.mesh {
        println!(
            "Model: {} × {} × {} mm, {} mm³",
            format_number(mesh.bbox.x),
            format_number(mesh.bbox.y),
            format_number(mesh.bbox.z),
            format_number(mesh.volume_mm3)
        );
    }
    if let Some(scale) = &p.scale {
        println!(
            "Scale: {} × {} × {}",
            format_number(scale.x),
            format_number(scale.y),
            format_number(scale.z)
        );
    }

    let label = printquote_cost::material(p.material).map_or(p.material, |m| m.label);
    println!("Material:         {}", label);
    println!("Solid volume:     {} mm³", format_number(p.geometric_volume_mm3));
    println!(
        "Printed volume:   {} mm³ (infill {}%)",
        format_number(p.effective_volume_mm3),
        format_number(p.infill_percent)
    );
    println!("Mass:             {} g", format_number(p.mass_grams));
    println!("Material cost:    {}", format_number(p.material_cost));
    println!("Print time:       {} h", format_number(p.print_time_hours));
    println!("Machine cost:     {}", format_number(p.machine_cost));
    if p.selected_add_ons.is_empty() {
        println!("Add-ons:          none");
    } else {
        println!(
            "Add-ons:          {} ({})",
            format_number(p.add_on_cost),
            p.selected_add_ons.join(", ")
        );
    }
    println!("Discount:         {}", format_percent(p.discount_rate));
    println!("Setup fee:        {}", format_number(p.setup_cost));
    if p.price_floor_applied {
        println!(
            "Unit price:       {} (minimum price, computed {})",
            format_number(p.unit_price),
            format_number(p.raw_unit_price)
        );
    } else {
        println!("Unit price:       {}", format_number(p.unit_price));
    }
    println!("Pieces:           {}", p.quantity);
    println!("Total:            {}", format_number(p.total_cost));
}

pub fn print_materials() {
    println!("{:<10} {:<28} {:>8} {:>8}", "KEY", "MATERIAL", "g/cm³", "PRICE/g");
    for m in MATERIALS {
        println!(
            "{:<10} {:<28} {:>8.2} {:>8.2}",
            m.key, m.label, m.density, m.price_per_gram
        );
    }
}

pub fn print_add_ons() {
    for a in ADD_ONS {
        println!("{:<6} {:>5}  {} - {}", a.key, format_number(a.price), a.label, a.description);
    }
}
