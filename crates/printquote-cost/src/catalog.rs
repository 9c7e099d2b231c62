//! Material and add-on catalogs.

use serde::Serialize;
use tracing::warn;

/// Filament with its density and price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialProfile {
    /// Lookup key.
    pub key: &'static str,
    /// Display name.
    pub label: &'static str,
    /// Density (g/cm³).
    pub density: f64,
    /// Price per gram of filament (currency/g).
    pub price_per_gram: f64,
    /// Typical market price range, for display.
    pub price_range: &'static str,
    /// What the material is good for.
    pub usage: &'static str,
    /// Printing caveats.
    pub notes: &'static str,
}

/// Fixed-price finishing option charged per piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddOn {
    /// Lookup key.
    pub key: &'static str,
    /// Display name.
    pub label: &'static str,
    /// Price per piece (currency).
    pub price: f64,
    /// What the option involves.
    pub description: &'static str,
}

/// Every material that can be quoted. The first entry is the default.
pub static MATERIALS: &[MaterialProfile] = &[
    MaterialProfile {
        key: "pla",
        label: "PLA",
        density: 1.24,
        price_per_gram: 0.10,
        price_range: "0.09-0.11 /g",
        usage: "Decorative parts, prototypes, low-temperature use.",
        notes: "Easy to print, low heat resistance.",
    },
    MaterialProfile {
        key: "pla-plus",
        label: "PLA+ / PLA Silk / PLA Matte",
        density: 1.24,
        price_per_gram: 0.12,
        price_range: "0.10-0.13 /g",
        usage: "Ornaments, figurines, parts where surface finish matters.",
        notes: "Mostly a visual upgrade; prints like PLA.",
    },
    MaterialProfile {
        key: "petg",
        label: "PETG",
        density: 1.27,
        price_per_gram: 0.12,
        price_range: "0.10-0.13 /g",
        usage: "Functional parts, enclosures, holders, outdoor parts.",
        notes: "Tough, slightly flexible, UV resistant.",
    },
    MaterialProfile {
        key: "abs",
        label: "ABS",
        density: 1.04,
        price_per_gram: 0.13,
        price_range: "0.11-0.14 /g",
        usage: "Technical parts, housings, mechanical components.",
        notes: "Needs a heated bed and enclosure; emits fumes.",
    },
    MaterialProfile {
        key: "asa",
        label: "ASA",
        density: 1.07,
        price_per_gram: 0.14,
        price_range: "0.12-0.15 /g",
        usage: "Outdoor parts exposed to UV and heat.",
        notes: "Weathers better than ABS.",
    },
    MaterialProfile {
        key: "tpu",
        label: "TPU / TPE",
        density: 1.19,
        price_per_gram: 0.16,
        price_range: "0.13-0.18 /g",
        usage: "Flexible parts, seals, dampers.",
        notes: "Needs slow speeds and a constrained filament path.",
    },
    MaterialProfile {
        key: "nylon",
        label: "Nylon (PA)",
        density: 1.15,
        price_per_gram: 0.20,
        price_range: "0.17-0.22 /g",
        usage: "Strong mechanical parts, functional prototypes.",
        notes: "Must be dried; enclosure recommended.",
    },
    MaterialProfile {
        key: "cf-petg",
        label: "CF-PETG / CF-PLA",
        density: 1.20,
        price_per_gram: 0.23,
        price_range: "0.20-0.25 /g",
        usage: "Reinforced technical and structural parts.",
        notes: "Very stiff; fibres wear brass nozzles.",
    },
    MaterialProfile {
        key: "pc",
        label: "PC (Polycarbonate)",
        density: 1.20,
        price_per_gram: 0.25,
        price_range: "0.22-0.28 /g",
        usage: "Impact- and heat-resistant parts.",
        notes: "Hard to print; high temperatures and an enclosure.",
    },
    MaterialProfile {
        key: "pa-cf",
        label: "PA-CF / PA-GF",
        density: 1.25,
        price_per_gram: 0.29,
        price_range: "0.24-0.33 /g",
        usage: "Industrial structural parts with very high strength.",
        notes: "Enclosure, hardened steel nozzle and drying required.",
    },
];

/// Every add-on that can be selected.
pub static ADD_ONS: &[AddOn] = &[
    AddOn {
        key: "nfc",
        label: "Embedded NFC tag",
        price: 2.0,
        description: "Tag inserted mid-print plus extra post-processing.",
    },
    AddOn {
        key: "resin",
        label: "UV resin coating",
        price: 3.0,
        description: "Glossy finish and extra surface protection.",
    },
    AddOn {
        key: "chain",
        label: "Key chain / ring",
        price: 1.0,
        description: "Nickel-plated chain with split ring.",
    },
];

/// Lowercase and drop separators so `plaPlus`, `pla-plus` and `PLA_PLUS` match.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Look up a material by key.
pub fn material(key: &str) -> Option<&'static MaterialProfile> {
    let wanted = normalize_key(key);
    MATERIALS.iter().find(|m| normalize_key(m.key) == wanted)
}

/// The default material (PLA).
pub fn default_material() -> &'static MaterialProfile {
    &MATERIALS[0]
}

/// Look up a material, falling back to PLA for unknown keys.
pub fn material_or_default(key: &str) -> &'static MaterialProfile {
    material(key).unwrap_or_else(|| {
        let fallback = default_material();
        warn!(key, fallback = fallback.key, "unknown material, using default");
        fallback
    })
}

/// Look up an add-on by key.
pub fn add_on(key: &str) -> Option<&'static AddOn> {
    let wanted = normalize_key(key);
    ADD_ONS.iter().find(|a| normalize_key(a.key) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materials() {
        assert_eq!(MATERIALS.len(), 10);
        for m in MATERIALS {
            assert!(m.density > 0.0, "{}", m.key);
            assert!(m.price_per_gram > 0.0, "{}", m.key);
        }
    }

    #[test]
    fn test_material_keys_unique() {
        for (i, a) in MATERIALS.iter().enumerate() {
            for b in &MATERIALS[i + 1..] {
                assert_ne!(normalize_key(a.key), normalize_key(b.key));
            }
        }
    }

    #[test]
    fn test_material_lookup() {
        let pla = material("pla").unwrap();
        assert_eq!(pla.density, 1.24);
        assert_eq!(pla.price_per_gram, 0.10);
        assert_eq!(material("plaPlus").unwrap().key, "pla-plus");
        assert_eq!(material("PA_CF").unwrap().key, "pa-cf");
        assert_eq!(material("cfPetg").unwrap().density, 1.20);
        assert!(material("unobtainium").is_none());
    }

    #[test]
    fn test_material_fallback() {
        assert_eq!(material_or_default("unobtainium").key, "pla");
        assert_eq!(material_or_default("asa").key, "asa");
    }

    #[test]
    fn test_add_ons() {
        assert_eq!(ADD_ONS.len(), 3);
        assert_eq!(add_on("nfc").unwrap().price, 2.0);
        assert_eq!(add_on("resin").unwrap().price, 3.0);
        assert_eq!(add_on("CHAIN").unwrap().price, 1.0);
        assert!(add_on("gold-leaf").is_none());
    }
}
