//! Fixed pricing rates.

/// Volume of material deposited per hour of printing (mm³/h).
pub const PRINT_SPEED_MM3_PER_HOUR: f64 = 12_000.0;

/// Machine time price (currency/h).
pub const HOURLY_RATE: f64 = 12.0;

/// One-off charge per order.
pub const SETUP_FEE: f64 = 20.0;

/// Handling time charged even for the smallest part (h).
pub const MIN_PRINT_TIME_HOURS: f64 = 0.35;

/// Lowest unit price ever quoted.
pub const MIN_UNIT_PRICE: f64 = 4.0;

/// Share of the solid volume always printed as walls and skins.
pub const PERIMETER_FACTOR: f64 = 0.35;

/// Infill used when none (or garbage) is given (%).
pub const DEFAULT_INFILL_PERCENT: f64 = 20.0;

/// Accepted infill range (%).
pub const MIN_INFILL_PERCENT: f64 = 5.0;
/// See [`MIN_INFILL_PERCENT`].
pub const MAX_INFILL_PERCENT: f64 = 100.0;

/// Quantity discount tiers as `(minimum quantity, rate)`, highest first.
pub const DISCOUNT_TIERS: &[(u32, f64)] = &[
    (1000, 0.40),
    (600, 0.32),
    (400, 0.28),
    (200, 0.20),
    (100, 0.10),
    (50, 0.07),
    (30, 0.05),
];

/// Discount rate for an order of `quantity` pieces.
pub fn discount_rate(quantity: u32) -> f64 {
    DISCOUNT_TIERS
        .iter()
        .find(|(min, _)| quantity >= *min)
        .map_or(0.0, |&(_, rate)| rate)
}

/// Clamp an infill percentage into range, defaulting missing or
/// non-finite values.
pub fn effective_infill_percent(percent: Option<f64>) -> f64 {
    match percent {
        Some(p) if p.is_finite() => p.clamp(MIN_INFILL_PERCENT, MAX_INFILL_PERCENT),
        _ => DEFAULT_INFILL_PERCENT,
    }
}

/// Printed volume once walls and partial infill are accounted for.
///
/// `infill_ratio` is clamped to `[0.05, 1]`; at 1 the full volume is used.
pub fn adjust_for_infill(volume_mm3: f64, infill_ratio: f64) -> f64 {
    let ratio = infill_ratio.clamp(MIN_INFILL_PERCENT / 100.0, 1.0);
    volume_mm3 * (PERIMETER_FACTOR + ratio * (1.0 - PERIMETER_FACTOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_boundaries() {
        assert_eq!(discount_rate(1), 0.0);
        assert_eq!(discount_rate(29), 0.0);
        assert_eq!(discount_rate(30), 0.05);
        assert_eq!(discount_rate(49), 0.05);
        assert_eq!(discount_rate(50), 0.07);
        assert_eq!(discount_rate(99), 0.07);
        assert_eq!(discount_rate(100), 0.10);
        assert_eq!(discount_rate(199), 0.10);
        assert_eq!(discount_rate(200), 0.20);
        assert_eq!(discount_rate(400), 0.28);
        assert_eq!(discount_rate(599), 0.28);
        assert_eq!(discount_rate(600), 0.32);
        assert_eq!(discount_rate(999), 0.32);
        assert_eq!(discount_rate(1000), 0.40);
        assert_eq!(discount_rate(u32::MAX), 0.40);
    }

    #[test]
    fn test_infill_percent_clamped() {
        assert_eq!(effective_infill_percent(Some(0.0)), 5.0);
        assert_eq!(effective_infill_percent(Some(500.0)), 100.0);
        assert_eq!(effective_infill_percent(Some(42.0)), 42.0);
        assert_eq!(effective_infill_percent(None), 20.0);
        assert_eq!(effective_infill_percent(Some(f64::NAN)), 20.0);
    }

    #[test]
    fn test_adjust_for_infill() {
        assert_relative_eq!(adjust_for_infill(1000.0, 1.0), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(adjust_for_infill(12_500.0, 0.15), 5593.75, epsilon = 1e-9);
        // Below 5% the ratio is pinned.
        assert_relative_eq!(adjust_for_infill(1000.0, 0.0), adjust_for_infill(1000.0, 0.05));
        assert_relative_eq!(adjust_for_infill(1000.0, 3.0), 1000.0, epsilon = 1e-9);
    }
}
