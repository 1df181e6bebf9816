//! Static pricing knowledge: vehicle tiers, labor rates, repair catalogs and
//! the damage-to-repair mapping. Everything in this module is a pure, total
//! lookup; missing keys resolve to documented defaults, never to errors.

pub mod labor;
pub mod mapper;
pub mod tables;
pub mod tier;

pub use labor::labor_rate_multiplier;
pub use mapper::repair_type_for;
pub use tables::{installation_labor, repair_cost, static_part_price, RepairCost};
pub use tier::{tier_multiplier, tier_of, VehicleTier};

/// Normalize a free-text key for table lookups: case-folded, with whitespace
/// runs collapsed to single underscores.
///
/// "Front Bumper Cover" and "front_bumper_cover" address the same row.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_joins() {
        assert_eq!(normalize_key("Front Bumper Cover"), "front_bumper_cover");
        assert_eq!(normalize_key("  hood "), "hood");
        assert_eq!(normalize_key("quarter   panel"), "quarter_panel");
    }

    #[test]
    fn test_normalize_preserves_existing_underscores() {
        assert_eq!(normalize_key("front_bumper_cover"), "front_bumper_cover");
    }
}
