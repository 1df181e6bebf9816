//! Static pricing catalogs
//!
//! Baseline USD figures for a mainstream-tier vehicle at the medium labor
//! rate. Three catalogs live here: repair operations (labor + materials),
//! installation labor for replacement parts, and fallback part prices used
//! when no live marketplace quote is available.
//!
//! Every lookup is total: unknown keys resolve to documented generic defaults
//! so an unrecognized label can never fail an inspection.

use super::normalize_key;

/// Repair operation used when a (damage type, severity) pair has no explicit
/// mapping.
pub const DEFAULT_REPAIR_OP: &str = "spot_respray_small";

/// Generic parts price range for parts absent from the static table.
pub const DEFAULT_PART_PRICE: CostRange = CostRange { low: 50.0, high: 200.0 };

/// Generic installation labor range for parts absent from the labor table.
pub const DEFAULT_INSTALL_LABOR: CostRange = CostRange { low: 100.0, high: 250.0 };

/// Inclusive low/high dollar range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRange {
    pub low: f64,
    pub high: f64,
}

/// Broad category of a repair operation, used to suggest consumer products
/// (touch-up kits, polish, etc.) on repair-only line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairCategory {
    Paint,
    Detailing,
    Dent,
    Rust,
    Wheel,
    Interior,
    Lens,
}

/// A priced unit of reconditioning work not involving a part swap.
#[derive(Debug, Clone, Copy)]
pub struct RepairCost {
    pub description: &'static str,
    pub labor: CostRange,
    pub materials: CostRange,
    pub category: RepairCategory,
}

const fn repair(
    description: &'static str,
    labor_low: f64,
    labor_high: f64,
    materials_low: f64,
    materials_high: f64,
    category: RepairCategory,
) -> RepairCost {
    RepairCost {
        description,
        labor: CostRange { low: labor_low, high: labor_high },
        materials: CostRange { low: materials_low, high: materials_high },
        category,
    }
}

/// Look up a repair operation's baseline cost row. Unknown operation ids
/// resolve to the [`DEFAULT_REPAIR_OP`] row.
pub fn repair_cost(operation_id: &str) -> RepairCost {
    use RepairCategory::*;

    match operation_id {
        "scratch_buff_polish" => repair("Buff and polish scratch", 40.0, 90.0, 5.0, 15.0, Detailing),
        "scratch_wet_sand" => repair("Wet sand and polish scratch", 75.0, 150.0, 10.0, 25.0, Detailing),
        "touch_up_paint" => repair("Touch up paint chip", 25.0, 60.0, 10.0, 20.0, Paint),
        "spot_respray_small" => repair("Spot respray (small area)", 100.0, 200.0, 30.0, 75.0, Paint),
        "spot_respray_large" => repair("Spot respray (large area)", 150.0, 300.0, 50.0, 100.0, Paint),
        "full_panel_respray" => repair("Full panel respray", 200.0, 450.0, 60.0, 150.0, Paint),
        "clear_coat_correction" => repair("Clear coat correction and reseal", 150.0, 300.0, 40.0, 80.0, Paint),
        "paint_correction_detail" => repair("Machine polish and paint correction", 100.0, 250.0, 20.0, 60.0, Detailing),
        "pdr_small" => repair("Paintless dent repair (small dent)", 75.0, 150.0, 0.0, 0.0, Dent),
        "pdr_large" => repair("Paintless dent repair (large dent)", 150.0, 350.0, 0.0, 0.0, Dent),
        "dent_fill_respray" => repair("Dent fill, prime and respray", 250.0, 500.0, 75.0, 150.0, Dent),
        "rust_treatment_small" => repair("Sand and treat rust spot", 100.0, 200.0, 25.0, 50.0, Rust),
        "rust_repair_panel" => repair("Cut out rust and patch panel", 350.0, 800.0, 100.0, 250.0, Rust),
        "plastic_weld_repair" => repair("Plastic weld and refinish", 150.0, 300.0, 40.0, 80.0, Dent),
        "wheel_refinish" => repair("Refinish curb-rashed wheel", 100.0, 175.0, 25.0, 50.0, Wheel),
        "headlight_restoration" => repair("Restore and polish lenses", 50.0, 100.0, 15.0, 30.0, Lens),
        "interior_deep_clean" => repair("Deep clean and extract stain", 50.0, 120.0, 15.0, 35.0, Interior),
        "interior_patch_repair" => repair("Patch and dye interior trim", 100.0, 250.0, 30.0, 75.0, Interior),
        "upholstery_repair" => repair("Repair upholstery tear", 125.0, 300.0, 40.0, 90.0, Interior),
        _ => repair("Spot respray (small area)", 100.0, 200.0, 30.0, 75.0, Paint),
    }
}

/// Baseline labor range for fitting a replacement part. Unknown parts resolve
/// to [`DEFAULT_INSTALL_LABOR`].
pub fn installation_labor(part_name: &str) -> CostRange {
    match normalize_key(part_name).as_str() {
        "front_bumper_cover" | "rear_bumper_cover" => CostRange { low: 150.0, high: 300.0 },
        "fender" => CostRange { low: 120.0, high: 250.0 },
        "hood" | "trunk_lid" => CostRange { low: 100.0, high: 200.0 },
        "door_shell" => CostRange { low: 200.0, high: 400.0 },
        "quarter_panel" => CostRange { low: 400.0, high: 800.0 },
        "rocker_panel" => CostRange { low: 250.0, high: 500.0 },
        "side_mirror" => CostRange { low: 50.0, high: 120.0 },
        "headlight_assembly" => CostRange { low: 60.0, high: 150.0 },
        "tail_light_assembly" => CostRange { low: 40.0, high: 100.0 },
        "grille" => CostRange { low: 50.0, high: 120.0 },
        "windshield" => CostRange { low: 150.0, high: 300.0 },
        "door_handle" => CostRange { low: 40.0, high: 100.0 },
        "wheel" => CostRange { low: 25.0, high: 50.0 },
        "hubcap" => CostRange { low: 10.0, high: 25.0 },
        "antenna" => CostRange { low: 20.0, high: 50.0 },
        "emblem" => CostRange { low: 15.0, high: 40.0 },
        "mud_flap" => CostRange { low: 20.0, high: 50.0 },
        "running_board" => CostRange { low: 80.0, high: 180.0 },
        _ => DEFAULT_INSTALL_LABOR,
    }
}

/// Fallback parts price range, used when the marketplace has no valid quote.
/// Unknown parts resolve to [`DEFAULT_PART_PRICE`].
pub fn static_part_price(part_name: &str) -> CostRange {
    match normalize_key(part_name).as_str() {
        "front_bumper_cover" | "rear_bumper_cover" => CostRange { low: 150.0, high: 450.0 },
        "fender" => CostRange { low: 100.0, high: 300.0 },
        "hood" => CostRange { low: 200.0, high: 600.0 },
        "trunk_lid" => CostRange { low: 200.0, high: 500.0 },
        "door_shell" => CostRange { low: 250.0, high: 700.0 },
        "quarter_panel" => CostRange { low: 300.0, high: 800.0 },
        "rocker_panel" => CostRange { low: 100.0, high: 350.0 },
        "side_mirror" => CostRange { low: 50.0, high: 250.0 },
        "headlight_assembly" => CostRange { low: 100.0, high: 400.0 },
        "tail_light_assembly" => CostRange { low: 60.0, high: 250.0 },
        "grille" => CostRange { low: 80.0, high: 300.0 },
        "windshield" => CostRange { low: 200.0, high: 500.0 },
        "door_handle" => CostRange { low: 25.0, high: 100.0 },
        "wheel" => CostRange { low: 100.0, high: 400.0 },
        "hubcap" => CostRange { low: 20.0, high: 60.0 },
        "antenna" => CostRange { low: 15.0, high: 60.0 },
        "emblem" => CostRange { low: 10.0, high: 50.0 },
        "mud_flap" => CostRange { low: 15.0, high: 60.0 },
        "running_board" => CostRange { low: 150.0, high: 450.0 },
        _ => DEFAULT_PART_PRICE,
    }
}

/// Body panels that need paint-matching after replacement. Fitting one of
/// these adds the full-panel-respray operation on top of installation.
const PAINTABLE_PANELS: &[&str] = &[
    "front_bumper_cover",
    "rear_bumper_cover",
    "fender",
    "hood",
    "trunk_lid",
    "door_shell",
    "quarter_panel",
    "rocker_panel",
];

pub fn is_paintable_panel(part_name: &str) -> bool {
    PAINTABLE_PANELS.contains(&normalize_key(part_name).as_str())
}

/// Advisory consumer-product search for a repair category. Purely
/// informational; line items are correct without it.
pub fn product_search_query(category: RepairCategory) -> &'static str {
    match category {
        RepairCategory::Paint => "automotive touch up paint kit",
        RepairCategory::Detailing => "car scratch remover polish kit",
        RepairCategory::Dent => "paintless dent repair kit",
        RepairCategory::Rust => "rust converter treatment automotive",
        RepairCategory::Wheel => "alloy wheel repair kit",
        RepairCategory::Interior => "car upholstery repair kit",
        RepairCategory::Lens => "headlight restoration kit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdr_small_baseline() {
        let cost = repair_cost("pdr_small");
        assert_eq!(cost.labor, CostRange { low: 75.0, high: 150.0 });
        assert_eq!(cost.materials, CostRange { low: 0.0, high: 0.0 });
    }

    #[test]
    fn test_full_panel_respray_baseline() {
        let cost = repair_cost("full_panel_respray");
        assert_eq!(cost.labor, CostRange { low: 200.0, high: 450.0 });
        assert_eq!(cost.materials, CostRange { low: 60.0, high: 150.0 });
    }

    #[test]
    fn test_unknown_operation_falls_back_to_default() {
        let unknown = repair_cost("levitation_repair");
        let default = repair_cost(DEFAULT_REPAIR_OP);
        assert_eq!(unknown.labor, default.labor);
        assert_eq!(unknown.materials, default.materials);
    }

    #[test]
    fn test_unknown_part_uses_generic_defaults() {
        assert_eq!(static_part_price("exotic_spoiler"), DEFAULT_PART_PRICE);
        assert_eq!(installation_labor("exotic_spoiler"), DEFAULT_INSTALL_LABOR);
    }

    #[test]
    fn test_part_lookups_normalize_names() {
        assert_eq!(
            static_part_price("Front Bumper Cover"),
            static_part_price("front_bumper_cover")
        );
        assert_eq!(
            installation_labor("  QUARTER panel "),
            installation_labor("quarter_panel")
        );
    }

    #[test]
    fn test_paintable_panels() {
        assert!(is_paintable_panel("front_bumper_cover"));
        assert!(is_paintable_panel("Quarter Panel"));
        assert!(!is_paintable_panel("side_mirror"));
        assert!(!is_paintable_panel("windshield"));
    }

    #[test]
    fn test_all_ranges_are_ordered() {
        for op in [
            "scratch_buff_polish",
            "scratch_wet_sand",
            "touch_up_paint",
            "spot_respray_small",
            "spot_respray_large",
            "full_panel_respray",
            "clear_coat_correction",
            "paint_correction_detail",
            "pdr_small",
            "pdr_large",
            "dent_fill_respray",
            "rust_treatment_small",
            "rust_repair_panel",
            "plastic_weld_repair",
            "wheel_refinish",
            "headlight_restoration",
            "interior_deep_clean",
            "interior_patch_repair",
            "upholstery_repair",
        ] {
            let cost = repair_cost(op);
            assert!(cost.labor.low <= cost.labor.high, "labor range for {}", op);
            assert!(
                cost.materials.low <= cost.materials.high,
                "materials range for {}",
                op
            );
        }
    }
}
