//! Damage-to-repair mapping
//!
//! Deterministic lookup from (damage type, severity) to a repair operation
//! id. The map is total over severities for every known damage type, and any
//! combination without an explicit row resolves to
//! [`DEFAULT_REPAIR_OP`](super::tables::DEFAULT_REPAIR_OP).

use crate::model::estimate::{DamageType, Severity};

use super::tables::DEFAULT_REPAIR_OP;

/// Repair operation id for a damage observation's type and severity.
pub fn repair_type_for(damage_type: DamageType, severity: Severity) -> &'static str {
    use DamageType::*;
    use Severity::*;

    match (damage_type, severity) {
        (Scratch, Minor) => "scratch_buff_polish",
        (Scratch, Moderate) => "scratch_wet_sand",
        (Scratch, Severe) => "full_panel_respray",

        (DeepScratch, Minor) => "scratch_wet_sand",
        (DeepScratch, Moderate) => "spot_respray_small",
        (DeepScratch, Severe) => "full_panel_respray",

        (DentSmall, Minor | Moderate) => "pdr_small",
        (DentSmall, Severe) => "dent_fill_respray",

        (DentLarge, Minor) => "pdr_large",
        (DentLarge, Moderate | Severe) => "dent_fill_respray",

        (PaintChip, Minor | Moderate) => "touch_up_paint",
        (PaintChip, Severe) => "spot_respray_small",

        (PaintFade, Minor | Moderate) => "paint_correction_detail",
        (PaintFade, Severe) => "full_panel_respray",

        (ClearCoatPeel, Minor | Moderate) => "clear_coat_correction",
        (ClearCoatPeel, Severe) => "full_panel_respray",

        (RustSpot, Minor | Moderate) => "rust_treatment_small",
        (RustSpot, Severe) => "rust_repair_panel",

        (RustHeavy, _) => "rust_repair_panel",

        (Crack, _) => "plastic_weld_repair",

        (Hole, Minor) => "plastic_weld_repair",
        (Hole, Moderate | Severe) => "rust_repair_panel",

        (Tear, _) => "upholstery_repair",

        (Stain, Minor | Moderate) => "interior_deep_clean",
        (Stain, Severe) => "interior_patch_repair",

        (Burn, Minor) => "interior_patch_repair",
        (Burn, Moderate | Severe) => "upholstery_repair",

        (CurbRash, _) => "wheel_refinish",

        (Broken, _) => "plastic_weld_repair",

        (Foggy, _) => "headlight_restoration",

        (Discolored, Minor | Moderate) => "paint_correction_detail",
        (Discolored, Severe) => "full_panel_respray",

        // "missing" usually routes through part replacement; without a part
        // name there is nothing better than the generic default
        (Missing, _) | (Unknown, _) => DEFAULT_REPAIR_OP,
    }
}
