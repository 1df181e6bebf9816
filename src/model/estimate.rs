use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Damage classification emitted by the vision detection step.
///
/// The wire contract is closed, but detectors drift: anything we do not
/// recognize lands on `Unknown` and prices via the default repair operation
/// instead of failing the inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Scratch,
    DeepScratch,
    DentSmall,
    DentLarge,
    PaintChip,
    PaintFade,
    ClearCoatPeel,
    RustSpot,
    RustHeavy,
    Crack,
    Hole,
    Tear,
    Stain,
    Burn,
    CurbRash,
    Broken,
    Missing,
    Foggy,
    Discolored,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

/// One detected instance of wear or damage, as reported by the detection
/// collaborator. Immutable; consumed exactly once per analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DamageObservation {
    /// Opaque identifier, unique per observation
    pub id: String,
    /// Free-text panel/area name (e.g. "driver front door")
    pub location: String,
    pub damage_type: DamageType,
    pub severity: Severity,
    /// Free-text size estimate from the detector
    pub size_estimate: String,
    pub description: String,
    pub requires_part_replacement: bool,
    /// Present only when replacement is required
    #[serde(default)]
    pub part_name: Option<String>,
    /// Index of the source photo within the analysis request
    pub photo_index: u32,
}

/// Vehicle under inspection, supplied per analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDescriptor {
    pub year: u16,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
}

/// One priced repair line in the estimate. Carries every observation field
/// through so the report UI needs no join back to the detection output.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateLineItem {
    pub id: String,
    pub location: String,
    pub damage_type: DamageType,
    pub severity: Severity,
    pub size_estimate: String,
    pub description: String,
    pub requires_part_replacement: bool,
    pub part_name: Option<String>,
    pub photo_index: u32,

    /// Human-readable repair recommendation
    pub recommended_repair: String,
    pub parts_cost_low: f64,
    pub parts_cost_high: f64,
    pub labor_cost_low: f64,
    pub labor_cost_high: f64,
    /// Always parts + labor; never adjusted independently
    pub cost_low: f64,
    pub cost_high: f64,
    /// How the parts price was obtained; repair-only items are always static
    pub pricing_source: crate::model::price::PricingSource,
    pub purchase_link: Option<Url>,
    /// Pre-checked into the estimate total; minor items are optional upsells
    pub is_included: bool,
}
