//! Vehicle tier classification
//!
//! Maps a vehicle make to a cost-scaling bracket. Parts and labor costs vary
//! widely across brand classes; the tier multiplier scales the baseline
//! (mainstream) catalog accordingly.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::normalize_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleTier {
    Economy,
    Mainstream,
    Premium,
    Luxury,
    UltraLuxury,
}

impl VehicleTier {
    pub fn multiplier(&self) -> f64 {
        match self {
            VehicleTier::Economy => 0.85,
            VehicleTier::Mainstream => 1.0,
            VehicleTier::Premium => 1.3,
            VehicleTier::Luxury => 1.6,
            VehicleTier::UltraLuxury => 2.2,
        }
    }
}

const ECONOMY_MAKES: &[&str] = &["mitsubishi", "suzuki", "fiat", "smart", "dacia", "chery"];

const PREMIUM_MAKES: &[&str] = &[
    "acura",
    "infiniti",
    "volvo",
    "lincoln",
    "mini",
    "alfa_romeo",
    "genesis",
];

const LUXURY_MAKES: &[&str] = &[
    "bmw",
    "mercedes_benz",
    "mercedes",
    "audi",
    "lexus",
    "cadillac",
    "porsche",
    "land_rover",
    "range_rover",
    "jaguar",
    "maserati",
    "tesla",
];

const ULTRA_LUXURY_MAKES: &[&str] = &[
    "ferrari",
    "lamborghini",
    "bentley",
    "rolls_royce",
    "aston_martin",
    "mclaren",
    "bugatti",
    "maybach",
];

/// Classify a make into a cost tier. Unknown makes default to mainstream.
pub fn tier_of(make: &str) -> VehicleTier {
    let key = normalize_key(make);
    let key = key.as_str();

    if ULTRA_LUXURY_MAKES.contains(&key) {
        VehicleTier::UltraLuxury
    } else if LUXURY_MAKES.contains(&key) {
        VehicleTier::Luxury
    } else if PREMIUM_MAKES.contains(&key) {
        VehicleTier::Premium
    } else if ECONOMY_MAKES.contains(&key) {
        VehicleTier::Economy
    } else {
        VehicleTier::Mainstream
    }
}

/// Cost multiplier for a make, via its tier.
pub fn tier_multiplier(make: &str) -> f64 {
    tier_of(make).multiplier()
}
