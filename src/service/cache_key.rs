//! Price cache key construction
//!
//! The key is a deterministic composite of the normalized part name and the
//! vehicle's year/make/model. It deliberately omits trim and listing
//! condition: the coarser key trades some precision for a much higher hit
//! rate across inspections of similar vehicles.

use crate::pricing::normalize_key;

/// Build the composite cache key for a (part, vehicle) pair.
pub fn price_cache_key(part_name: &str, year: u16, make: &str, model: &str) -> String {
    format!(
        "{}|{}|{}|{}",
        normalize_key(part_name),
        year,
        normalize_key(make),
        normalize_key(model)
    )
}
