//! Labor rate resolution
//!
//! Dealers select a regional cost-of-labor bracket; estimates scale their
//! labor ranges by the matching multiplier. Unrecognized input falls back to
//! the medium rate rather than rejecting the request.

/// Multiplier for a dealer-configured labor rate tier ("low", "medium",
/// "high"). Unknown tiers resolve to 1.0.
pub fn labor_rate_multiplier(tier: &str) -> f64 {
    match tier.trim().to_lowercase().as_str() {
        "low" => 0.8,
        "high" => 1.3,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tiers() {
        assert_eq!(labor_rate_multiplier("low"), 0.8);
        assert_eq!(labor_rate_multiplier("medium"), 1.0);
        assert_eq!(labor_rate_multiplier("high"), 1.3);
    }

    #[test]
    fn test_unknown_tier_defaults_to_medium() {
        assert_eq!(labor_rate_multiplier("extreme"), 1.0);
        assert_eq!(labor_rate_multiplier(""), 1.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(labor_rate_multiplier("HIGH"), 1.3);
        assert_eq!(labor_rate_multiplier(" Low "), 0.8);
    }
}
