//! Estimate builder
//!
//! Turns a batch of damage observations into priced, explainable line items.
//! Each observation is priced independently and concurrently; a failure in
//! one item's resolution chain never drops the item or aborts the batch, so
//! every input observation always yields exactly one line item.

use futures::future::join_all;

use crate::marketplace::ebay;
use crate::model::estimate::{DamageObservation, EstimateLineItem, Severity, VehicleDescriptor};
use crate::model::price::PricingSource;
use crate::pricing::{
    labor_rate_multiplier, repair_type_for, tables, tier_multiplier,
};

use super::resolver::PartPriceResolver;

/// Builds priced estimates from detection output.
pub struct EstimateService {
    resolver: PartPriceResolver,
    default_labor_tier: String,
}

fn round_usd(value: f64) -> f64 {
    value.round()
}

impl EstimateService {
    pub fn new(resolver: PartPriceResolver, default_labor_tier: String) -> Self {
        Self {
            resolver,
            default_labor_tier,
        }
    }

    /// Price every observation against the vehicle and labor-rate tier.
    ///
    /// Returns one line item per observation, in input order.
    pub async fn build_estimate(
        &self,
        observations: Vec<DamageObservation>,
        vehicle: &VehicleDescriptor,
        labor_tier: Option<&str>,
    ) -> Vec<EstimateLineItem> {
        let labor_tier = labor_tier.unwrap_or(&self.default_labor_tier);
        let tier_mult = tier_multiplier(&vehicle.make);
        let labor_mult = labor_rate_multiplier(labor_tier);

        tracing::debug!(
            observations = observations.len(),
            make = %vehicle.make,
            tier_multiplier = tier_mult,
            labor_multiplier = labor_mult,
            "Building estimate"
        );

        let futures: Vec<_> = observations
            .into_iter()
            .map(|obs| self.price_observation(obs, vehicle, tier_mult, labor_mult))
            .collect();

        join_all(futures).await
    }

    async fn price_observation(
        &self,
        obs: DamageObservation,
        vehicle: &VehicleDescriptor,
        tier_mult: f64,
        labor_mult: f64,
    ) -> EstimateLineItem {
        let priced = match obs.part_name.as_deref().filter(|_| obs.requires_part_replacement) {
            Some(part_name) => {
                self.price_replacement(part_name, vehicle, tier_mult, labor_mult)
                    .await
            }
            None => price_repair(&obs, tier_mult, labor_mult),
        };

        let is_included = obs.severity != Severity::Minor;

        EstimateLineItem {
            id: obs.id,
            location: obs.location,
            damage_type: obs.damage_type,
            severity: obs.severity,
            size_estimate: obs.size_estimate,
            description: obs.description,
            requires_part_replacement: obs.requires_part_replacement,
            part_name: obs.part_name,
            photo_index: obs.photo_index,
            recommended_repair: priced.recommended_repair,
            parts_cost_low: priced.parts_low,
            parts_cost_high: priced.parts_high,
            labor_cost_low: priced.labor_low,
            labor_cost_high: priced.labor_high,
            cost_low: priced.parts_low + priced.labor_low,
            cost_high: priced.parts_high + priced.labor_high,
            pricing_source: priced.source,
            purchase_link: priced.purchase_link,
            is_included,
        }
    }

    /// Replacement path: live-resolved part price plus installation labor.
    ///
    /// The tier multiplier scales labor always but parts only when the price
    /// came from the static table; marketplace prices already reflect what
    /// the part costs for this vehicle and are not re-scaled.
    async fn price_replacement(
        &self,
        part_name: &str,
        vehicle: &VehicleDescriptor,
        tier_mult: f64,
        labor_mult: f64,
    ) -> PricedRepair {
        let quote = self.resolver.resolve(part_name, vehicle).await;

        let parts_scale = match quote.source {
            PricingSource::Static => tier_mult,
            PricingSource::Marketplace | PricingSource::Cache => 1.0,
        };
        let mut parts_low = round_usd(quote.price_low * parts_scale);
        let mut parts_high = round_usd(quote.price_high * parts_scale);

        let install = tables::installation_labor(part_name);
        let mut labor_low = round_usd(install.low * tier_mult * labor_mult);
        let mut labor_high = round_usd(install.high * tier_mult * labor_mult);

        // Body panels need paint-matching on top of installation
        let paintable = tables::is_paintable_panel(part_name);
        if paintable {
            let respray = tables::repair_cost("full_panel_respray");
            labor_low += round_usd(respray.labor.low * tier_mult * labor_mult);
            labor_high += round_usd(respray.labor.high * tier_mult * labor_mult);
            parts_low += respray.materials.low;
            parts_high += respray.materials.high;
        }

        let recommended_repair = if paintable {
            format!("Replace {} (includes paint matching)", part_name)
        } else {
            format!("Replace {}", part_name)
        };

        // Line items report marketplace/static provenance; a cache hit keeps
        // the provenance it was stored with
        let source = match quote.source {
            PricingSource::Static => PricingSource::Static,
            _ => PricingSource::Marketplace,
        };

        PricedRepair {
            recommended_repair,
            parts_low,
            parts_high,
            labor_low,
            labor_high,
            source,
            purchase_link: quote.purchase_link,
        }
    }
}

/// Repair-only path: the mapped operation's baseline costs, with labor scaled
/// by tier and labor rate. Materials are consumables whose cost is largely
/// tier-independent, so they stay at baseline.
fn price_repair(obs: &DamageObservation, tier_mult: f64, labor_mult: f64) -> PricedRepair {
    let operation_id = repair_type_for(obs.damage_type, obs.severity);
    let cost = tables::repair_cost(operation_id);

    let purchase_link = ebay::search_page_url(tables::product_search_query(cost.category));

    PricedRepair {
        recommended_repair: cost.description.to_string(),
        parts_low: cost.materials.low,
        parts_high: cost.materials.high,
        labor_low: round_usd(cost.labor.low * tier_mult * labor_mult),
        labor_high: round_usd(cost.labor.high * tier_mult * labor_mult),
        source: PricingSource::Static,
        purchase_link,
    }
}

struct PricedRepair {
    recommended_repair: String,
    parts_low: f64,
    parts_high: f64,
    labor_low: f64,
    labor_high: f64,
    source: PricingSource,
    purchase_link: Option<url::Url>,
}
