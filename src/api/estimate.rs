//! REST API endpoint for building reconditioning estimates

use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::model::estimate::{DamageObservation, EstimateLineItem, VehicleDescriptor};
use crate::service::EstimateService;

use super::error::ApiError;

const MIN_MODEL_YEAR: u16 = 1900;
const MAX_MODEL_YEAR: u16 = 2100;

/// Analysis request: the detection collaborator's observations plus the
/// vehicle under inspection.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub vehicle: VehicleDescriptor,
    pub observations: Vec<DamageObservation>,
    /// Dealer's labor-rate tier ("low", "medium", "high"); defaults from
    /// service configuration when absent
    #[serde(default)]
    pub labor_tier: Option<String>,
}

/// Cost totals over the line items shipped pre-checked into the estimate.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTotals {
    pub cost_low: f64,
    pub cost_high: f64,
    pub included_items: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub request_id: String,
    pub line_items: Vec<EstimateLineItem>,
    pub totals: EstimateTotals,
}

fn validate(request: &EstimateRequest) -> Result<(), ApiError> {
    let vehicle = &request.vehicle;

    if vehicle.make.trim().is_empty() {
        return Err(ApiError::BadRequest("vehicle make must not be empty".to_string()));
    }
    if vehicle.model.trim().is_empty() {
        return Err(ApiError::BadRequest("vehicle model must not be empty".to_string()));
    }
    if !(MIN_MODEL_YEAR..=MAX_MODEL_YEAR).contains(&vehicle.year) {
        return Err(ApiError::BadRequest(format!(
            "vehicle year {} outside supported range {}-{}",
            vehicle.year, MIN_MODEL_YEAR, MAX_MODEL_YEAR
        )));
    }

    Ok(())
}

/// Build a priced estimate from damage observations
#[utoipa::path(
    post,
    path = "/v1/estimates",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Estimate built successfully", body = EstimateResponse),
        (status = 400, description = "Malformed vehicle descriptor or observations"),
        (status = 500, description = "Internal server error")
    ),
    tag = "estimates"
)]
#[post("/v1/estimates")]
pub async fn build_estimate(
    service: web::Data<Arc<EstimateService>>,
    body: web::Json<EstimateRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    validate(&request)?;

    let request_id = Uuid::new_v4().to_string();
    tracing::info!(
        request_id = %request_id,
        year = request.vehicle.year,
        make = %request.vehicle.make,
        model = %request.vehicle.model,
        observations = request.observations.len(),
        "Building estimate"
    );

    let line_items = service
        .build_estimate(
            request.observations,
            &request.vehicle,
            request.labor_tier.as_deref(),
        )
        .await;

    let included: Vec<&EstimateLineItem> =
        line_items.iter().filter(|item| item.is_included).collect();
    let totals = EstimateTotals {
        cost_low: included.iter().map(|item| item.cost_low).sum(),
        cost_high: included.iter().map(|item| item.cost_high).sum(),
        included_items: included.len(),
    };

    Ok(HttpResponse::Ok().json(EstimateResponse {
        request_id,
        line_items,
        totals,
    }))
}

/// OpenAPI documentation for the estimate API
#[derive(OpenApi)]
#[openapi(
    paths(
        build_estimate,
        super::health::liveness,
        super::health::readiness,
    ),
    components(schemas(
        EstimateRequest,
        EstimateResponse,
        EstimateTotals,
        DamageObservation,
        VehicleDescriptor,
        EstimateLineItem,
        crate::model::estimate::DamageType,
        crate::model::estimate::Severity,
        crate::model::price::PricingSource,
        super::health::HealthStatus,
        super::health::ReadinessStatus,
        super::health::DependencyHealth,
    )),
    tags(
        (name = "estimates", description = "Reconditioning cost estimates"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Configure estimate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(build_estimate);
}
