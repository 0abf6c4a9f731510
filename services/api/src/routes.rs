use crate::infra::{AppState, OutreachDesk};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use dealcommand::error::AppError;
use dealcommand::workflows::deal::{
    analyze_deal, DealAnalysis, DealInput, FlipProjection, FlipRequest, RentalCashflow,
    RentalRequest,
};
use dealcommand::workflows::leads::{qualify_lead, LeadQualification, LeadQualificationInput};
use dealcommand::workflows::market::{evaluate_market, MarketData, MarketScore};
use dealcommand::workflows::outreach::{DispatchReport, ListingLinks, OutreachBatch};
use dealcommand::workflows::pipeline::{
    pipeline_router, KpiRepository, PipelineRepository, PipelineService,
};
use dealcommand::workflows::reference::{StateProfile, UsState, MOTIVATED_KEYWORDS};
use dealcommand::workflows::scripts::{
    zillow_offer_script, DispoPlaybook, ObjectionHandler, OutreachScripts, PartnerChannel,
    OBJECTION_HANDLERS,
};
use dealcommand::workflows::validation::{non_negative, InputError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct OutreachScriptRequest {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) address: String,
    pub(crate) qualifier_price: f64,
    /// Low and high offer for the agent range pitch.
    #[serde(default)]
    pub(crate) offer_range: Option<(f64, f64)>,
    #[serde(default)]
    pub(crate) partner_channel: Option<PartnerChannel>,
    #[serde(default)]
    pub(crate) seller_first_name: String,
    #[serde(default)]
    pub(crate) city: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutreachScriptResponse {
    #[serde(flatten)]
    pub(crate) scripts: OutreachScripts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) zillow_offer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) partner_opening: Option<String>,
    pub(crate) objection_handlers: &'static [ObjectionHandler],
}

#[derive(Debug, Deserialize)]
pub(crate) struct DispoRequest {
    pub(crate) address: String,
    pub(crate) list_price: f64,
    pub(crate) assignment_price: f64,
    #[serde(default)]
    pub(crate) arv: f64,
    #[serde(default)]
    pub(crate) repair_cost: f64,
    #[serde(default)]
    pub(crate) monthly_rent: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StateReference {
    pub(crate) states: Vec<StateProfile>,
    pub(crate) motivated_keywords: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingLinksRequest {
    pub(crate) address: String,
    #[serde(default)]
    pub(crate) city: Option<String>,
    #[serde(default)]
    pub(crate) state: Option<String>,
    #[serde(default)]
    pub(crate) zip: Option<String>,
}

pub(crate) fn with_routes<R, K>(
    service: Arc<PipelineService<R, K>>,
    outreach: Arc<OutreachDesk>,
) -> axum::Router
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    pipeline_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/markets/evaluate",
            axum::routing::post(evaluate_market_endpoint),
        )
        .route(
            "/api/v1/deals/analyze",
            axum::routing::post(analyze_deal_endpoint),
        )
        .route(
            "/api/v1/leads/qualify",
            axum::routing::post(qualify_lead_endpoint),
        )
        .route("/api/v1/returns/flip", axum::routing::post(flip_endpoint))
        .route(
            "/api/v1/returns/rental",
            axum::routing::post(rental_endpoint),
        )
        .route(
            "/api/v1/scripts/outreach",
            axum::routing::post(outreach_scripts_endpoint),
        )
        .route(
            "/api/v1/scripts/dispo",
            axum::routing::post(dispo_playbook_endpoint),
        )
        .route(
            "/api/v1/reference/states",
            axum::routing::get(state_reference_endpoint),
        )
        .route(
            "/api/v1/listings/links",
            axum::routing::post(listing_links_endpoint),
        )
        .route(
            "/api/v1/outreach/send",
            axum::routing::post(send_outreach_endpoint),
        )
        .layer(Extension(outreach))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluate_market_endpoint(
    Json(data): Json<MarketData>,
) -> Result<Json<MarketScore>, AppError> {
    data.validate()?;
    Ok(Json(evaluate_market(&data)))
}

pub(crate) async fn analyze_deal_endpoint(
    Json(input): Json<DealInput>,
) -> Result<Json<DealAnalysis>, AppError> {
    input.validate()?;
    Ok(Json(analyze_deal(&input)))
}

pub(crate) async fn qualify_lead_endpoint(
    Json(input): Json<LeadQualificationInput>,
) -> Result<Json<LeadQualification>, AppError> {
    input.validate()?;
    Ok(Json(qualify_lead(&input)))
}

pub(crate) async fn flip_endpoint(
    Json(request): Json<FlipRequest>,
) -> Result<Json<FlipProjection>, AppError> {
    request.validate()?;
    Ok(Json(request.project()))
}

pub(crate) async fn rental_endpoint(
    Json(request): Json<RentalRequest>,
) -> Result<Json<RentalCashflow>, AppError> {
    request.validate()?;
    Ok(Json(request.project()))
}

pub(crate) async fn outreach_scripts_endpoint(
    Json(request): Json<OutreachScriptRequest>,
) -> Result<Json<OutreachScriptResponse>, AppError> {
    non_negative("qualifier_price", request.qualifier_price)?;
    if let Some((low, high)) = request.offer_range {
        non_negative("offer_range.low", low)?;
        non_negative("offer_range.high", high)?;
    }

    let zillow_offer = request
        .offer_range
        .map(|(low, high)| zillow_offer_script(&request.name, &request.address, low, high));
    let partner_opening = request.partner_channel.map(|channel| {
        channel.opening(&request.seller_first_name, &request.address, &request.city)
    });

    Ok(Json(OutreachScriptResponse {
        scripts: OutreachScripts::generate(
            &request.name,
            &request.address,
            request.qualifier_price,
        ),
        zillow_offer,
        partner_opening,
        objection_handlers: &OBJECTION_HANDLERS,
    }))
}

pub(crate) async fn dispo_playbook_endpoint(
    Json(request): Json<DispoRequest>,
) -> Result<Json<DispoPlaybook>, AppError> {
    non_negative("list_price", request.list_price)?;
    non_negative("assignment_price", request.assignment_price)?;
    non_negative("arv", request.arv)?;
    non_negative("repair_cost", request.repair_cost)?;
    if let Some(rent) = request.monthly_rent {
        non_negative("monthly_rent", rent)?;
    }

    Ok(Json(DispoPlaybook::build(
        &request.address,
        request.list_price,
        request.assignment_price,
        request.arv,
        request.repair_cost,
        request.monthly_rent,
    )))
}

pub(crate) async fn state_reference_endpoint() -> Json<StateReference> {
    Json(StateReference {
        states: UsState::ALL.iter().map(|state| state.profile()).collect(),
        motivated_keywords: &MOTIVATED_KEYWORDS,
    })
}

pub(crate) async fn listing_links_endpoint(
    Json(request): Json<ListingLinksRequest>,
) -> Result<Json<ListingLinks>, AppError> {
    if request.address.trim().is_empty() {
        return Err(InputError::Missing { field: "address" }.into());
    }

    Ok(Json(ListingLinks::for_address(
        &request.address,
        request.city.as_deref(),
        request.state.as_deref(),
        request.zip.as_deref(),
    )))
}

pub(crate) async fn send_outreach_endpoint(
    Extension(desk): Extension<Arc<OutreachDesk>>,
    Json(mut batch): Json<OutreachBatch>,
) -> Result<Json<DispatchReport>, AppError> {
    if batch.is_empty() {
        return Err(InputError::Missing { field: "messages" }.into());
    }
    if batch
        .sender_name
        .as_deref()
        .map_or(true, |name| name.trim().is_empty())
    {
        batch.sender_name = Some(desk.default_sender.clone());
    }

    Ok(Json(desk.dispatcher.dispatch(&batch, Utc::now())))
}
