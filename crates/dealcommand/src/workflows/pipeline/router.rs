use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BuyerDraft, LeadDraft, LeadId, LeadStatus, RecordId};
use super::kpi::{ChecklistItem, KpiMetric};
use super::repository::{KpiRepository, PipelineRepository};
use super::service::{PipelineError, PipelineService, QualifyLeadRequest, SaveDealRequest};
use crate::error::AppError;
use crate::workflows::market::MarketData;

type SharedService<R, K> = Arc<PipelineService<R, K>>;

/// Router builder exposing the lead pipeline, saved analyses, buyers, and KPIs.
pub fn pipeline_router<R, K>(service: SharedService<R, K>) -> Router
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/pipeline/leads",
            get(list_leads_handler::<R, K>).post(add_lead_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/leads/qualify",
            post(qualify_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/leads/:lead_id",
            get(lead_handler::<R, K>).delete(remove_lead_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/leads/:lead_id/status",
            put(status_handler::<R, K>),
        )
        .route("/api/v1/pipeline/outreach", post(outreach_handler::<R, K>))
        .route(
            "/api/v1/pipeline/markets",
            get(list_markets_handler::<R, K>).post(save_market_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/deals",
            get(list_deals_handler::<R, K>).post(save_deal_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/buyers",
            get(list_buyers_handler::<R, K>).post(add_buyer_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/buyers/:buyer_id",
            delete(remove_buyer_handler::<R, K>),
        )
        .route("/api/v1/pipeline/summary", get(summary_handler::<R, K>))
        .route(
            "/api/v1/pipeline/kpi",
            get(kpi_handler::<R, K>).put(set_kpi_handler::<R, K>),
        )
        .route(
            "/api/v1/pipeline/checklist/toggle",
            post(checklist_handler::<R, K>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: LeadStatus,
}

#[derive(Debug, Deserialize)]
struct OutreachRecord {
    #[serde(default)]
    lead_id: Option<LeadId>,
    messages: usize,
}

#[derive(Debug, Deserialize)]
struct KpiUpdate {
    metric: KpiMetric,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ChecklistToggle {
    item: ChecklistItem,
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, PipelineError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PipelineError) -> Response {
    AppError::from(error).into_response()
}

pub(crate) async fn add_lead_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(draft): Json<LeadDraft>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::CREATED, service.add_lead(draft))
}

async fn list_leads_handler<R, K>(State(service): State<SharedService<R, K>>) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.leads())
}

pub(crate) async fn lead_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.lead(&LeadId(lead_id)))
}

async fn remove_lead_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    match service.remove_lead(&LeadId(lead_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn status_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Path(lead_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_status(&LeadId(lead_id), update.status),
    )
}

async fn qualify_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(request): Json<QualifyLeadRequest>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.qualify(request))
}

async fn outreach_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(record): Json<OutreachRecord>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    let result = service
        .record_outreach(record.lead_id.as_ref(), record.messages)
        .and_then(|lead| {
            let kpi = service.kpi()?;
            Ok(json!({ "lead": lead, "kpi": kpi }))
        });
    respond(StatusCode::OK, result)
}

async fn save_market_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(data): Json<MarketData>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::CREATED, service.save_market(data))
}

async fn list_markets_handler<R, K>(State(service): State<SharedService<R, K>>) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.markets())
}

async fn save_deal_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(request): Json<SaveDealRequest>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::CREATED, service.save_deal(request))
}

async fn list_deals_handler<R, K>(State(service): State<SharedService<R, K>>) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.deals())
}

async fn add_buyer_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(draft): Json<BuyerDraft>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::CREATED, service.add_buyer(draft))
}

async fn list_buyers_handler<R, K>(State(service): State<SharedService<R, K>>) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.buyers())
}

async fn remove_buyer_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Path(buyer_id): Path<String>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    match service.remove_buyer(&RecordId(buyer_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn summary_handler<R, K>(State(service): State<SharedService<R, K>>) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.summary())
}

async fn kpi_handler<R, K>(State(service): State<SharedService<R, K>>) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.kpi())
}

async fn set_kpi_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(update): Json<KpiUpdate>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.set_kpi(update.metric, update.value))
}

async fn checklist_handler<R, K>(
    State(service): State<SharedService<R, K>>,
    Json(toggle): Json<ChecklistToggle>,
) -> Response
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    respond(StatusCode::OK, service.toggle_checklist(toggle.item))
}
