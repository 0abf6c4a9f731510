use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::pipeline::{pipeline_router, PipelineService};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn add_lead_route_returns_created_lead() {
    let (service, _, _) = build_service();
    let router = pipeline_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/pipeline/leads",
            json!({
                "address": "9101 E 50th St, Kansas City, MO",
                "state": "MO",
                "list_price": 150000,
                "lead_source": "cold-call"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload["id"]
        .as_str()
        .is_some_and(|id| id.starts_with("lead-")));
    assert_eq!(payload["status"], "new");
    assert_eq!(payload["lead_source"], "cold-call");
    assert_eq!(payload["state"], "MO");
}

#[tokio::test]
async fn add_lead_route_rejects_invalid_amounts() {
    let (service, _, _) = build_service();
    let router = pipeline_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/pipeline/leads",
            json!({ "address": "1 Main St", "list_price": -5 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|error| error.contains("list_price")));
}

#[tokio::test]
async fn lead_handler_returns_not_found_for_unknown_id() {
    let (service, _, _) = build_service();

    let response = crate::workflows::pipeline::router::lead_handler::<MemoryPipeline, MemoryKpis>(
        State(Arc::new(service)),
        axum::extract::Path("lead-000000".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_lead_handler_maps_repository_outage_to_internal_error() {
    let service = Arc::new(PipelineService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryKpis::default()),
    ));

    let response = crate::workflows::pipeline::router::add_lead_handler::<
        UnavailableRepository,
        MemoryKpis,
    >(State(service), axum::Json(lead_draft("1 Offline Way")))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn status_route_moves_lead_through_pipeline() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let lead = service
        .add_lead(lead_draft("4410 Troost Ave"))
        .expect("lead stored");

    let response = pipeline_router(service.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/pipeline/leads/{}/status", lead.id.0),
            json!({ "status": "under-contract" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "under-contract");
    assert_eq!(
        service.kpi().expect("kpi").snapshot.under_contract,
        1.0
    );
}

#[tokio::test]
async fn qualify_route_returns_lead_and_outcome() {
    let (service, _, _) = build_service();
    let router = pipeline_router(Arc::new(service));

    let body = json!({
        "lead": serde_json::to_value(lead_draft("5200 Swope Pkwy")).expect("draft json"),
        "answers": serde_json::to_value(qualifying_answers()).expect("answers json"),
    });
    let response = router
        .oneshot(json_request("POST", "/api/v1/pipeline/leads/qualify", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["qualification"]["badge"], "eligible");
    assert_eq!(payload["lead"]["status"], "qualified");
    assert_eq!(payload["lead"]["partner_eligible"], true);
}

#[tokio::test]
async fn deal_route_saves_flattened_payload() {
    let (service, _, _) = build_service();
    let router = pipeline_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/pipeline/deals",
            serde_json::to_value(deal()).expect("deal json"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["analysis"]["mao"], 92_000.0);
    assert!(payload.get("linked_lead_id").is_none());
}

#[tokio::test]
async fn kpi_routes_update_and_report_progress() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    let response = pipeline_router(service.clone())
        .oneshot(json_request(
            "PUT",
            "/api/v1/pipeline/kpi",
            json!({ "metric": "outreach_sent", "value": 20 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = pipeline_router(service.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/pipeline/checklist/toggle",
            json!({ "item": "log-kpis" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = pipeline_router(service)
        .oneshot(get_request("/api/v1/pipeline/kpi"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["snapshot"]["outreach_sent"], 20.0);
    assert_eq!(payload["targets"]["estimated_spread"], 25_000.0);
    assert_eq!(payload["checklist"]["completed"], json!(["log-kpis"]));
}

#[tokio::test]
async fn buyer_routes_add_and_delete() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    let response = pipeline_router(service.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/pipeline/buyers",
            json!({ "name": "Midwest Holdings", "buyer_type": "fix-flip" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    let buyer_id = payload["id"].as_str().expect("buyer id").to_string();

    let response = pipeline_router(service.clone())
        .oneshot(
            Request::delete(format!("/api/v1/pipeline/buyers/{buyer_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = pipeline_router(service)
        .oneshot(get_request("/api/v1/pipeline/buyers"))
        .await
        .expect("route executes");
    assert_eq!(read_json_body(response).await, json!([]));
}
