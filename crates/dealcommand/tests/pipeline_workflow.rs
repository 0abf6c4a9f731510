//! Lead pipeline scenarios driven through the public service facade and HTTP router.

mod common {
    use std::sync::Mutex;

    use dealcommand::workflows::pipeline::{
        Buyer, DailyChecklist, KpiRepository, KpiSnapshot, LeadId, PipelineLead,
        PipelineRepository, RecordId, RepositoryError, SavedDeal, SavedMarket,
    };

    #[derive(Default)]
    pub(super) struct Store {
        leads: Mutex<Vec<PipelineLead>>,
        markets: Mutex<Vec<SavedMarket>>,
        deals: Mutex<Vec<SavedDeal>>,
        buyers: Mutex<Vec<Buyer>>,
        snapshot: Mutex<Option<KpiSnapshot>>,
        checklist: Mutex<Option<DailyChecklist>>,
    }

    impl PipelineRepository for Store {
        fn insert_lead(&self, lead: PipelineLead) -> Result<PipelineLead, RepositoryError> {
            self.leads.lock().expect("poisoned").push(lead.clone());
            Ok(lead)
        }

        fn update_lead(&self, lead: PipelineLead) -> Result<(), RepositoryError> {
            let mut guard = self.leads.lock().expect("poisoned");
            let slot = guard
                .iter_mut()
                .find(|existing| existing.id == lead.id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = lead;
            Ok(())
        }

        fn fetch_lead(&self, id: &LeadId) -> Result<Option<PipelineLead>, RepositoryError> {
            let guard = self.leads.lock().expect("poisoned");
            Ok(guard.iter().find(|lead| &lead.id == id).cloned())
        }

        fn list_leads(&self) -> Result<Vec<PipelineLead>, RepositoryError> {
            Ok(self.leads.lock().expect("poisoned").clone())
        }

        fn remove_lead(&self, id: &LeadId) -> Result<(), RepositoryError> {
            self.leads.lock().expect("poisoned").retain(|lead| &lead.id != id);
            Ok(())
        }

        fn insert_market(&self, market: SavedMarket) -> Result<SavedMarket, RepositoryError> {
            self.markets.lock().expect("poisoned").push(market.clone());
            Ok(market)
        }

        fn list_markets(&self) -> Result<Vec<SavedMarket>, RepositoryError> {
            Ok(self.markets.lock().expect("poisoned").clone())
        }

        fn insert_deal(&self, deal: SavedDeal) -> Result<SavedDeal, RepositoryError> {
            self.deals.lock().expect("poisoned").push(deal.clone());
            Ok(deal)
        }

        fn list_deals(&self) -> Result<Vec<SavedDeal>, RepositoryError> {
            Ok(self.deals.lock().expect("poisoned").clone())
        }

        fn insert_buyer(&self, buyer: Buyer) -> Result<Buyer, RepositoryError> {
            self.buyers.lock().expect("poisoned").push(buyer.clone());
            Ok(buyer)
        }

        fn list_buyers(&self) -> Result<Vec<Buyer>, RepositoryError> {
            Ok(self.buyers.lock().expect("poisoned").clone())
        }

        fn remove_buyer(&self, id: &RecordId) -> Result<(), RepositoryError> {
            self.buyers
                .lock()
                .expect("poisoned")
                .retain(|buyer| &buyer.id != id);
            Ok(())
        }
    }

    impl KpiRepository for Store {
        fn load_snapshot(&self) -> Result<Option<KpiSnapshot>, RepositoryError> {
            Ok(self.snapshot.lock().expect("poisoned").clone())
        }

        fn store_snapshot(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError> {
            *self.snapshot.lock().expect("poisoned") = Some(snapshot);
            Ok(())
        }

        fn load_checklist(&self) -> Result<Option<DailyChecklist>, RepositoryError> {
            Ok(self.checklist.lock().expect("poisoned").clone())
        }

        fn store_checklist(&self, checklist: DailyChecklist) -> Result<(), RepositoryError> {
            *self.checklist.lock().expect("poisoned") = Some(checklist);
            Ok(())
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::Store;
use dealcommand::workflows::deal::DealInput;
use dealcommand::workflows::leads::{asking_price_ratio, LeadQualificationInput};
use dealcommand::workflows::market::{MarketData, MarketStatus};
use dealcommand::workflows::pipeline::{
    pipeline_router, LeadDraft, LeadSource, LeadStatus, PipelineService, QualifyLeadRequest,
    SaveDealRequest,
};
use dealcommand::workflows::reference::UsState;
use serde_json::{json, Value};
use tower::ServiceExt;

fn service() -> Arc<PipelineService<Store, Store>> {
    let store = Arc::new(Store::default());
    Arc::new(PipelineService::new(store.clone(), store))
}

#[test]
fn market_to_closing_flow_updates_the_ledger() {
    let service = service();

    let market = service
        .save_market(MarketData {
            city: "Kansas City".to_string(),
            state: UsState::Missouri,
            msa_population: 2_200_000.0,
            city_population: 508_000.0,
            median_price: 235_000.0,
            days_on_market: 28.0,
            pending_ratio: 32.0,
        })
        .expect("market saved");
    assert_eq!(market.verdict, MarketStatus::Ideal);
    assert!(market.is_non_disclosure);

    let lead = service
        .add_lead(LeadDraft {
            address: "9101 E 50th St, Kansas City, MO 64133".to_string(),
            city: "Kansas City".to_string(),
            state: Some(UsState::Missouri),
            list_price: 100_000.0,
            zestimate: 120_000.0,
            asking_price: 95_000.0,
            lead_source: LeadSource::Zillow,
            arv: 160_000.0,
            repair_estimate: 20_000.0,
            ..LeadDraft::default()
        })
        .expect("lead added");

    let deal = service
        .save_deal(SaveDealRequest {
            deal: DealInput {
                address: lead.details.address.clone(),
                list_price: 100_000.0,
                zestimate: 120_000.0,
                repair_estimate: 20_000.0,
                arv: 160_000.0,
                keywords: vec!["Motivated Seller".to_string()],
                days_on_market: 75,
                seller_motivation: 8,
            },
            linked_lead_id: Some(lead.id.clone()),
        })
        .expect("deal saved");
    assert_eq!(deal.linked_lead_id.as_ref(), Some(&lead.id));
    assert_eq!(
        deal.analysis.matched_keywords,
        vec!["Motivated Seller".to_string()]
    );

    let qualified = service
        .qualify(QualifyLeadRequest {
            lead: LeadDraft {
                mao: deal.analysis.mao,
                ..lead.details.clone()
            },
            answers: LeadQualificationInput {
                is_owner: true,
                is_motivated: true,
                is_listed_fsbo: false,
                is_listed_mls: false,
                is_under_contract: false,
                asking_price_ratio: asking_price_ratio(95_000.0, 120_000.0),
                seller_motivation: 8,
                sale_timeline_days: 45,
                state: UsState::Missouri,
            },
        })
        .expect("lead qualified");
    assert_eq!(qualified.lead.id, lead.id);
    assert_eq!(qualified.lead.details.mao, 92_000.0);

    service
        .record_outreach(Some(&lead.id), 3)
        .expect("outreach recorded");
    service
        .update_status(&lead.id, LeadStatus::UnderContract)
        .expect("under contract");
    service
        .update_status(&lead.id, LeadStatus::Closed)
        .expect("closed");

    let report = service.kpi().expect("kpi report");
    let snapshot = &report.snapshot;
    assert_eq!(snapshot.markets_tested, 1.0);
    assert_eq!(snapshot.leads_contacted, 1.0);
    assert_eq!(snapshot.deals_analyzed, 1.0);
    assert_eq!(snapshot.estimated_spread, 12_000.0);
    assert_eq!(snapshot.qualified_leads, 1.0);
    assert_eq!(snapshot.outreach_sent, 3.0);
    assert_eq!(snapshot.under_contract, 1.0);
    assert_eq!(snapshot.closed_deals, 1.0);
    assert!(report.progress_pct > 0.0 && report.progress_pct <= 100.0);

    let summary = service.summary().expect("summary");
    assert_eq!(summary.total_leads, 1);
    assert_eq!(summary.active_leads, 0);
    assert_eq!(summary.saved_deals, 1);
}

#[tokio::test]
async fn router_reports_validation_and_missing_records() {
    let router = pipeline_router(service());

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/pipeline/markets")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "city": "",
                        "state": "FL",
                        "msa_population": 1,
                        "city_population": 1,
                        "median_price": 1,
                        "days_on_market": 1,
                        "pending_ratio": 1
                    }))
                    .expect("serialize"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = router
        .oneshot(
            Request::get("/api/v1/pipeline/leads/lead-424242")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert!(payload["error"]
        .as_str()
        .is_some_and(|error| error.contains("not found")));
}
