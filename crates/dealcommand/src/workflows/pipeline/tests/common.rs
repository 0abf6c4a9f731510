use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::deal::DealInput;
use crate::workflows::leads::LeadQualificationInput;
use crate::workflows::market::MarketData;
use crate::workflows::pipeline::domain::{
    Buyer, BuyerDraft, LeadDraft, LeadId, PipelineLead, RecordId, SavedDeal, SavedMarket,
};
use crate::workflows::pipeline::kpi::{DailyChecklist, KpiSnapshot};
use crate::workflows::pipeline::repository::{KpiRepository, PipelineRepository, RepositoryError};
use crate::workflows::pipeline::PipelineService;
use crate::workflows::reference::UsState;

pub(super) fn march_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn march_second() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn lead_draft(address: &str) -> LeadDraft {
    LeadDraft {
        address: address.to_string(),
        city: "Kansas City".to_string(),
        state: Some(UsState::Missouri),
        list_price: 150_000.0,
        zestimate: 180_000.0,
        asking_price: 145_000.0,
        seller_name: "Dana".to_string(),
        seller_phone: "816-555-0142".to_string(),
        seller_email: "dana@example.com".to_string(),
        arv: 220_000.0,
        repair_estimate: 30_000.0,
        ..LeadDraft::default()
    }
}

pub(super) fn qualifying_answers() -> LeadQualificationInput {
    LeadQualificationInput {
        is_owner: true,
        is_motivated: true,
        is_listed_fsbo: false,
        is_listed_mls: false,
        is_under_contract: false,
        asking_price_ratio: 0.8,
        seller_motivation: 8,
        sale_timeline_days: 30,
        state: UsState::Missouri,
    }
}

pub(super) fn market() -> MarketData {
    MarketData {
        city: "Tampa".to_string(),
        state: UsState::Florida,
        msa_population: 500_000.0,
        city_population: 150_000.0,
        median_price: 300_000.0,
        days_on_market: 30.0,
        pending_ratio: 30.0,
    }
}

pub(super) fn deal() -> DealInput {
    DealInput {
        address: "9101 E 50th St".to_string(),
        list_price: 100_000.0,
        zestimate: 120_000.0,
        repair_estimate: 20_000.0,
        arv: 160_000.0,
        keywords: vec!["as-is".to_string()],
        days_on_market: 45,
        seller_motivation: 7,
    }
}

pub(super) fn buyer() -> BuyerDraft {
    BuyerDraft {
        name: "Midwest Holdings".to_string(),
        email: "acquisitions@example.com".to_string(),
        max_price: 180_000.0,
        markets: vec!["Kansas City".to_string()],
        ..BuyerDraft::default()
    }
}

#[derive(Default)]
pub(super) struct MemoryPipeline {
    leads: Mutex<Vec<PipelineLead>>,
    markets: Mutex<Vec<SavedMarket>>,
    deals: Mutex<Vec<SavedDeal>>,
    buyers: Mutex<Vec<Buyer>>,
}

impl PipelineRepository for MemoryPipeline {
    fn insert_lead(&self, lead: PipelineLead) -> Result<PipelineLead, RepositoryError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        if guard.iter().any(|existing| existing.id == lead.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(lead.clone());
        Ok(lead)
    }

    fn update_lead(&self, lead: PipelineLead) -> Result<(), RepositoryError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == lead.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = lead;
        Ok(())
    }

    fn fetch_lead(&self, id: &LeadId) -> Result<Option<PipelineLead>, RepositoryError> {
        let guard = self.leads.lock().expect("lead mutex poisoned");
        Ok(guard.iter().find(|lead| &lead.id == id).cloned())
    }

    fn list_leads(&self) -> Result<Vec<PipelineLead>, RepositoryError> {
        Ok(self.leads.lock().expect("lead mutex poisoned").clone())
    }

    fn remove_lead(&self, id: &LeadId) -> Result<(), RepositoryError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        let before = guard.len();
        guard.retain(|lead| &lead.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn insert_market(&self, market: SavedMarket) -> Result<SavedMarket, RepositoryError> {
        self.markets
            .lock()
            .expect("market mutex poisoned")
            .push(market.clone());
        Ok(market)
    }

    fn list_markets(&self) -> Result<Vec<SavedMarket>, RepositoryError> {
        Ok(self.markets.lock().expect("market mutex poisoned").clone())
    }

    fn insert_deal(&self, deal: SavedDeal) -> Result<SavedDeal, RepositoryError> {
        self.deals
            .lock()
            .expect("deal mutex poisoned")
            .push(deal.clone());
        Ok(deal)
    }

    fn list_deals(&self) -> Result<Vec<SavedDeal>, RepositoryError> {
        Ok(self.deals.lock().expect("deal mutex poisoned").clone())
    }

    fn insert_buyer(&self, buyer: Buyer) -> Result<Buyer, RepositoryError> {
        self.buyers
            .lock()
            .expect("buyer mutex poisoned")
            .push(buyer.clone());
        Ok(buyer)
    }

    fn list_buyers(&self) -> Result<Vec<Buyer>, RepositoryError> {
        Ok(self.buyers.lock().expect("buyer mutex poisoned").clone())
    }

    fn remove_buyer(&self, id: &RecordId) -> Result<(), RepositoryError> {
        let mut guard = self.buyers.lock().expect("buyer mutex poisoned");
        let before = guard.len();
        guard.retain(|buyer| &buyer.id != id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryKpis {
    snapshot: Mutex<Option<KpiSnapshot>>,
    checklist: Mutex<Option<DailyChecklist>>,
}

impl MemoryKpis {
    pub(super) fn seeded(snapshot: KpiSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            checklist: Mutex::new(None),
        }
    }
}

impl KpiRepository for MemoryKpis {
    fn load_snapshot(&self) -> Result<Option<KpiSnapshot>, RepositoryError> {
        Ok(self.snapshot.lock().expect("kpi mutex poisoned").clone())
    }

    fn store_snapshot(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError> {
        *self.snapshot.lock().expect("kpi mutex poisoned") = Some(snapshot);
        Ok(())
    }

    fn load_checklist(&self) -> Result<Option<DailyChecklist>, RepositoryError> {
        Ok(self.checklist.lock().expect("checklist mutex poisoned").clone())
    }

    fn store_checklist(&self, checklist: DailyChecklist) -> Result<(), RepositoryError> {
        *self.checklist.lock().expect("checklist mutex poisoned") = Some(checklist);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl PipelineRepository for UnavailableRepository {
    fn insert_lead(&self, _lead: PipelineLead) -> Result<PipelineLead, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_lead(&self, _lead: PipelineLead) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_lead(&self, _id: &LeadId) -> Result<Option<PipelineLead>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_leads(&self) -> Result<Vec<PipelineLead>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_lead(&self, _id: &LeadId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_market(&self, _market: SavedMarket) -> Result<SavedMarket, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_markets(&self) -> Result<Vec<SavedMarket>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_deal(&self, _deal: SavedDeal) -> Result<SavedDeal, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_deals(&self) -> Result<Vec<SavedDeal>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_buyer(&self, _buyer: Buyer) -> Result<Buyer, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_buyers(&self) -> Result<Vec<Buyer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_buyer(&self, _id: &RecordId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = PipelineService<MemoryPipeline, MemoryKpis>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryPipeline>, Arc<MemoryKpis>) {
    let repository = Arc::new(MemoryPipeline::default());
    let kpis = Arc::new(MemoryKpis::default());
    let service =
        PipelineService::new(repository.clone(), kpis.clone()).with_clock(march_first);
    (service, repository, kpis)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
