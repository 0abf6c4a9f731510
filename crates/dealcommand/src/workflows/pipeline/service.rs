use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{
    Buyer, BuyerDraft, LeadDraft, LeadId, LeadStatus, PipelineLead, RecordId, SavedDeal,
    SavedMarket,
};
use super::kpi::{ChecklistItem, DailyChecklist, KpiMetric, KpiReport, KpiSnapshot};
use super::repository::{KpiRepository, PipelineRepository, RepositoryError};
use crate::workflows::deal::{analyze_deal, DealInput, MAO_ARV_RATIO};
use crate::workflows::leads::{qualify_lead, LeadQualification, LeadQualificationInput};
use crate::workflows::market::{evaluate_market, MarketData};
use crate::workflows::validation::{non_negative, InputError};

/// Clock used to stamp records and roll the KPI ledger over at midnight UTC.
pub type Clock = fn() -> DateTime<Utc>;

/// Service composing the pipeline store, the KPI ledger, and the scoring engines.
///
/// Mutations run one at a time so street dedup and KPI counters see each other's writes.
pub struct PipelineService<R, K> {
    repository: Arc<R>,
    kpis: Arc<K>,
    clock: Clock,
    writes: Mutex<()>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

fn next_record_id(prefix: &str) -> RecordId {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecordId(format!("{prefix}-{id:06}"))
}

/// Lead details plus the qualification call answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyLeadRequest {
    pub lead: LeadDraft,
    pub answers: LeadQualificationInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedLead {
    pub lead: PipelineLead,
    pub qualification: LeadQualification,
}

/// Deal figures to analyze, optionally tied to an existing lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDealRequest {
    #[serde(flatten)]
    pub deal: DealInput,
    #[serde(default)]
    pub linked_lead_id: Option<LeadId>,
}

/// Headline numbers across the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_leads: usize,
    pub active_leads: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    /// Sum of MAO minus asking (or list) price over live leads, ignoring negative spreads.
    pub pipeline_spread: f64,
    pub saved_markets: usize,
    pub saved_deals: usize,
    pub buyers: usize,
}

impl<R, K> PipelineService<R, K>
where
    R: PipelineRepository + 'static,
    K: KpiRepository + 'static,
{
    pub fn new(repository: Arc<R>, kpis: Arc<K>) -> Self {
        Self {
            repository,
            kpis,
            clock: Utc::now,
            writes: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a lead, or refresh the existing lead with the same street address.
    pub fn add_lead(&self, draft: LeadDraft) -> Result<PipelineLead, PipelineError> {
        draft.validate()?;
        let _writes = self.write_lock();
        let (lead, created) = self.upsert_lead(draft)?;
        if created {
            self.bump(KpiMetric::LeadsContacted, 1.0)?;
        }
        Ok(lead)
    }

    fn upsert_lead(&self, draft: LeadDraft) -> Result<(PipelineLead, bool), PipelineError> {
        let key = draft.street_key();
        let existing = self
            .repository
            .list_leads()?
            .into_iter()
            .find(|lead| lead.details.street_key() == key);

        match existing {
            Some(existing) => {
                let merged = PipelineLead {
                    id: existing.id,
                    date_added: existing.date_added,
                    details: draft,
                };
                self.repository.update_lead(merged.clone())?;
                info!(lead_id = %merged.id.0, "pipeline lead refreshed");
                Ok((merged, false))
            }
            None => {
                let lead = PipelineLead {
                    id: next_lead_id(),
                    date_added: self.now(),
                    details: draft,
                };
                let stored = self.repository.insert_lead(lead)?;
                info!(lead_id = %stored.id.0, address = %stored.details.address, "pipeline lead added");
                Ok((stored, true))
            }
        }
    }

    pub fn update_status(
        &self,
        id: &LeadId,
        status: LeadStatus,
    ) -> Result<PipelineLead, PipelineError> {
        let _writes = self.write_lock();
        let mut lead = self.lead(id)?;
        lead.details.status = status;
        lead.details.last_contact = Some(self.now());
        self.repository.update_lead(lead.clone())?;

        match status {
            LeadStatus::UnderContract => self.bump(KpiMetric::UnderContract, 1.0)?,
            LeadStatus::Closed => self.bump(KpiMetric::ClosedDeals, 1.0)?,
            _ => {}
        }
        info!(lead_id = %id.0, status = status.label(), "pipeline lead status changed");
        Ok(lead)
    }

    /// Count sent outreach and, when a lead is named, mark it contacted.
    pub fn record_outreach(
        &self,
        lead_id: Option<&LeadId>,
        messages: usize,
    ) -> Result<Option<PipelineLead>, PipelineError> {
        let _writes = self.write_lock();
        let touched = match lead_id {
            Some(id) => {
                let mut lead = self.lead(id)?;
                lead.details.status = LeadStatus::Contacted;
                lead.details.last_contact = Some(self.now());
                self.repository.update_lead(lead.clone())?;
                Some(lead)
            }
            None => None,
        };
        if messages > 0 {
            self.bump(KpiMetric::OutreachSent, messages as f64)?;
        }
        debug!(messages, "outreach recorded");
        Ok(touched)
    }

    /// Run the qualification checks and store the outcome on the lead.
    pub fn qualify(&self, request: QualifyLeadRequest) -> Result<QualifiedLead, PipelineError> {
        let QualifyLeadRequest { mut lead, answers } = request;
        lead.validate()?;
        answers.validate()?;
        let _writes = self.write_lock();

        let qualification = qualify_lead(&answers);
        lead.status = if qualification.qualified {
            LeadStatus::Qualified
        } else {
            LeadStatus::New
        };
        lead.partner_eligible = qualification.qualified;
        lead.notes = qualification.summary();
        lead.last_contact = Some(self.now());
        lead.state = lead.state.or(Some(answers.state));
        if lead.mao <= 0.0 && lead.arv > 0.0 {
            lead.mao = lead.arv * MAO_ARV_RATIO - lead.repair_estimate;
        }

        let (lead, _) = self.upsert_lead(lead)?;
        if qualification.qualified {
            self.bump(KpiMetric::QualifiedLeads, 1.0)?;
        }
        info!(
            lead_id = %lead.id.0,
            badge = qualification.badge.label(),
            "lead qualification stored"
        );
        Ok(QualifiedLead {
            lead,
            qualification,
        })
    }

    pub fn save_market(&self, data: MarketData) -> Result<SavedMarket, PipelineError> {
        data.validate()?;
        let _writes = self.write_lock();
        let score = evaluate_market(&data);
        let market = SavedMarket {
            id: next_record_id("mkt"),
            city: data.city,
            state: data.state,
            msa_population: data.msa_population,
            city_population: data.city_population,
            median_price: data.median_price,
            days_on_market: data.days_on_market,
            pending_ratio: data.pending_ratio,
            score: score.score,
            verdict: score.status,
            flags: score.flags,
            is_attorney_state: data.state.is_attorney_state(),
            is_non_disclosure: data.state.is_non_disclosure_state(),
            is_restricted: data.state.is_restricted(),
            date_analyzed: self.now(),
        };
        let stored = self.repository.insert_market(market)?;
        self.bump(KpiMetric::MarketsTested, 1.0)?;
        info!(market_id = %stored.id.0, score = stored.score, "market saved");
        Ok(stored)
    }

    pub fn save_deal(&self, request: SaveDealRequest) -> Result<SavedDeal, PipelineError> {
        let SaveDealRequest {
            deal,
            linked_lead_id,
        } = request;
        deal.validate()?;
        let _writes = self.write_lock();
        if let Some(id) = &linked_lead_id {
            self.lead(id)?;
        }

        let analysis = analyze_deal(&deal);
        let spread = analysis.spread_potential;
        let saved = SavedDeal {
            id: next_record_id("deal"),
            address: deal.address,
            list_price: deal.list_price,
            zestimate: deal.zestimate,
            arv: deal.arv,
            repair_estimate: deal.repair_estimate,
            analysis,
            linked_lead_id,
            date_analyzed: self.now(),
        };
        let stored = self.repository.insert_deal(saved)?;
        self.bump(KpiMetric::DealsAnalyzed, 1.0)?;
        if spread > 0.0 {
            self.bump(KpiMetric::EstimatedSpread, spread)?;
        }
        info!(deal_id = %stored.id.0, spread, "deal saved");
        Ok(stored)
    }

    pub fn add_buyer(&self, draft: BuyerDraft) -> Result<Buyer, PipelineError> {
        draft.validate()?;
        let _writes = self.write_lock();
        let buyer = Buyer {
            id: next_record_id("buyer"),
            date_added: self.now(),
            last_contact: None,
            deals_sent: 0,
            details: draft,
        };
        let stored = self.repository.insert_buyer(buyer)?;
        self.bump(KpiMetric::BuyerContacts, 1.0)?;
        info!(buyer_id = %stored.id.0, "buyer added");
        Ok(stored)
    }

    pub fn buyers(&self) -> Result<Vec<Buyer>, PipelineError> {
        Ok(self.repository.list_buyers()?)
    }

    pub fn remove_buyer(&self, id: &RecordId) -> Result<(), PipelineError> {
        let _writes = self.write_lock();
        self.repository.remove_buyer(id)?;
        info!(buyer_id = %id.0, "buyer removed");
        Ok(())
    }

    /// Newest leads first.
    pub fn leads(&self) -> Result<Vec<PipelineLead>, PipelineError> {
        let mut leads = self.repository.list_leads()?;
        leads.reverse();
        Ok(leads)
    }

    pub fn lead(&self, id: &LeadId) -> Result<PipelineLead, PipelineError> {
        let lead = self
            .repository
            .fetch_lead(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(lead)
    }

    pub fn remove_lead(&self, id: &LeadId) -> Result<(), PipelineError> {
        let _writes = self.write_lock();
        self.repository.remove_lead(id)?;
        info!(lead_id = %id.0, "pipeline lead removed");
        Ok(())
    }

    pub fn markets(&self) -> Result<Vec<SavedMarket>, PipelineError> {
        Ok(self.repository.list_markets()?)
    }

    pub fn deals(&self) -> Result<Vec<SavedDeal>, PipelineError> {
        Ok(self.repository.list_deals()?)
    }

    pub fn summary(&self) -> Result<PipelineSummary, PipelineError> {
        let leads = self.repository.list_leads()?;
        let mut by_status = BTreeMap::new();
        for lead in &leads {
            *by_status.entry(lead.details.status.slug()).or_insert(0) += 1;
        }

        let live = leads
            .iter()
            .filter(|lead| lead.details.status != LeadStatus::Dead);
        let pipeline_spread: f64 = live
            .clone()
            .map(|lead| {
                let basis = if lead.details.asking_price > 0.0 {
                    lead.details.asking_price
                } else {
                    lead.details.list_price
                };
                (lead.details.mao - basis).max(0.0)
            })
            .sum();
        let active_leads = live
            .filter(|lead| lead.details.status != LeadStatus::Closed)
            .count();

        Ok(PipelineSummary {
            total_leads: leads.len(),
            active_leads,
            by_status,
            pipeline_spread,
            saved_markets: self.repository.list_markets()?.len(),
            saved_deals: self.repository.list_deals()?.len(),
            buyers: self.repository.list_buyers()?.len(),
        })
    }

    pub fn kpi(&self) -> Result<KpiReport, PipelineError> {
        Ok(KpiReport::build(self.snapshot()?, self.checklist()?))
    }

    /// Overwrite a KPI value, e.g. after a manual correction.
    pub fn set_kpi(&self, metric: KpiMetric, value: f64) -> Result<KpiReport, PipelineError> {
        non_negative("value", value)?;
        let _writes = self.write_lock();
        let snapshot = self.snapshot()?.set(metric, value);
        self.kpis.store_snapshot(snapshot)?;
        debug!(?metric, value, "kpi overwritten");
        self.kpi()
    }

    pub fn toggle_checklist(&self, item: ChecklistItem) -> Result<KpiReport, PipelineError> {
        let _writes = self.write_lock();
        let checklist = self.checklist()?.toggle(item, self.today());
        self.kpis.store_checklist(checklist)?;
        debug!(?item, "checklist item toggled");
        self.kpi()
    }

    fn snapshot(&self) -> Result<KpiSnapshot, PipelineError> {
        let today = self.today();
        Ok(self
            .kpis
            .load_snapshot()?
            .unwrap_or_else(|| KpiSnapshot::empty(today)))
    }

    fn checklist(&self) -> Result<DailyChecklist, PipelineError> {
        let today = self.today();
        Ok(self
            .kpis
            .load_checklist()?
            .unwrap_or_else(|| DailyChecklist::empty(today)))
    }

    fn bump(&self, metric: KpiMetric, amount: f64) -> Result<(), PipelineError> {
        let snapshot = self.snapshot()?.bump(metric, amount, self.today());
        self.kpis.store_snapshot(snapshot)?;
        debug!(?metric, amount, "kpi bumped");
        Ok(())
    }
}

/// Error raised by the pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
