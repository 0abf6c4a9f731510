use super::domain::{Buyer, LeadId, PipelineLead, RecordId, SavedDeal, SavedMarket};
use super::kpi::{DailyChecklist, KpiSnapshot};

/// Storage abstraction for leads, saved analyses, and the buyer list.
pub trait PipelineRepository: Send + Sync {
    fn insert_lead(&self, lead: PipelineLead) -> Result<PipelineLead, RepositoryError>;
    fn update_lead(&self, lead: PipelineLead) -> Result<(), RepositoryError>;
    fn fetch_lead(&self, id: &LeadId) -> Result<Option<PipelineLead>, RepositoryError>;
    /// Leads in insertion order.
    fn list_leads(&self) -> Result<Vec<PipelineLead>, RepositoryError>;
    fn remove_lead(&self, id: &LeadId) -> Result<(), RepositoryError>;

    fn insert_market(&self, market: SavedMarket) -> Result<SavedMarket, RepositoryError>;
    fn list_markets(&self) -> Result<Vec<SavedMarket>, RepositoryError>;

    fn insert_deal(&self, deal: SavedDeal) -> Result<SavedDeal, RepositoryError>;
    fn list_deals(&self) -> Result<Vec<SavedDeal>, RepositoryError>;

    fn insert_buyer(&self, buyer: Buyer) -> Result<Buyer, RepositoryError>;
    fn list_buyers(&self) -> Result<Vec<Buyer>, RepositoryError>;
    fn remove_buyer(&self, id: &RecordId) -> Result<(), RepositoryError>;
}

/// Persistence for the daily KPI ledger and checklist.
pub trait KpiRepository: Send + Sync {
    fn load_snapshot(&self) -> Result<Option<KpiSnapshot>, RepositoryError>;
    fn store_snapshot(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError>;
    fn load_checklist(&self) -> Result<Option<DailyChecklist>, RepositoryError>;
    fn store_checklist(&self, checklist: DailyChecklist) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
