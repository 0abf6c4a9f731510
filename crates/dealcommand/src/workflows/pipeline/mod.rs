//! Lead pipeline: stored leads, saved market and deal analyses, the buyer list,
//! and the daily KPI ledger, behind injectable repositories.

pub mod domain;
pub mod kpi;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Buyer, BuyerDraft, BuyerType, LeadDraft, LeadId, LeadSource, LeadStatus, PipelineLead,
    RecordId, SavedDeal, SavedMarket,
};
pub use kpi::{ChecklistItem, DailyChecklist, DailyTargets, KpiMetric, KpiReport, KpiSnapshot};
pub use repository::{KpiRepository, PipelineRepository, RepositoryError};
pub use router::pipeline_router;
pub use service::{
    Clock, PipelineError, PipelineService, PipelineSummary, QualifiedLead, QualifyLeadRequest,
    SaveDealRequest,
};
