//! Daily KPI ledger and workflow checklist.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counters tracked against the daily targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiMetric {
    MarketsTested,
    DealsAnalyzed,
    LeadsContacted,
    QualifiedLeads,
    OffersSent,
    UnderContract,
    PartnerSubmissions,
    OutreachSent,
    BuyerContacts,
    EstimatedSpread,
    ClosedDeals,
}

impl KpiMetric {
    pub const ALL: [KpiMetric; 11] = [
        KpiMetric::MarketsTested,
        KpiMetric::DealsAnalyzed,
        KpiMetric::LeadsContacted,
        KpiMetric::QualifiedLeads,
        KpiMetric::OffersSent,
        KpiMetric::UnderContract,
        KpiMetric::PartnerSubmissions,
        KpiMetric::OutreachSent,
        KpiMetric::BuyerContacts,
        KpiMetric::EstimatedSpread,
        KpiMetric::ClosedDeals,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KpiMetric::MarketsTested => "Markets Tested",
            KpiMetric::DealsAnalyzed => "Deals Analyzed",
            KpiMetric::LeadsContacted => "Leads Contacted",
            KpiMetric::QualifiedLeads => "Qualified Leads",
            KpiMetric::OffersSent => "Offers Sent",
            KpiMetric::UnderContract => "Under Contract",
            KpiMetric::PartnerSubmissions => "Partner Submissions",
            KpiMetric::OutreachSent => "Outreach Sent",
            KpiMetric::BuyerContacts => "Buyer Contacts",
            KpiMetric::EstimatedSpread => "Est. Spread ($)",
            KpiMetric::ClosedDeals => "Closed Deals",
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self, KpiMetric::EstimatedSpread)
    }
}

/// One day's KPI values. Currency and counts share `f64` storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub date: NaiveDate,
    pub markets_tested: f64,
    pub deals_analyzed: f64,
    pub leads_contacted: f64,
    pub qualified_leads: f64,
    pub offers_sent: f64,
    pub under_contract: f64,
    pub partner_submissions: f64,
    pub outreach_sent: f64,
    pub buyer_contacts: f64,
    pub estimated_spread: f64,
    pub closed_deals: f64,
}

impl KpiSnapshot {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            markets_tested: 0.0,
            deals_analyzed: 0.0,
            leads_contacted: 0.0,
            qualified_leads: 0.0,
            offers_sent: 0.0,
            under_contract: 0.0,
            partner_submissions: 0.0,
            outreach_sent: 0.0,
            buyer_contacts: 0.0,
            estimated_spread: 0.0,
            closed_deals: 0.0,
        }
    }

    fn slot(&mut self, metric: KpiMetric) -> &mut f64 {
        match metric {
            KpiMetric::MarketsTested => &mut self.markets_tested,
            KpiMetric::DealsAnalyzed => &mut self.deals_analyzed,
            KpiMetric::LeadsContacted => &mut self.leads_contacted,
            KpiMetric::QualifiedLeads => &mut self.qualified_leads,
            KpiMetric::OffersSent => &mut self.offers_sent,
            KpiMetric::UnderContract => &mut self.under_contract,
            KpiMetric::PartnerSubmissions => &mut self.partner_submissions,
            KpiMetric::OutreachSent => &mut self.outreach_sent,
            KpiMetric::BuyerContacts => &mut self.buyer_contacts,
            KpiMetric::EstimatedSpread => &mut self.estimated_spread,
            KpiMetric::ClosedDeals => &mut self.closed_deals,
        }
    }

    pub fn get(&self, metric: KpiMetric) -> f64 {
        match metric {
            KpiMetric::MarketsTested => self.markets_tested,
            KpiMetric::DealsAnalyzed => self.deals_analyzed,
            KpiMetric::LeadsContacted => self.leads_contacted,
            KpiMetric::QualifiedLeads => self.qualified_leads,
            KpiMetric::OffersSent => self.offers_sent,
            KpiMetric::UnderContract => self.under_contract,
            KpiMetric::PartnerSubmissions => self.partner_submissions,
            KpiMetric::OutreachSent => self.outreach_sent,
            KpiMetric::BuyerContacts => self.buyer_contacts,
            KpiMetric::EstimatedSpread => self.estimated_spread,
            KpiMetric::ClosedDeals => self.closed_deals,
        }
    }

    /// Adds `amount` to a metric, starting from an empty ledger when the stored
    /// snapshot belongs to an earlier day.
    pub fn bump(self, metric: KpiMetric, amount: f64, today: NaiveDate) -> Self {
        let mut next = if self.date == today {
            self
        } else {
            Self::empty(today)
        };
        *next.slot(metric) += amount;
        next
    }

    /// Overwrites a metric without touching the ledger date.
    pub fn set(mut self, metric: KpiMetric, value: f64) -> Self {
        *self.slot(metric) = value;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTargets {
    pub markets_tested: f64,
    pub deals_analyzed: f64,
    pub leads_contacted: f64,
    pub qualified_leads: f64,
    pub offers_sent: f64,
    pub under_contract: f64,
    pub partner_submissions: f64,
    pub outreach_sent: f64,
    pub buyer_contacts: f64,
    pub estimated_spread: f64,
    pub closed_deals: f64,
}

impl Default for DailyTargets {
    fn default() -> Self {
        Self {
            markets_tested: 3.0,
            deals_analyzed: 10.0,
            leads_contacted: 15.0,
            qualified_leads: 5.0,
            offers_sent: 3.0,
            under_contract: 1.0,
            partner_submissions: 2.0,
            outreach_sent: 20.0,
            buyer_contacts: 10.0,
            estimated_spread: 25_000.0,
            closed_deals: 1.0,
        }
    }
}

impl DailyTargets {
    pub fn target(&self, metric: KpiMetric) -> f64 {
        match metric {
            KpiMetric::MarketsTested => self.markets_tested,
            KpiMetric::DealsAnalyzed => self.deals_analyzed,
            KpiMetric::LeadsContacted => self.leads_contacted,
            KpiMetric::QualifiedLeads => self.qualified_leads,
            KpiMetric::OffersSent => self.offers_sent,
            KpiMetric::UnderContract => self.under_contract,
            KpiMetric::PartnerSubmissions => self.partner_submissions,
            KpiMetric::OutreachSent => self.outreach_sent,
            KpiMetric::BuyerContacts => self.buyer_contacts,
            KpiMetric::EstimatedSpread => self.estimated_spread,
            KpiMetric::ClosedDeals => self.closed_deals,
        }
    }

    /// Mean of per-metric completion, each capped at 100.
    pub fn progress_pct(&self, snapshot: &KpiSnapshot) -> f64 {
        let total: f64 = KpiMetric::ALL
            .iter()
            .map(|metric| {
                let target = self.target(*metric);
                if target <= 0.0 {
                    return 100.0;
                }
                (snapshot.get(*metric) / target * 100.0).clamp(0.0, 100.0)
            })
            .sum();
        total / KpiMetric::ALL.len() as f64
    }
}

/// Steps of the daily wholesaling routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecklistItem {
    ZillowAlerts,
    NewLeads,
    QualifyLeads,
    SendOutreach,
    FollowUps,
    SubmitPartner,
    DispoDeals,
    UpdatePipeline,
    AddBuyers,
    LogKpis,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 10] = [
        ChecklistItem::ZillowAlerts,
        ChecklistItem::NewLeads,
        ChecklistItem::QualifyLeads,
        ChecklistItem::SendOutreach,
        ChecklistItem::FollowUps,
        ChecklistItem::SubmitPartner,
        ChecklistItem::DispoDeals,
        ChecklistItem::UpdatePipeline,
        ChecklistItem::AddBuyers,
        ChecklistItem::LogKpis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChecklistItem::ZillowAlerts => "Check Zillow saved search alerts",
            ChecklistItem::NewLeads => "Run new leads through Deal Analyzer",
            ChecklistItem::QualifyLeads => "Qualify top leads (80% test, motivation)",
            ChecklistItem::SendOutreach => "Send outreach (calls, SMS, emails)",
            ChecklistItem::FollowUps => "Follow up with pending conversations",
            ChecklistItem::SubmitPartner => "Submit qualified leads to Partner Program",
            ChecklistItem::DispoDeals => "Market under-contract deals to buyers",
            ChecklistItem::UpdatePipeline => "Update pipeline statuses & notes",
            ChecklistItem::AddBuyers => "Add new buyer contacts to list",
            ChecklistItem::LogKpis => "Log all KPIs and review progress",
        }
    }

    pub fn step(&self) -> u8 {
        match self {
            ChecklistItem::ZillowAlerts => 1,
            ChecklistItem::NewLeads => 2,
            ChecklistItem::QualifyLeads => 3,
            ChecklistItem::SendOutreach => 4,
            ChecklistItem::FollowUps => 5,
            ChecklistItem::SubmitPartner => 6,
            ChecklistItem::DispoDeals => 7,
            ChecklistItem::UpdatePipeline => 8,
            ChecklistItem::AddBuyers => 9,
            ChecklistItem::LogKpis => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChecklist {
    pub date: NaiveDate,
    pub completed: BTreeSet<ChecklistItem>,
}

impl DailyChecklist {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            completed: BTreeSet::new(),
        }
    }

    /// Flips an item; a checklist from an earlier day is cleared first.
    pub fn toggle(self, item: ChecklistItem, today: NaiveDate) -> Self {
        let mut next = if self.date == today {
            self
        } else {
            Self::empty(today)
        };
        if !next.completed.remove(&item) {
            next.completed.insert(item);
        }
        next
    }

    pub fn progress_pct(&self) -> f64 {
        self.completed.len() as f64 / ChecklistItem::ALL.len() as f64 * 100.0
    }
}

/// KPI ledger paired with targets for API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub snapshot: KpiSnapshot,
    pub targets: DailyTargets,
    pub progress_pct: f64,
    pub checklist: DailyChecklist,
    pub checklist_progress_pct: f64,
}

impl KpiReport {
    pub fn build(snapshot: KpiSnapshot, checklist: DailyChecklist) -> Self {
        let targets = DailyTargets::default();
        Self {
            progress_pct: targets.progress_pct(&snapshot),
            checklist_progress_pct: checklist.progress_pct(),
            snapshot,
            targets,
            checklist,
        }
    }
}
