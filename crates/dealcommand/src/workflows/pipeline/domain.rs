use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::deal::DealAnalysis;
use crate::workflows::market::MarketStatus;
use crate::workflows::reference::UsState;
use crate::workflows::validation::{non_negative, present, InputError};

/// Identifier wrapper for pipeline leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Identifier for saved markets, deals, and buyers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadSource {
    Zillow,
    ColdCall,
    Sms,
    Facebook,
    Website,
    Referral,
    #[default]
    Other,
}

/// Stage of a lead on its way from first contact to a closed assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    OfferSent,
    UnderContract,
    Dispo,
    Closed,
    Dead,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 8] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::OfferSent,
        LeadStatus::UnderContract,
        LeadStatus::Dispo,
        LeadStatus::Closed,
        LeadStatus::Dead,
    ];

    /// Wire name, matching the serde representation.
    pub fn slug(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::OfferSent => "offer-sent",
            LeadStatus::UnderContract => "under-contract",
            LeadStatus::Dispo => "dispo",
            LeadStatus::Closed => "closed",
            LeadStatus::Dead => "dead",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::OfferSent => "Offer Sent",
            LeadStatus::UnderContract => "Under Contract",
            LeadStatus::Dispo => "Dispo",
            LeadStatus::Closed => "Closed",
            LeadStatus::Dead => "Dead",
        }
    }
}

/// Caller-editable lead fields; the pipeline assigns the id and date added.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadDraft {
    pub address: String,
    pub city: String,
    pub state: Option<UsState>,
    pub list_price: f64,
    pub zestimate: f64,
    pub asking_price: f64,
    pub seller_name: String,
    pub seller_phone: String,
    pub seller_email: String,
    pub lead_source: LeadSource,
    pub status: LeadStatus,
    pub motivation_score: u8,
    pub keywords: Vec<String>,
    pub notes: String,
    pub last_contact: Option<DateTime<Utc>>,
    pub partner_eligible: bool,
    pub arv: f64,
    pub repair_estimate: f64,
    pub mao: f64,
    pub assignment_price: f64,
}

impl LeadDraft {
    pub fn validate(&self) -> Result<(), InputError> {
        present("address", &self.address)?;
        non_negative("list_price", self.list_price)?;
        non_negative("zestimate", self.zestimate)?;
        non_negative("asking_price", self.asking_price)?;
        non_negative("arv", self.arv)?;
        non_negative("repair_estimate", self.repair_estimate)?;
        non_negative("assignment_price", self.assignment_price)
    }

    /// Street portion used to detect duplicate leads: first comma segment, lowercase,
    /// single-spaced.
    pub fn street_key(&self) -> String {
        street_key(&self.address)
    }
}

pub(crate) fn street_key(address: &str) -> String {
    address
        .split(',')
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineLead {
    pub id: LeadId,
    pub date_added: DateTime<Utc>,
    #[serde(flatten)]
    pub details: LeadDraft,
}

/// A scored market kept for later comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMarket {
    pub id: RecordId,
    pub city: String,
    pub state: UsState,
    pub msa_population: f64,
    pub city_population: f64,
    pub median_price: f64,
    pub days_on_market: f64,
    pub pending_ratio: f64,
    pub score: u8,
    pub verdict: MarketStatus,
    pub flags: Vec<String>,
    pub is_attorney_state: bool,
    pub is_non_disclosure: bool,
    pub is_restricted: bool,
    pub date_analyzed: DateTime<Utc>,
}

/// An analyzed deal with the figures that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDeal {
    pub id: RecordId,
    pub address: String,
    pub list_price: f64,
    pub zestimate: f64,
    pub arv: f64,
    pub repair_estimate: f64,
    pub analysis: DealAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_lead_id: Option<LeadId>,
    pub date_analyzed: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuyerType {
    CashBuyer,
    Landlord,
    Llc,
    FixFlip,
    Brrrr,
    Turnkey,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub buyer_type: BuyerType,
    pub buy_box: String,
    pub markets: Vec<String>,
    pub max_price: f64,
    pub notes: String,
}

impl BuyerDraft {
    pub fn validate(&self) -> Result<(), InputError> {
        present("name", &self.name)?;
        non_negative("max_price", self.max_price)
    }
}

/// Cash buyer on the disposition list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: RecordId,
    pub date_added: DateTime<Utc>,
    pub last_contact: Option<DateTime<Utc>>,
    pub deals_sent: u32,
    #[serde(flatten)]
    pub details: BuyerDraft,
}
