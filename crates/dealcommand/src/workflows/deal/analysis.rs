use serde::{Deserialize, Serialize};

use crate::workflows::reference::matched_keywords;
use crate::workflows::validation::{non_negative, InputError};

pub const QUALIFIER_RATIO: f64 = 0.8;
pub const ZESTIMATE_RATIO: f64 = 0.9;
pub const MAO_ARV_RATIO: f64 = 0.7;
pub const MIN_SPREAD: f64 = 5_000.0;
pub const STALE_DAYS_ON_MARKET: u32 = 60;
pub const MODERATE_DAYS_ON_MARKET: u32 = 30;

/// Listing, valuation, and repair figures for a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInput {
    pub address: String,
    pub list_price: f64,
    pub zestimate: f64,
    pub repair_estimate: f64,
    pub arv: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub days_on_market: u32,
    /// Caller-supplied 1-10 rating; out-of-range values are clamped.
    pub seller_motivation: i32,
}

impl DealInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("list_price", self.list_price)?;
        non_negative("zestimate", self.zestimate)?;
        non_negative("repair_estimate", self.repair_estimate)?;
        non_negative("arv", self.arv)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub qualifier_price_80: f64,
    pub zestimate_check_90: f64,
    pub mao: f64,
    /// MAO minus the qualifier price. Negative values are meaningful.
    pub spread_potential: f64,
    pub motivation_score: u8,
    pub passes_zestimate_rule: bool,
    pub flags: Vec<String>,
    pub matched_keywords: Vec<String>,
}

pub fn analyze_deal(input: &DealInput) -> DealAnalysis {
    let qualifier_price_80 = input.list_price * QUALIFIER_RATIO;
    let zestimate_check_90 = input.zestimate * ZESTIMATE_RATIO;
    let mao = (input.arv * MAO_ARV_RATIO - input.repair_estimate).max(0.0);
    let spread_potential = mao - qualifier_price_80;
    let passes_zestimate_rule = input.list_price <= zestimate_check_90;

    let mut flags = Vec::new();
    if !passes_zestimate_rule {
        flags.push("List price exceeds 90% of Zestimate".to_string());
    }

    if input.days_on_market > STALE_DAYS_ON_MARKET {
        flags.push("DOM exceeds 60 days - potential stale listing".to_string());
    } else if input.days_on_market > MODERATE_DAYS_ON_MARKET {
        flags.push("DOM between 30-60 days - moderate".to_string());
    }

    if spread_potential < MIN_SPREAD {
        flags.push("Spread potential below $5,000 minimum".to_string());
    }

    let matched = matched_keywords(&input.keywords);
    if matched.is_empty() {
        flags.push("No motivated seller keywords detected".to_string());
    }

    DealAnalysis {
        qualifier_price_80,
        zestimate_check_90,
        mao,
        spread_potential,
        motivation_score: input.seller_motivation.clamp(1, 10) as u8,
        passes_zestimate_rule,
        flags,
        matched_keywords: matched,
    }
}
