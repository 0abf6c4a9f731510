//! Market scoring against the ideal wholesale market criteria.

use serde::{Deserialize, Serialize};

use super::reference::UsState;
use super::validation::{non_negative, present, InputError};

pub const MIN_MSA_POPULATION: f64 = 400_000.0;
pub const MIN_CITY_POPULATION: f64 = 100_000.0;
pub const MEDIAN_PRICE_FLOOR: f64 = 200_000.0;
pub const MEDIAN_PRICE_CEILING: f64 = 400_000.0;
pub const MAX_DAYS_ON_MARKET: f64 = 50.0;
pub const MIN_PENDING_RATIO: f64 = 25.0;

const CHECK_POINTS: u8 = 20;
const RESTRICTED_PENALTY: u8 = 30;
const DISQUALIFIED_BELOW: u8 = 40;
const BORDERLINE_BELOW: u8 = 70;

/// Demographic and listing statistics for a candidate market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub city: String,
    pub state: UsState,
    pub msa_population: f64,
    pub city_population: f64,
    pub median_price: f64,
    pub days_on_market: f64,
    /// Pending-to-active listings, expressed as a percentage.
    pub pending_ratio: f64,
}

impl MarketData {
    pub fn validate(&self) -> Result<(), InputError> {
        present("city", &self.city)?;
        non_negative("msa_population", self.msa_population)?;
        non_negative("city_population", self.city_population)?;
        non_negative("median_price", self.median_price)?;
        non_negative("days_on_market", self.days_on_market)?;
        non_negative("pending_ratio", self.pending_ratio)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    Ideal,
    Borderline,
    Disqualified,
}

impl MarketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MarketStatus::Ideal => "Ideal",
            MarketStatus::Borderline => "Borderline",
            MarketStatus::Disqualified => "Disqualified",
        }
    }

    pub(crate) fn derive(score: u8, restricted: bool) -> Self {
        if restricted || score < DISQUALIFIED_BELOW {
            MarketStatus::Disqualified
        } else if score < BORDERLINE_BELOW {
            MarketStatus::Borderline
        } else {
            MarketStatus::Ideal
        }
    }
}

/// Checklist outcome for a market: failed checks land in `flags`, successes in `passed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketScore {
    pub status: MarketStatus,
    pub score: u8,
    pub flags: Vec<String>,
    pub passed: Vec<String>,
}

pub fn evaluate_market(data: &MarketData) -> MarketScore {
    let mut flags = Vec::new();
    let mut passed = Vec::new();
    let mut score: u8 = 0;

    let mut check = |ok: bool, success: &str, failure: &str| {
        if ok {
            score += CHECK_POINTS;
            passed.push(success.to_string());
        } else {
            flags.push(failure.to_string());
        }
    };

    check(
        data.msa_population > MIN_MSA_POPULATION,
        "MSA population > 400k",
        "MSA population below 400k threshold",
    );
    check(
        data.city_population > MIN_CITY_POPULATION,
        "City population > 100k",
        "City population below 100k threshold",
    );
    let below_band = data.median_price < MEDIAN_PRICE_FLOOR;
    check(
        (MEDIAN_PRICE_FLOOR..=MEDIAN_PRICE_CEILING).contains(&data.median_price),
        "Median price in $200k-$400k range",
        if below_band {
            "Median price below $200k"
        } else {
            "Median price above $400k"
        },
    );
    check(
        data.days_on_market < MAX_DAYS_ON_MARKET,
        "DOM under 50 days",
        "DOM exceeds 50 days",
    );
    check(
        data.pending_ratio > MIN_PENDING_RATIO,
        "Pending ratio above 25%",
        "Pending ratio below 25%",
    );

    let restriction = data.state.wholesale_restriction();
    if let Some(reason) = restriction {
        flags.push(reason.to_string());
        score = score.saturating_sub(RESTRICTED_PENALTY);
    }

    if data.state.is_attorney_state() {
        flags.push("Attorney state - additional legal costs".to_string());
    }
    if data.state.is_non_disclosure_state() {
        flags.push("Non-disclosure state - limited comp data".to_string());
    }

    MarketScore {
        status: MarketStatus::derive(score, restriction.is_some()),
        score,
        flags,
        passed,
    }
}
