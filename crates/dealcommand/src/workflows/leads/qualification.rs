use serde::{Deserialize, Serialize};

use crate::workflows::reference::UsState;
use crate::workflows::validation::{non_negative, InputError};

pub const MAX_ASKING_PRICE_RATIO: f64 = 0.9;
pub const MIN_SELLER_MOTIVATION: i32 = 5;
pub const MAX_SALE_TIMELINE_DAYS: u32 = 90;

/// Answers gathered on a qualification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadQualificationInput {
    pub is_owner: bool,
    pub is_motivated: bool,
    pub is_listed_fsbo: bool,
    pub is_listed_mls: bool,
    pub is_under_contract: bool,
    /// Asking price divided by the Zestimate.
    pub asking_price_ratio: f64,
    pub seller_motivation: i32,
    pub sale_timeline_days: u32,
    pub state: UsState,
}

impl LeadQualificationInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("asking_price_ratio", self.asking_price_ratio)
    }
}

/// Asking price as a share of the Zestimate; a missing valuation counts as full price.
pub fn asking_price_ratio(asking_price: f64, zestimate: f64) -> f64 {
    if zestimate > 0.0 {
        asking_price / zestimate
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualificationBadge {
    Eligible,
    Ineligible,
    ManualReview,
}

impl QualificationBadge {
    /// Every failure counts the same; severity is not weighed.
    pub fn from_failures(count: usize) -> Self {
        match count {
            0 => QualificationBadge::Eligible,
            1 | 2 => QualificationBadge::ManualReview,
            _ => QualificationBadge::Ineligible,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualificationBadge::Eligible => "eligible",
            QualificationBadge::Ineligible => "ineligible",
            QualificationBadge::ManualReview => "manual-review",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadQualification {
    pub qualified: bool,
    pub reasons: Vec<String>,
    pub passed_checks: Vec<String>,
    pub badge: QualificationBadge,
}

impl LeadQualification {
    pub fn summary(&self) -> String {
        if self.qualified {
            "Qualified via Partner Program checks".to_string()
        } else {
            format!(
                "Qualification: {} - {}",
                self.badge.label(),
                self.reasons.join(", ")
            )
        }
    }
}

struct Check {
    passed: bool,
    failure: String,
    success: &'static str,
}

impl Check {
    fn new(passed: bool, failure: impl Into<String>, success: &'static str) -> Self {
        Self {
            passed,
            failure: failure.into(),
            success,
        }
    }
}

/// Run all nine checks. There is no early exit so callers see every failure.
pub fn qualify_lead(input: &LeadQualificationInput) -> LeadQualification {
    // `is_motivated` and the numeric motivation threshold both gate eligibility.
    let checks = [
        Check::new(
            input.is_owner,
            "Seller is not the property owner",
            "Verified property owner",
        ),
        Check::new(
            input.is_motivated,
            "Seller does not appear motivated",
            "Seller shows motivation",
        ),
        Check::new(!input.is_listed_fsbo, "Property listed FSBO", "Not listed FSBO"),
        Check::new(
            !input.is_listed_mls,
            "Property listed on MLS",
            "Not listed on MLS",
        ),
        Check::new(
            !input.is_under_contract,
            "Property already under contract",
            "Not under existing contract",
        ),
        Check::new(
            !(input.asking_price_ratio > MAX_ASKING_PRICE_RATIO),
            "Asking price exceeds 90% of Zestimate",
            "Asking price at or below 90% Zestimate",
        ),
        Check::new(
            input.seller_motivation >= MIN_SELLER_MOTIVATION,
            "Seller motivation below threshold (5)",
            "Motivation score meets threshold",
        ),
        Check::new(
            input.sale_timeline_days <= MAX_SALE_TIMELINE_DAYS,
            "Sale timeline exceeds 90 days",
            "Sale timeline within 90 days",
        ),
        Check::new(
            !input.state.is_restricted(),
            format!("Restricted state: {}", input.state.code()),
            "State not restricted",
        ),
    ];

    let mut reasons = Vec::new();
    let mut passed_checks = Vec::new();
    for check in checks {
        if check.passed {
            passed_checks.push(check.success.to_string());
        } else {
            reasons.push(check.failure);
        }
    }

    LeadQualification {
        qualified: reasons.is_empty(),
        badge: QualificationBadge::from_failures(reasons.len()),
        reasons,
        passed_checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing() -> LeadQualificationInput {
        LeadQualificationInput {
            is_owner: true,
            is_motivated: true,
            is_listed_fsbo: false,
            is_listed_mls: false,
            is_under_contract: false,
            asking_price_ratio: 0.85,
            seller_motivation: 7,
            sale_timeline_days: 45,
            state: UsState::Missouri,
        }
    }

    #[test]
    fn all_checks_passing_is_eligible() {
        let result = qualify_lead(&passing());

        assert!(result.qualified);
        assert_eq!(result.badge, QualificationBadge::Eligible);
        assert!(result.reasons.is_empty());
        assert_eq!(result.passed_checks.len(), 9);
    }

    #[test]
    fn badge_boundary_between_review_and_ineligible() {
        let mut input = passing();
        input.is_listed_mls = true;
        assert_eq!(qualify_lead(&input).badge, QualificationBadge::ManualReview);

        input.sale_timeline_days = 91;
        let two = qualify_lead(&input);
        assert_eq!(two.reasons.len(), 2);
        assert_eq!(two.badge, QualificationBadge::ManualReview);

        input.state = UsState::Pennsylvania;
        let three = qualify_lead(&input);
        assert_eq!(three.reasons.len(), 3);
        assert_eq!(three.badge, QualificationBadge::Ineligible);
        assert!(!three.qualified);
    }

    #[test]
    fn reasons_follow_check_order() {
        let mut input = passing();
        input.is_owner = false;
        input.state = UsState::Illinois;
        input.asking_price_ratio = 0.95;

        let result = qualify_lead(&input);

        assert_eq!(
            result.reasons,
            vec![
                "Seller is not the property owner".to_string(),
                "Asking price exceeds 90% of Zestimate".to_string(),
                "Restricted state: IL".to_string(),
            ]
        );
        assert_eq!(result.passed_checks.len() + result.reasons.len(), 9);
    }

    #[test]
    fn both_motivation_checks_apply() {
        let mut input = passing();
        input.is_motivated = false;
        input.seller_motivation = 4;

        let result = qualify_lead(&input);

        assert_eq!(result.reasons.len(), 2);
        assert!(result
            .reasons
            .contains(&"Seller motivation below threshold (5)".to_string()));
    }

    #[test]
    fn ratio_at_threshold_passes() {
        let mut input = passing();
        input.asking_price_ratio = 0.9;
        assert!(qualify_lead(&input).qualified);
        assert_eq!(asking_price_ratio(90_000.0, 0.0), 1.0);
        assert_eq!(asking_price_ratio(90_000.0, 100_000.0), 0.9);
    }

    #[test]
    fn summary_names_badge_and_reasons() {
        let mut input = passing();
        input.is_under_contract = true;
        let result = qualify_lead(&input);
        assert_eq!(
            result.summary(),
            "Qualification: manual-review - Property already under contract"
        );
        assert_eq!(
            qualify_lead(&passing()).summary(),
            "Qualified via Partner Program checks"
        );
    }
}
