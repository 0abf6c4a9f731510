use serde::{Deserialize, Serialize};

use crate::workflows::money::{round_tenth, round_whole};
use crate::workflows::validation::{non_negative, positive, InputError};

const HOLDING_COST_PER_MONTH: f64 = 0.01;
const SELLING_COST_RATIO: f64 = 0.08;
const PITI_RATIO: f64 = 0.008;
const VACANCY_RATIO: f64 = 0.08;
const MAINTENANCE_RATIO: f64 = 0.10;
const MANAGEMENT_RATIO: f64 = 0.10;
const DOWN_PAYMENT_RATIO: f64 = 0.25;

/// Fix-and-flip projection. Dollar figures other than the investment are whole dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipProjection {
    pub total_investment: f64,
    pub holding_costs: f64,
    pub selling_costs: f64,
    pub total_costs: f64,
    pub profit: f64,
    pub roi_pct: f64,
}

/// Buy-and-hold monthly cashflow estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalCashflow {
    pub monthly_piti: f64,
    pub vacancy: f64,
    pub maintenance: f64,
    pub management: f64,
    pub net_cashflow: f64,
    pub annual_cashflow: f64,
    pub cash_on_cash_return_pct: f64,
}

pub fn calculate_roi(
    purchase_price: f64,
    repair_cost: f64,
    arv: f64,
    holding_months: u32,
) -> FlipProjection {
    let total_investment = purchase_price + repair_cost;
    let holding_costs = total_investment * HOLDING_COST_PER_MONTH * f64::from(holding_months);
    let selling_costs = arv * SELLING_COST_RATIO;
    let total_costs = total_investment + holding_costs + selling_costs;
    let profit = arv - total_costs;
    let roi = profit / total_investment * 100.0;

    FlipProjection {
        total_investment,
        holding_costs: round_whole(holding_costs),
        selling_costs: round_whole(selling_costs),
        total_costs: round_whole(total_costs),
        profit: round_whole(profit),
        roi_pct: round_tenth(roi),
    }
}

pub fn calculate_rental_cashflow(
    purchase_price: f64,
    monthly_rent: f64,
    repair_cost: f64,
) -> RentalCashflow {
    let total_investment = purchase_price + repair_cost;
    let monthly_piti = total_investment * PITI_RATIO;
    let vacancy = monthly_rent * VACANCY_RATIO;
    let maintenance = monthly_rent * MAINTENANCE_RATIO;
    let management = monthly_rent * MANAGEMENT_RATIO;
    let net_cashflow = monthly_rent - monthly_piti - vacancy - maintenance - management;
    let annual_cashflow = net_cashflow * 12.0;
    let cash_on_cash = annual_cashflow / (total_investment * DOWN_PAYMENT_RATIO) * 100.0;

    RentalCashflow {
        monthly_piti: round_whole(monthly_piti),
        vacancy: round_whole(vacancy),
        maintenance: round_whole(maintenance),
        management: round_whole(management),
        net_cashflow: round_whole(net_cashflow),
        annual_cashflow: round_whole(annual_cashflow),
        cash_on_cash_return_pct: round_tenth(cash_on_cash),
    }
}

/// Flip inputs as accepted over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipRequest {
    pub purchase_price: f64,
    #[serde(default)]
    pub repair_cost: f64,
    pub arv: f64,
    pub holding_months: u32,
}

impl FlipRequest {
    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("purchase_price", self.purchase_price)?;
        non_negative("repair_cost", self.repair_cost)?;
        positive("total_investment", self.purchase_price + self.repair_cost)?;
        non_negative("arv", self.arv)
    }

    pub fn project(&self) -> FlipProjection {
        calculate_roi(
            self.purchase_price,
            self.repair_cost,
            self.arv,
            self.holding_months,
        )
    }
}

/// Rental inputs as accepted over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRequest {
    pub purchase_price: f64,
    pub monthly_rent: f64,
    #[serde(default)]
    pub repair_cost: f64,
}

impl RentalRequest {
    pub fn validate(&self) -> Result<(), InputError> {
        non_negative("purchase_price", self.purchase_price)?;
        non_negative("repair_cost", self.repair_cost)?;
        positive("total_investment", self.purchase_price + self.repair_cost)?;
        non_negative("monthly_rent", self.monthly_rent)
    }

    pub fn project(&self) -> RentalCashflow {
        calculate_rental_cashflow(self.purchase_price, self.monthly_rent, self.repair_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_projection_matches_worked_example() {
        let projection = calculate_roi(100_000.0, 20_000.0, 180_000.0, 6);

        assert_eq!(projection.total_investment, 120_000.0);
        assert_eq!(projection.holding_costs, 7_200.0);
        assert_eq!(projection.selling_costs, 14_400.0);
        assert_eq!(projection.total_costs, 141_600.0);
        assert_eq!(projection.profit, 38_400.0);
        assert_eq!(projection.roi_pct, 32.0);
    }

    #[test]
    fn flip_projection_can_lose_money() {
        let projection = calculate_roi(150_000.0, 40_000.0, 180_000.0, 4);
        assert!(projection.profit < 0.0);
        assert!(projection.roi_pct < 0.0);
    }

    #[test]
    fn rental_cashflow_applies_fixed_assumptions() {
        let cashflow = calculate_rental_cashflow(90_000.0, 1_500.0, 10_000.0);

        assert_eq!(cashflow.monthly_piti, 800.0);
        assert_eq!(cashflow.vacancy, 120.0);
        assert_eq!(cashflow.maintenance, 150.0);
        assert_eq!(cashflow.management, 150.0);
        assert_eq!(cashflow.net_cashflow, 280.0);
        assert_eq!(cashflow.annual_cashflow, 3_360.0);
        assert_eq!(cashflow.cash_on_cash_return_pct, 13.4);
    }

    #[test]
    fn requests_reject_zero_investment() {
        let request = FlipRequest {
            purchase_price: 0.0,
            repair_cost: 0.0,
            arv: 100_000.0,
            holding_months: 3,
        };
        assert_eq!(
            request.validate(),
            Err(InputError::ZeroAmount {
                field: "total_investment"
            })
        );

        let rental = RentalRequest {
            purchase_price: 80_000.0,
            monthly_rent: -5.0,
            repair_cost: 0.0,
        };
        assert!(rental.validate().is_err());
    }
}
