//! Deal math: offer qualifiers, maximum allowable offer, and return projections.

mod analysis;
mod returns;

pub use analysis::{analyze_deal, DealAnalysis, DealInput, MAO_ARV_RATIO};
pub use returns::{
    calculate_rental_cashflow, calculate_roi, FlipProjection, FlipRequest, RentalCashflow,
    RentalRequest,
};
