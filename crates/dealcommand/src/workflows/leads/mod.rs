//! Seller lead qualification against the partner program rule set.

mod qualification;

pub use qualification::{
    asking_price_ratio, qualify_lead, LeadQualification, LeadQualificationInput,
    QualificationBadge,
};
