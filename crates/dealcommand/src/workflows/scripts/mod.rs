//! Canned outreach, partner, and disposition copy built by placeholder substitution.

mod dispo;
mod outreach;
mod partner;

pub use dispo::{
    email_blast, fb_group_post, rental_roi_ad, zillow_discount_ad, BuyerChannel, BuyerSegment,
    DispoPlaybook, SampleAd, ZillowObjection, BUYER_CHANNELS, BUYER_CHECKLIST, BUYER_SEGMENTS,
    CTA_IDEAS, PRICE_STRATEGY_GOAL, PRICE_STRATEGY_TACTICS, ZILLOW_OBJECTION,
};
pub use outreach::{
    agent_script, cold_call_script, email_script, sms_script, zillow_offer_script,
    ObjectionHandler, OutreachScripts, OBJECTION_HANDLERS,
};
pub use partner::{
    PartnerChannel, PartnerRule, APPOINTMENT_SETTING, PARTNER_DISQUALIFICATION_REASONS,
    PARTNER_RULES, PRICE_NEGOTIATION, QUALIFICATION_QUESTIONS,
};

/// Substitute a placeholder for blank input.
pub(crate) fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
