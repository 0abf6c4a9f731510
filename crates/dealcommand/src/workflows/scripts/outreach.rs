use serde::{Deserialize, Serialize};

use super::or_placeholder;
use crate::workflows::money::format_usd;

const YOUR_NAME: &str = "[Your Name]";
const ADDRESS: &str = "[Address]";

pub fn cold_call_script(name: &str, address: &str, qualifier_price: f64) -> String {
    format!(
        "Hi, this is {}. I'm reaching out about the property at {}. I'm a local investor looking to purchase properties in the area. I noticed your listing and wanted to see if you'd be open to discussing a fair cash offer. I can close quickly and cover closing costs. Would a price around ${} be something you'd consider? I completely understand if the timing isn't right - I just wanted to reach out.",
        or_placeholder(name, YOUR_NAME),
        or_placeholder(address, ADDRESS),
        format_usd(qualifier_price),
    )
}

pub fn sms_script(name: &str, address: &str, qualifier_price: f64) -> String {
    format!(
        "Hi, this is {}. I saw your property at {} and I'm interested. I'm a cash buyer looking to close quickly. Would you entertain an offer around ${}? No pressure at all - just let me know if you'd like to chat.",
        or_placeholder(name, YOUR_NAME),
        or_placeholder(address, ADDRESS),
        format_usd(qualifier_price),
    )
}

pub fn email_script(name: &str, address: &str, qualifier_price: f64) -> String {
    let address = or_placeholder(address, ADDRESS);
    format!(
        "Subject: Cash Offer Inquiry - {address}

Hello,

I am reaching out regarding the property listed at {address}. I am an investor actively purchasing properties in the area and am prepared to make a competitive cash offer.

Based on my analysis, I would like to discuss an offer in the range of ${price}. I can close on your timeline and handle all closing costs.

I understand if this doesn't align with your expectations, but I'd appreciate the opportunity to discuss further.

Best regards,
{name}",
        price = format_usd(qualifier_price),
        name = or_placeholder(name, YOUR_NAME),
    )
}

pub fn agent_script(name: &str, address: &str, qualifier_price: f64) -> String {
    agent_pitch(name, address, &format!("${}", format_usd(qualifier_price)))
}

/// Agent pitch quoting a price range instead of a single figure.
pub fn zillow_offer_script(name: &str, address: &str, low: f64, high: f64) -> String {
    agent_pitch(
        name,
        address,
        &format!("${} - ${}", format_usd(low), format_usd(high)),
    )
}

fn agent_pitch(name: &str, address: &str, offer: &str) -> String {
    format!(
        "Hello, I am reaching out about the property listed on {}. I don't want to waste your time by any means, but I am an investor and am wondering if your seller would entertain an offer around {}. The listing price doesn't make sense for me as an investor. Please let me know if this is at all a possibility.

Talk soon,
{}",
        or_placeholder(address, ADDRESS),
        offer,
        or_placeholder(name, YOUR_NAME),
    )
}

/// The four single-price scripts for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachScripts {
    pub cold_call: String,
    pub sms: String,
    pub email: String,
    pub agent: String,
}

impl OutreachScripts {
    pub fn generate(name: &str, address: &str, qualifier_price: f64) -> Self {
        Self {
            cold_call: cold_call_script(name, address, qualifier_price),
            sms: sms_script(name, address, qualifier_price),
            email: email_script(name, address, qualifier_price),
            agent: agent_script(name, address, qualifier_price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectionHandler {
    pub objection: &'static str,
    pub response: &'static str,
}

pub const OBJECTION_HANDLERS: [ObjectionHandler; 6] = [
    ObjectionHandler {
        objection: "That's too low",
        response: "I completely understand. My offer is based on the current condition and market data. Could you share what price would work for you? I'm flexible and want to find a win-win.",
    },
    ObjectionHandler {
        objection: "I need to think about it",
        response: "Absolutely, take your time. I'll be here when you're ready. Can I follow up with you in a few days to see where you're at?",
    },
    ObjectionHandler {
        objection: "I already have an agent",
        response: "That's great - I actually work with agents regularly. I can submit my offer through your agent. Could you share their contact info?",
    },
    ObjectionHandler {
        objection: "I'm not in a rush to sell",
        response: "No problem at all. I can work on your timeline. Would it help if I made a standing offer that you could accept whenever you're ready?",
    },
    ObjectionHandler {
        objection: "How do I know you're legitimate?",
        response: "Great question. I can provide proof of funds, references from past sellers, and we'd use a reputable title company to handle everything. Your protection is my priority.",
    },
    ObjectionHandler {
        objection: "I need to talk to my spouse/partner",
        response: "Of course, that's totally understandable. Would it help if I sent over a summary of my offer so you can review it together? I can follow up in a day or two.",
    },
];
