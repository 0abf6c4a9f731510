use serde::{Deserialize, Serialize};

use super::or_placeholder;
use crate::workflows::money::{format_usd, round_whole};

const ADDRESS: &str = "[Address]";
const DEFAULT_SAMPLE_RENT: f64 = 1_200.0;
const PITI_RATIO: f64 = 0.008;

/// Ad copy framing the assignment price as a discount off the listing.
pub fn zillow_discount_ad(address: &str, list_price: f64, offer_price: f64) -> String {
    let discount = round_whole((list_price - offer_price) / list_price * 100.0);
    format!(
        "INVESTOR SPECIAL - Below Zillow Value!

{address}

Listed at: ${list}
YOUR Price: ${offer}
Discount: {discount}% Below Market

This deal is {discount}% below Zillow's estimate. Perfect for fix-and-flip or BRRRR strategy investors looking for instant equity.

Cash buyers preferred. Quick close available.
DM for details or contract assignment info.",
        address = or_placeholder(address, ADDRESS),
        list = format_usd(list_price),
        offer = format_usd(offer_price),
    )
}

pub fn rental_roi_ad(address: &str, price: f64, monthly_rent: f64) -> String {
    let gross_roi = monthly_rent * 12.0 / price * 100.0;
    let cashflow = monthly_rent - price * PITI_RATIO;
    format!(
        "CASH FLOW RENTAL OPPORTUNITY

{address}

Purchase Price: ${price}
Est. Monthly Rent: ${rent}
Annual Gross ROI: {gross_roi:.1}%
Est. Monthly Cash Flow: ${cashflow}

Ideal for buy-and-hold investors seeking passive income. Numbers speak for themselves.

Contact for assignment details.",
        address = or_placeholder(address, ADDRESS),
        price = format_usd(price),
        rent = format_usd(monthly_rent),
        cashflow = format_usd(round_whole(cashflow)),
    )
}

pub fn fb_group_post(address: &str, price: f64, arv: f64, repair_cost: f64) -> String {
    format!(
        "HOT DEAL - Wholesale Assignment Available!

Property: {address}
Assignment Price: ${price}
ARV: ${arv}
Est. Repairs: ${repairs}
Potential Spread: ${spread}

Looking for serious cash buyers. This deal won't last long.

EMD required to lock it down. Title company ready to go.

Drop a comment or DM if interested!
#WholesaleDeals #RealEstateInvesting #CashBuyers",
        address = or_placeholder(address, ADDRESS),
        price = format_usd(price),
        arv = format_usd(arv),
        repairs = format_usd(repair_cost),
        spread = format_usd(arv - price - repair_cost),
    )
}

pub fn email_blast(address: &str, price: f64, arv: f64, repair_cost: f64) -> String {
    format!(
        "Subject: Exclusive Deal Alert - {address}

Hi [Investor Name],

I have a new wholesale deal available:

Property: {address}
Assignment Price: ${price}
After Repair Value (ARV): ${arv}
Estimated Repairs: ${repairs}
Potential Profit: ${profit}

This property is under contract and ready for assignment. Title company is in place and ready to close.

If you're interested, please reply to this email or call me directly. First qualified buyer with EMD takes it.

Best,
[Your Name]
[Your Phone]",
        address = or_placeholder(address, ADDRESS),
        price = format_usd(price),
        arv = format_usd(arv),
        repairs = format_usd(repair_cost),
        profit = format_usd(arv - price - repair_cost),
    )
}

/// Short-form social ads used once a deal is under contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleAd {
    ZillowDiscount,
    ZillowMissedIt,
    RentalPlugAndPlay,
}

impl SampleAd {
    pub const ALL: [SampleAd; 3] = [
        SampleAd::ZillowDiscount,
        SampleAd::ZillowMissedIt,
        SampleAd::RentalPlugAndPlay,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SampleAd::ZillowDiscount => "Zillow Discount",
            SampleAd::ZillowMissedIt => "Zillow Missed It",
            SampleAd::RentalPlugAndPlay => "Rental Plug-and-Play",
        }
    }

    pub fn render(
        &self,
        address: &str,
        list_price: f64,
        assign_price: f64,
        monthly_rent: Option<f64>,
    ) -> String {
        match self {
            SampleAd::ZillowDiscount => format!(
                "Wholesale Deal - Priced BELOW Zillow\n{}\n${} (Zillow: ${})\nUnder contract & ready to assign\nLight cosmetic rehab\nDM for walkthrough, comps, and full packet",
                address,
                format_usd(assign_price),
                format_usd(list_price),
            ),
            SampleAd::ZillowMissedIt => format!(
                "Zillow Passed - You Profit\n\nThis one's been sitting online.\nWe negotiated it down - now it's a deal.\nAsking: ${} (Zillow: ${})\nVacant | Fast close\nDM for walkthrough & numbers",
                format_usd(assign_price),
                format_usd(list_price),
            ),
            SampleAd::RentalPlugAndPlay => {
                let rent = monthly_rent
                    .filter(|rent| *rent > 0.0)
                    .unwrap_or(DEFAULT_SAMPLE_RENT);
                let roi = rent * 12.0 / assign_price * 100.0;
                format!(
                    "Turnkey Rental - Day 1 Cashflow\n{}\nRent comps: ${}/mo\nAsking: ${}\nROI: {:.1}%+ based on standard mgmt\nDM \"Rental\" for access + deal packet",
                    address,
                    format_usd(rent),
                    format_usd(assign_price),
                    roi,
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyerSegment {
    pub kind: &'static str,
    pub criteria: &'static str,
    pub strategy: &'static str,
    pub ideal_deal: &'static str,
}

pub const BUYER_SEGMENTS: [BuyerSegment; 5] = [
    BuyerSegment {
        kind: "Cash Buyer",
        criteria: "Has liquid capital, wants quick close",
        strategy: "Fix & Flip",
        ideal_deal: "Distressed properties 60-70% ARV",
    },
    BuyerSegment {
        kind: "Out-of-State Landlord",
        criteria: "Owns rental properties remotely",
        strategy: "Buy & Hold",
        ideal_deal: "Turnkey or light rehab rentals with 8%+ cap rate",
    },
    BuyerSegment {
        kind: "LLC Buyer",
        criteria: "Purchases through business entity",
        strategy: "Portfolio Building",
        ideal_deal: "Multiple properties, bulk deals preferred",
    },
    BuyerSegment {
        kind: "Fix & Flip Investor",
        criteria: "Active rehabber, contractor connections",
        strategy: "Fix & Flip",
        ideal_deal: "Heavy rehab with $30k+ spread potential",
    },
    BuyerSegment {
        kind: "BRRRR Investor",
        criteria: "Buy, Rehab, Rent, Refinance, Repeat",
        strategy: "BRRRR",
        ideal_deal: "Below market with strong rental potential, refinance-friendly ARV",
    },
];

pub const PRICE_STRATEGY_GOAL: &str = "Lock the deal for LESS than the active Zillow price";

pub const PRICE_STRATEGY_TACTICS: [&str; 4] = [
    "Even a $5K-$10K spread creates perception of value",
    "Screenshot the Zillow listing price when you get it under contract",
    "Use \"Discounted Below Zillow\" as the hook in marketing",
    "Don't hide the listing - use it as proof you got a better deal",
];

/// A channel for reaching buyers and the notes for working it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyerChannel {
    pub channel: &'static str,
    pub notes: &'static [&'static str],
}

pub const BUYER_CHANNELS: [BuyerChannel; 5] = [
    BuyerChannel {
        channel: "Internal Buyer List",
        notes: &[
            "Priority: Past cash buyers, Newer investors, Out-of-state landlords",
            "Email",
            "SMS / TextBlast",
            "Call blitz (Top 20 hot buyers)",
        ],
    },
    BuyerChannel {
        channel: "Facebook Investor Groups",
        notes: &[
            "Post in Real Estate Investors - [City/State/Region]",
            "Post in Fix & Flip Deals - [Region]",
            "Post in Out-of-State BRRRR / Turnkey Groups",
            "Post 2-3x/week",
            "Include visuals (Zillow screenshot vs. your price)",
            "CTA = \"DM for walkthrough / comps / deal packet\"",
        ],
    },
    BuyerChannel {
        channel: "PropStream / BatchLeads / Investor Base",
        notes: &[
            "Filter: Cash purchases last 6-12 months",
            "Filter: LLCs",
            "Filter: Zip code / buy box match",
            "Cold call",
            "SMS drip",
            "Email follow-up",
            "Add new buyers to list monthly",
        ],
    },
    BuyerChannel {
        channel: "Out-of-State Landlords",
        notes: &[
            "Best for turnkey/light rehab deals",
            "Faster closings, less friction",
            "Pull public records for owners with out-of-state mailing addresses",
            "Skip trace for phone/email",
            "DM on BiggerPockets or investor Facebook groups",
        ],
    },
    BuyerChannel {
        channel: "Investor-Friendly Realtors",
        notes: &[
            "Pitch: I've got a property under contract at a better price than it's listed for. You have anyone looking for a light flip or easy rental?",
            "Offer them a small finder's fee if needed (1-2%)",
        ],
    },
];

pub const CTA_IDEAS: [&str; 3] = [
    "\"DM me 'Zillow' for access\"",
    "\"Comment your email for walkthrough\"",
    "\"We're assigning this in 48 hours - who's in?\"",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZillowObjection {
    pub objection: &'static str,
    pub response: &'static str,
    pub keys: [&'static str; 3],
}

pub const ZILLOW_OBJECTION: ZillowObjection = ZillowObjection {
    objection: "But it's on Zillow...",
    response: "Yeah - and we've got it under contract for less than list. Most people scroll right past these. We negotiated the deal, lined up access, and now we're assigning it at a discount.",
    keys: [
        "Confident",
        "Framing = Value",
        "You're not brokering a listing - you're selling a deal you negotiated",
    ],
};

pub const BUYER_CHECKLIST: [&str; 5] = [
    "Walkthrough video or pics",
    "Repair notes / comps",
    "Access instructions",
    "Contract details (title open, close date, etc.)",
    "Confidence you're real, fast, and professional",
];

/// Everything needed to market one assignment, rendered for a single property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispoPlaybook {
    pub zillow_discount_ad: String,
    pub rental_roi_ad: Option<String>,
    pub fb_group_post: String,
    pub email_blast: String,
    pub sample_ads: Vec<(&'static str, String)>,
    pub price_strategy_goal: &'static str,
    pub price_strategy_tactics: &'static [&'static str],
    pub buyer_segments: &'static [BuyerSegment],
    pub buyer_channels: &'static [BuyerChannel],
    pub cta_ideas: &'static [&'static str],
    pub zillow_objection: ZillowObjection,
    pub buyer_checklist: &'static [&'static str],
}

impl DispoPlaybook {
    pub fn build(
        address: &str,
        list_price: f64,
        assignment_price: f64,
        arv: f64,
        repair_cost: f64,
        monthly_rent: Option<f64>,
    ) -> Self {
        let rental_roi_ad = monthly_rent
            .filter(|rent| *rent > 0.0 && assignment_price > 0.0)
            .map(|rent| rental_roi_ad(address, assignment_price, rent));
        let sample_ads = SampleAd::ALL
            .iter()
            .map(|ad| {
                (
                    ad.name(),
                    ad.render(address, list_price, assignment_price, monthly_rent),
                )
            })
            .collect();

        Self {
            zillow_discount_ad: zillow_discount_ad(address, list_price, assignment_price),
            rental_roi_ad,
            fb_group_post: fb_group_post(address, assignment_price, arv, repair_cost),
            email_blast: email_blast(address, assignment_price, arv, repair_cost),
            sample_ads,
            price_strategy_goal: PRICE_STRATEGY_GOAL,
            price_strategy_tactics: &PRICE_STRATEGY_TACTICS,
            buyer_segments: &BUYER_SEGMENTS,
            buyer_channels: &BUYER_CHANNELS,
            cta_ideas: &CTA_IDEAS,
            zillow_objection: ZILLOW_OBJECTION,
            buyer_checklist: &BUYER_CHECKLIST,
        }
    }
}
