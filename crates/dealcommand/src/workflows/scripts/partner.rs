use serde::{Deserialize, Serialize};

use super::or_placeholder;

const FIRST_NAME: &str = "(First name)";
const PROPERTY_ADDRESS: &str = "(Property Address)";
const CONDITION_CLOSE: &str = "Yes.\n\nDid I catch you at a bad time?\n\nNo, I've got time now.\n\nOkay, awesome. Do you mind if I ask you a few questions about the condition? It will only take 2 minutes of your time.";
const CONFIRM_CLOSE: &str = "Yes.\n\nGreat, did I catch you at a bad time?\n\nNo, I've got time now.\n\nOkay, awesome. Do you mind if I ask you a few questions about the condition? It will only take 2 minutes of your time.";

/// How the partner lead first reached us; picks the opening script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerChannel {
    ColdCall,
    FacebookGroup,
    Sms,
    OutsourcedColdCall,
    WebsiteLead,
}

impl PartnerChannel {
    pub const ALL: [PartnerChannel; 5] = [
        PartnerChannel::ColdCall,
        PartnerChannel::FacebookGroup,
        PartnerChannel::Sms,
        PartnerChannel::OutsourcedColdCall,
        PartnerChannel::WebsiteLead,
    ];

    /// Opening lines for the call. `city` is only used by the cold call opener.
    pub fn opening(&self, first_name: &str, address: &str, city: &str) -> String {
        let address = or_placeholder(address, PROPERTY_ADDRESS);
        match self {
            PartnerChannel::ColdCall => format!(
                "Hi {}?\n\nMy name is __________ and I'm calling about your property at {}. I work with a group of buyers in the {} area that are actively looking to buy some homes. Have you ever considered selling your home or would you be open to selling?\n\n- If No - If it is something you may consider doing in the near future, we actually have a flexible closing timeline up to 6 months, so we can provide you with an offer and then you can decide the best closing time frame.\n\n- No - Alright, do you happen to have other properties you would like to sell?\n\n- If Yes - Great! Do you mind if I ask you a few questions about the condition? It will only take 2 minutes of your time.",
                or_placeholder(first_name, "(Homeowner First Name)"),
                address,
                or_placeholder(city, "(Property City)"),
            ),
            PartnerChannel::FacebookGroup => {
                let first = or_placeholder(first_name, FIRST_NAME);
                format!(
                    "Hello {first}?\n\nHey {first} my name is (Your Name), we were just messaging on Facebook about you wanting to sell your property at {address}.\n\nYes.\n\nDid I catch you at a bad time?\n\nNo, I've got time now.\n\nOkay, awesome. Do you mind if I ask you a few questions about the condition of the property? It will only take 2 minutes of your time."
                )
            }
            PartnerChannel::Sms => {
                let first = or_placeholder(first_name, FIRST_NAME);
                format!(
                    "Hello {first}?\n\nHey {first} my name is (Your Name), we were just texting about your property over at {address}\n\n{CONDITION_CLOSE}"
                )
            }
            PartnerChannel::OutsourcedColdCall => {
                let first = or_placeholder(first_name, FIRST_NAME);
                format!(
                    "Hello {first}?\n\nHey {first} my name is (Your Name), I'm reaching out because my referral team said that you guys spoke earlier today about your property at {address} and they mentioned that you may be interested in selling it. Is that accurate?\n\n{CONFIRM_CLOSE}"
                )
            }
            PartnerChannel::WebsiteLead => {
                let first = or_placeholder(first_name, FIRST_NAME);
                format!(
                    "Hello {first}?\n\nHey {first} my name is (Your Name), I'm reaching out because you filled out a form on our website expressing interest in selling your property at {address}. Is that accurate?\n\n{CONFIRM_CLOSE}"
                )
            }
        }
    }
}

pub const QUALIFICATION_QUESTIONS: &str = "QUALIFICATION QUESTIONS:

- How many beds and baths does it have?
- Does the house have a garage? (Is it 1 or 2 car?)
- On a scale of 1 to 10 how would you rate your property condition?
- Is it currently listed with a realtor?

Thank you so much for answering these questions, there's just a couple more and we'll be done.

- Is the property occupied by you or tenants?
- (If tenants) may I ask, are they on a monthly lease or an annual lease?
- (If annual) okay, do you know when the lease expires?

Okay, just two more questions about the house...

- Is there a specific reason you are wanting to sell the property right now?
  (If it doesn't sound like there is a clear reason) - Were you thinking about selling before I reached out, or are you just looking for an offer?
- Also, if the numbers make sense with the offer, how soon would you be looking to close?

Thank you so much for taking the time to give me that information. So the next step is going to be to get you connected with our Home Buying Partner to see if your property qualifies for an As-Is offer.

Now, we are looking for homeowners that do want to sell their home. On a scale from 1-10, 10 being you would sell today, how would you rate on this?";

pub const PRICE_NEGOTIATION: &str = "PRICE NEGOTIATION:

Now before I let you go and get you paired with our Partner, is there a dollar amount you have in mind that you would like to get if you sell the home?

(Let them answer... If their price is more than 90% of Zestimate value, let them know we buy properties AS-IS AND WE PAY ALL CLOSING COST)

Example - \"Now, just to let you know, we do buy properties AS-IS and we cover all closing costs. So with that being said, would that price be the lowest you are willing to go, or would you be negotiable on the price?\"

If they do not give a price, say:
\"If we were to buy it completely as-is, cover all closing cost, and close on your timeline, do you at least have a 10 to 15 thousand dollar range you were hoping for?\"";

pub const APPOINTMENT_SETTING: &str = "SETTING THE APPOINTMENT (If the Seller is Qualified):

(First name), I appreciate you getting this information over to me. This sounds like a property that we may be interested in. I'd like to go ahead and book you that second call with our home-buying partner.

I'm looking at their calendar right now and they have a _________ available this afternoon or a _______ tomorrow morning. Do either of those times work for you?

Ok great.

And is this the best phone number for them to call you at?

Okay, I've got you booked for __(Day)___ at __(Time)__ and they will give you a call at that time. The phone number they will be calling from is: (Partner Callback Number)

Do you have any other questions for me at this time?

Alright, you are all set. You have a great rest of your day!";

pub const PARTNER_DISQUALIFICATION_REASONS: [&str; 7] = [
    "They are not the owner or do not have rights to the property",
    "The property is not in a market that meets our Ideal Real Estate Market Criteria",
    "The property is listed FSBO or on the MLS",
    "The property is under contract with another wholesaler",
    "They do not want to sell the property",
    "They are not wanting to sell their property within 90 days",
    "Their asking price is higher than 90% of Zestimate value and they are not willing to negotiate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartnerRule {
    pub rule: &'static str,
    pub detail: &'static str,
}

pub const PARTNER_RULES: [PartnerRule; 8] = [
    PartnerRule {
        rule: "Market meets Ideal Real Estate Market Criteria",
        detail: "MSA > 400k, City > 100k, Median $200k-$400k, DOM < 50, Pending > 25%",
    },
    PartnerRule {
        rule: "You SPOKE to and qualified the lead before submitting",
        detail: "Must have a live conversation with the seller",
    },
    PartnerRule {
        rule: "Seller actually wants to sell the property",
        detail: "Not just looking for an offer because you reached out",
    },
    PartnerRule {
        rule: "Asking price <= 90% of Zestimate",
        detail: "Check Zillow Zestimate, then Redfin, then Realtor.com",
    },
    PartnerRule {
        rule: "Property NOT listed FSBO or on MLS",
        detail: "Check Zillow to see if actively listed For Sale",
    },
    PartnerRule {
        rule: "Property NOT under contract with another wholesaler",
        detail: "Confirm directly with seller",
    },
    PartnerRule {
        rule: "Property NOT in OR, IL, SC, or PA",
        detail: "Restricted states due to wholesale regulations",
    },
    PartnerRule {
        rule: "Appointment scheduled via Partner Program calendar",
        detail: "Use the Partner Program Calendar Booking Link",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_call_opening_uses_city() {
        let script = PartnerChannel::ColdCall.opening("Pat", "44 Oak Ave", "Dayton");
        assert!(script.starts_with("Hi Pat?"));
        assert!(script.contains("buyers in the Dayton area"));
    }

    #[test]
    fn openings_fall_back_to_placeholders() {
        for channel in PartnerChannel::ALL {
            let script = channel.opening("", "", "");
            assert!(script.contains("(Property Address)"), "{channel:?}");
            assert!(script.contains("2 minutes of your time"), "{channel:?}");
        }
    }

    #[test]
    fn website_opening_confirms_form_submission() {
        let script = PartnerChannel::WebsiteLead.opening("Pat", "44 Oak Ave", "");
        assert!(script.starts_with("Hello Pat?\n\nHey Pat my name is (Your Name)"));
        assert!(script.contains("filled out a form on our website"));
        assert!(script.contains("Great, did I catch you at a bad time?"));
    }
}
