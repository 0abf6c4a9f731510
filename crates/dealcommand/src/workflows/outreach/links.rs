//! Deep links for listing portals, owner lookups, and pre-filled email/SMS composers.

use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

/// Street, city, state, and zip split out of a single-line address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParts {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Split `"9101 E 50th St, Kansas City, MO 64133"` into its parts. Missing pieces are empty.
pub fn parse_address(full_address: &str) -> AddressParts {
    let mut parts = full_address.split(',').map(str::trim);
    let street = parts.next().unwrap_or_default().to_string();
    let city = parts.next().unwrap_or_default().to_string();
    let mut state_zip = parts.next().unwrap_or_default().split_whitespace();

    AddressParts {
        street,
        city,
        state: state_zip.next().unwrap_or_default().to_string(),
        zip: state_zip.next().unwrap_or_default().to_string(),
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Drop `,#.` and replace whitespace runs with `-`.
fn slugify(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.replace(|c: char| matches!(c, ',' | '#' | '.'), ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn first_zip(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    bytes
        .windows(5)
        .position(|window| window.iter().all(u8::is_ascii_digit))
        .map(|start| text[start..start + 5].to_string())
}

impl AddressParts {
    fn joined(&self) -> String {
        [
            self.street.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.zip.as_str(),
        ]
        .join(" ")
    }

    pub fn zillow_url(&self) -> String {
        format!("https://www.zillow.com/homes/{}_rb/", slugify(&self.joined()))
    }

    /// Redfin needs a home ID for deep links, so route through a site-restricted search.
    pub fn redfin_url(&self) -> String {
        let query = format!("{} site:redfin.com", self.joined());
        format!("https://www.google.com/search?q={}&btnI=I", encode(&query))
    }

    pub fn realtor_url(&self) -> String {
        let street = slugify(&self.street);
        let city = self.city.split_whitespace().collect::<Vec<_>>().join("-");
        if self.zip.is_empty() {
            format!(
                "https://www.realtor.com/realestateandhomes-detail/{}_{}_{}",
                street, city, self.state
            )
        } else {
            format!(
                "https://www.realtor.com/realestateandhomes-detail/{}_{}_{}_{}",
                street, city, self.state, self.zip
            )
        }
    }

    pub fn google_url(&self) -> String {
        let query = format!(
            "\"{}\" \"{}\" {} {} property",
            self.street, self.city, self.state, self.zip
        );
        format!("https://www.google.com/search?q={}", encode(&query))
    }

    pub fn true_people_search_url(&self) -> String {
        let city_state_zip = format!("{}, {} {}", self.city, self.state, self.zip);
        format!(
            "https://www.truepeoplesearch.com/resultaddress?streetaddress={}&citystatezip={}",
            encode(&self.street),
            encode(&city_state_zip)
        )
    }
}

/// Every research link for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLinks {
    pub zillow: String,
    pub redfin: String,
    pub realtor: String,
    pub google: String,
    pub true_people: String,
    pub address: AddressParts,
}

impl ListingLinks {
    /// Build links from a full address. When `city` and `state` are known the street is
    /// the first comma segment and a missing zip is pulled from the address text.
    pub fn for_address(
        full_address: &str,
        city: Option<&str>,
        state: Option<&str>,
        zip: Option<&str>,
    ) -> Self {
        let address = match (city, state) {
            (Some(city), Some(state)) if !city.is_empty() && !state.is_empty() => {
                let zip = zip
                    .filter(|zip| !zip.is_empty())
                    .map(str::to_string)
                    .or_else(|| first_zip(full_address))
                    .unwrap_or_default();
                AddressParts {
                    street: full_address
                        .split(',')
                        .next()
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                    city: city.to_string(),
                    state: state.to_string(),
                    zip,
                }
            }
            _ => parse_address(full_address),
        };

        Self {
            zillow: address.zillow_url(),
            redfin: address.redfin_url(),
            realtor: address.realtor_url(),
            google: address.google_url(),
            true_people: address.true_people_search_url(),
            address,
        }
    }
}

/// Gmail compose window pre-filled with recipient, subject, and body.
pub fn gmail_compose_link(to: &str, subject: &str, body: &str) -> String {
    format!(
        "https://mail.google.com/mail/?view=cm&fs=1&to={}&su={}&body={}",
        encode(to),
        encode(subject),
        encode(body)
    )
}

pub fn sms_link(to: &str, body: &str) -> String {
    format!("sms:{}?body={}", to, encode(body))
}
