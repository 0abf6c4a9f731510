use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raised when a two-letter code does not name one of the 50 states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown state code '{0}'")]
pub struct UnknownState(pub String);

macro_rules! us_states {
    ($($variant:ident => ($code:literal, $name:literal)),+ $(,)?) => {
        /// The 50 states, keyed by postal code on the wire.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum UsState {
            $($variant,)+
        }

        impl UsState {
            pub const ALL: [UsState; 50] = [$(UsState::$variant,)+];

            pub fn code(self) -> &'static str {
                match self {
                    $(UsState::$variant => $code,)+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(UsState::$variant => $name,)+
                }
            }
        }

        impl FromStr for UsState {
            type Err = UnknownState;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim().to_ascii_uppercase().as_str() {
                    $($code => Ok(UsState::$variant),)+
                    _ => Err(UnknownState(raw.trim().to_string())),
                }
            }
        }
    };
}

us_states! {
    Alabama => ("AL", "Alabama"),
    Alaska => ("AK", "Alaska"),
    Arizona => ("AZ", "Arizona"),
    Arkansas => ("AR", "Arkansas"),
    California => ("CA", "California"),
    Colorado => ("CO", "Colorado"),
    Connecticut => ("CT", "Connecticut"),
    Delaware => ("DE", "Delaware"),
    Florida => ("FL", "Florida"),
    Georgia => ("GA", "Georgia"),
    Hawaii => ("HI", "Hawaii"),
    Idaho => ("ID", "Idaho"),
    Illinois => ("IL", "Illinois"),
    Indiana => ("IN", "Indiana"),
    Iowa => ("IA", "Iowa"),
    Kansas => ("KS", "Kansas"),
    Kentucky => ("KY", "Kentucky"),
    Louisiana => ("LA", "Louisiana"),
    Maine => ("ME", "Maine"),
    Maryland => ("MD", "Maryland"),
    Massachusetts => ("MA", "Massachusetts"),
    Michigan => ("MI", "Michigan"),
    Minnesota => ("MN", "Minnesota"),
    Mississippi => ("MS", "Mississippi"),
    Missouri => ("MO", "Missouri"),
    Montana => ("MT", "Montana"),
    Nebraska => ("NE", "Nebraska"),
    Nevada => ("NV", "Nevada"),
    NewHampshire => ("NH", "New Hampshire"),
    NewJersey => ("NJ", "New Jersey"),
    NewMexico => ("NM", "New Mexico"),
    NewYork => ("NY", "New York"),
    NorthCarolina => ("NC", "North Carolina"),
    NorthDakota => ("ND", "North Dakota"),
    Ohio => ("OH", "Ohio"),
    Oklahoma => ("OK", "Oklahoma"),
    Oregon => ("OR", "Oregon"),
    Pennsylvania => ("PA", "Pennsylvania"),
    RhodeIsland => ("RI", "Rhode Island"),
    SouthCarolina => ("SC", "South Carolina"),
    SouthDakota => ("SD", "South Dakota"),
    Tennessee => ("TN", "Tennessee"),
    Texas => ("TX", "Texas"),
    Utah => ("UT", "Utah"),
    Vermont => ("VT", "Vermont"),
    Virginia => ("VA", "Virginia"),
    Washington => ("WA", "Washington"),
    WestVirginia => ("WV", "West Virginia"),
    Wisconsin => ("WI", "Wisconsin"),
    Wyoming => ("WY", "Wyoming"),
}

use UsState::*;

/// States where wholesale assignments are restricted outright.
pub const RESTRICTED_STATES: [UsState; 4] = [SouthCarolina, Oregon, Pennsylvania, Illinois];

/// States that require an attorney at closing.
pub const ATTORNEY_STATES: [UsState; 15] = [
    Connecticut,
    Delaware,
    Georgia,
    Massachusetts,
    Maine,
    NewHampshire,
    NewJersey,
    NewYork,
    NorthCarolina,
    NorthDakota,
    RhodeIsland,
    SouthCarolina,
    Vermont,
    Virginia,
    WestVirginia,
];

/// States where sale prices are not public record.
pub const NON_DISCLOSURE_STATES: [UsState; 13] = [
    Alaska,
    Idaho,
    Kansas,
    Louisiana,
    Maine,
    Mississippi,
    Missouri,
    Montana,
    NewMexico,
    NorthDakota,
    Texas,
    Utah,
    Wyoming,
];

pub const LICENSE_REQUIRED_STATES: [UsState; 15] = [
    NorthDakota,
    SouthDakota,
    Nebraska,
    Kansas,
    Oklahoma,
    Iowa,
    Illinois,
    Kentucky,
    WestVirginia,
    Virginia,
    NewJersey,
    RhodeIsland,
    NewYork,
    Vermont,
    Ohio,
];

impl UsState {
    /// Reason text when wholesaling is restricted in this state.
    pub fn wholesale_restriction(self) -> Option<&'static str> {
        match self {
            SouthCarolina => Some("South Carolina - Wholesale restrictions"),
            Oregon => Some("Oregon - Wholesale restrictions"),
            Pennsylvania => Some("Pennsylvania - Attorney state restrictions"),
            Illinois => Some("Illinois - Wholesale restrictions apply"),
            _ => None,
        }
    }

    pub fn is_restricted(self) -> bool {
        self.wholesale_restriction().is_some()
    }

    pub fn is_attorney_state(self) -> bool {
        ATTORNEY_STATES.contains(&self)
    }

    pub fn is_non_disclosure_state(self) -> bool {
        NON_DISCLOSURE_STATES.contains(&self)
    }

    /// Licensing rule for marketing a wholesale contract, when one applies.
    pub fn license_requirement(self) -> Option<&'static str> {
        match self {
            NorthDakota => Some("North Dakota - RE license required"),
            SouthDakota => Some("South Dakota - RE license required"),
            Nebraska => Some("Nebraska - RE license required"),
            Kansas => Some("Kansas - RE license required"),
            Oklahoma => Some("Oklahoma - RE license required"),
            Iowa => Some("Iowa - RE license required"),
            Illinois => Some("Illinois - License required if >1 transaction/12 months"),
            Kentucky => Some(
                "Kentucky - License required to market wholesale deal (novations can bypass)",
            ),
            WestVirginia => Some("West Virginia - RE license required"),
            Virginia => Some("Virginia - License required if >2 transactions/year"),
            NewJersey => Some("New Jersey - RE license required"),
            RhodeIsland => Some("Rhode Island - RE license required"),
            NewYork => Some("New York - RE license required"),
            Vermont => Some("Vermont - RE license required"),
            Ohio => {
                Some("Ohio - License required to market wholesale deal (novations can bypass)")
            }
            _ => None,
        }
    }

    pub fn profile(self) -> StateProfile {
        StateProfile {
            code: self.code(),
            name: self.name(),
            restriction: self.wholesale_restriction(),
            attorney_state: self.is_attorney_state(),
            non_disclosure: self.is_non_disclosure_state(),
            license_requirement: self.license_requirement(),
        }
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for UsState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for UsState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Compliance summary for a single state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateProfile {
    pub code: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction: Option<&'static str>,
    pub attorney_state: bool,
    pub non_disclosure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_requirement: Option<&'static str>,
}
