//! Constant lookup tables shared by the scoring, qualification, and script modules.

mod keywords;
mod states;

pub use keywords::{detect_keywords, is_motivated_keyword, matched_keywords, MOTIVATED_KEYWORDS};
pub use states::{
    StateProfile, UnknownState, UsState, ATTORNEY_STATES, LICENSE_REQUIRED_STATES,
    NON_DISCLOSURE_STATES, RESTRICTED_STATES,
};
