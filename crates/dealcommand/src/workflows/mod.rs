pub mod deal;
pub mod leads;
pub mod market;
pub mod money;
pub mod outreach;
pub mod pipeline;
pub mod reference;
pub mod scripts;
pub mod validation;
