//! Outreach delivery: compose links, send-delay scheduling, and dispatch through a sender.

mod dispatch;
pub mod links;
mod schedule;

pub use dispatch::{
    Channel, DeliveryError, DeliveryResult, DeliveryStatus, DispatchReport, DispatchSummary,
    EmailMessage, OutreachBatch, OutreachDispatcher, OutreachSender, SendReceipt, SmsMessage,
};
pub use links::{AddressParts, ListingLinks};
pub use schedule::parse_send_delay;
