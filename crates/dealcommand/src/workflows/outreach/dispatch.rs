use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::links::{gmail_compose_link, sms_link};
use super::schedule::parse_send_delay;

/// One email in an outreach sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub send_delay: String,
}

/// One text message in an outreach sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub to: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub send_delay: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachBatch {
    #[serde(default)]
    pub emails: Vec<EmailMessage>,
    #[serde(default)]
    pub sms_messages: Vec<SmsMessage>,
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Deliver zero-delay messages now instead of scheduling them.
    #[serde(default)]
    pub send_immediate: bool,
}

impl OutreachBatch {
    pub fn len(&self) -> usize {
        self.emails.len() + self.sms_messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a provider did with a message it accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// False when the provider only produced a compose link for a human to send.
    pub delivered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery provider rejected message: {0}")]
    Rejected(String),
    #[error("delivery transport unavailable: {0}")]
    Transport(String),
    #[error("send delay '{0}' is out of range")]
    DelayOutOfRange(String),
}

/// Outbound email/SMS provider adapter.
pub trait OutreachSender: Send + Sync {
    fn send_email(
        &self,
        email: &EmailMessage,
        sender_name: Option<&str>,
    ) -> Result<SendReceipt, DeliveryError>;
    fn send_sms(&self, sms: &SmsMessage) -> Result<SendReceipt, DeliveryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    Sent,
    Scheduled,
    LinkGenerated,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub channel: Channel,
    pub to: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryResult {
    fn from_send(channel: Channel, to: &str, outcome: Result<SendReceipt, DeliveryError>) -> Self {
        match outcome {
            Ok(receipt) => Self {
                channel,
                to: to.to_string(),
                status: if receipt.delivered {
                    DeliveryStatus::Sent
                } else {
                    DeliveryStatus::LinkGenerated
                },
                method: Some(receipt.method),
                scheduled_at: None,
                link: receipt.link,
                error: None,
            },
            Err(err) => {
                warn!(?channel, %to, error = %err, "outreach delivery failed");
                Self {
                    channel,
                    to: to.to_string(),
                    status: DeliveryStatus::Error,
                    method: None,
                    scheduled_at: None,
                    link: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    fn scheduled(channel: Channel, to: &str, at: DateTime<Utc>, link: String) -> Self {
        Self {
            channel,
            to: to.to_string(),
            status: DeliveryStatus::Scheduled,
            method: None,
            scheduled_at: Some(at),
            link: Some(link),
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub sent: usize,
    pub scheduled: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub results: Vec<DeliveryResult>,
    pub summary: DispatchSummary,
}

impl DispatchReport {
    fn from_results(results: Vec<DeliveryResult>) -> Self {
        let count = |status: DeliveryStatus| {
            results
                .iter()
                .filter(|result| result.status == status)
                .count()
        };
        let summary = DispatchSummary {
            total: results.len(),
            sent: count(DeliveryStatus::Sent),
            scheduled: count(DeliveryStatus::Scheduled),
            errors: count(DeliveryStatus::Error),
        };
        Self { results, summary }
    }
}

fn send_at(now: DateTime<Utc>, raw_delay: &str) -> Result<DateTime<Utc>, DeliveryError> {
    now.checked_add_signed(parse_send_delay(raw_delay))
        .ok_or_else(|| DeliveryError::DelayOutOfRange(raw_delay.to_string()))
}

/// Walks an outreach batch, sending due messages and scheduling the rest.
pub struct OutreachDispatcher<S> {
    sender: Arc<S>,
}

impl<S> OutreachDispatcher<S>
where
    S: OutreachSender + 'static,
{
    pub fn new(sender: Arc<S>) -> Self {
        Self { sender }
    }

    /// Emails are processed before SMS; results keep that order.
    pub fn dispatch(&self, batch: &OutreachBatch, now: DateTime<Utc>) -> DispatchReport {
        let mut results = Vec::with_capacity(batch.len());
        let sender_name = batch.sender_name.as_deref();

        for email in &batch.emails {
            let delay = parse_send_delay(&email.send_delay);
            if batch.send_immediate && delay.is_zero() {
                let outcome = self.sender.send_email(email, sender_name);
                results.push(DeliveryResult::from_send(Channel::Email, &email.to, outcome));
            } else {
                debug!(to = %email.to, delay = %email.send_delay, "scheduling email");
                results.push(match send_at(now, &email.send_delay) {
                    Ok(at) => DeliveryResult::scheduled(
                        Channel::Email,
                        &email.to,
                        at,
                        gmail_compose_link(&email.to, &email.subject, &email.body),
                    ),
                    Err(err) => DeliveryResult::from_send(Channel::Email, &email.to, Err(err)),
                });
            }
        }

        for sms in &batch.sms_messages {
            let delay = parse_send_delay(&sms.send_delay);
            if batch.send_immediate && delay.is_zero() {
                let outcome = self.sender.send_sms(sms);
                results.push(DeliveryResult::from_send(Channel::Sms, &sms.to, outcome));
            } else {
                debug!(to = %sms.to, delay = %sms.send_delay, "scheduling sms");
                results.push(match send_at(now, &sms.send_delay) {
                    Ok(at) => DeliveryResult::scheduled(
                        Channel::Sms,
                        &sms.to,
                        at,
                        sms_link(&sms.to, &sms.message),
                    ),
                    Err(err) => DeliveryResult::from_send(Channel::Sms, &sms.to, Err(err)),
                });
            }
        }

        let report = DispatchReport::from_results(results);
        info!(
            total = report.summary.total,
            sent = report.summary.sent,
            scheduled = report.summary.scheduled,
            errors = report.summary.errors,
            "outreach batch dispatched"
        );
        report
    }
}
