use dealcommand::workflows::outreach::links::{gmail_compose_link, sms_link};
use dealcommand::workflows::outreach::{
    DeliveryError, EmailMessage, OutreachDispatcher, OutreachSender, SendReceipt, SmsMessage,
};
use dealcommand::workflows::pipeline::{
    Buyer, DailyChecklist, KpiRepository, KpiSnapshot, LeadId, PipelineLead, PipelineRepository,
    RecordId, RepositoryError, SavedDeal, SavedMarket,
};
use dealcommand::workflows::reference::UsState;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct PipelineTables {
    leads: Vec<PipelineLead>,
    markets: Vec<SavedMarket>,
    deals: Vec<SavedDeal>,
    buyers: Vec<Buyer>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPipelineRepository {
    tables: Arc<Mutex<PipelineTables>>,
}

impl PipelineRepository for InMemoryPipelineRepository {
    fn insert_lead(&self, lead: PipelineLead) -> Result<PipelineLead, RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        if guard.leads.iter().any(|existing| existing.id == lead.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.leads.push(lead.clone());
        Ok(lead)
    }

    fn update_lead(&self, lead: PipelineLead) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        match guard.leads.iter_mut().find(|existing| existing.id == lead.id) {
            Some(slot) => {
                *slot = lead;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_lead(&self, id: &LeadId) -> Result<Option<PipelineLead>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard.leads.iter().find(|lead| &lead.id == id).cloned())
    }

    fn list_leads(&self) -> Result<Vec<PipelineLead>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard.leads.clone())
    }

    fn remove_lead(&self, id: &LeadId) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        let before = guard.leads.len();
        guard.leads.retain(|lead| &lead.id != id);
        if guard.leads.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn insert_market(&self, market: SavedMarket) -> Result<SavedMarket, RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        guard.markets.push(market.clone());
        Ok(market)
    }

    fn list_markets(&self) -> Result<Vec<SavedMarket>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard.markets.clone())
    }

    fn insert_deal(&self, deal: SavedDeal) -> Result<SavedDeal, RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        guard.deals.push(deal.clone());
        Ok(deal)
    }

    fn list_deals(&self) -> Result<Vec<SavedDeal>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard.deals.clone())
    }

    fn insert_buyer(&self, buyer: Buyer) -> Result<Buyer, RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        guard.buyers.push(buyer.clone());
        Ok(buyer)
    }

    fn list_buyers(&self) -> Result<Vec<Buyer>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard.buyers.clone())
    }

    fn remove_buyer(&self, id: &RecordId) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        let before = guard.buyers.len();
        guard.buyers.retain(|buyer| &buyer.id != id);
        if guard.buyers.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryKpiRepository {
    snapshot: Arc<Mutex<Option<KpiSnapshot>>>,
    checklist: Arc<Mutex<Option<DailyChecklist>>>,
}

impl KpiRepository for InMemoryKpiRepository {
    fn load_snapshot(&self) -> Result<Option<KpiSnapshot>, RepositoryError> {
        Ok(self.snapshot.lock().expect("kpi mutex poisoned").clone())
    }

    fn store_snapshot(&self, snapshot: KpiSnapshot) -> Result<(), RepositoryError> {
        *self.snapshot.lock().expect("kpi mutex poisoned") = Some(snapshot);
        Ok(())
    }

    fn load_checklist(&self) -> Result<Option<DailyChecklist>, RepositoryError> {
        Ok(self.checklist.lock().expect("kpi mutex poisoned").clone())
    }

    fn store_checklist(&self, checklist: DailyChecklist) -> Result<(), RepositoryError> {
        *self.checklist.lock().expect("kpi mutex poisoned") = Some(checklist);
        Ok(())
    }
}

/// Hands back compose links instead of delivering; a human presses send.
#[derive(Default, Clone)]
pub(crate) struct LinkOnlySender;

impl OutreachSender for LinkOnlySender {
    fn send_email(
        &self,
        email: &EmailMessage,
        _sender_name: Option<&str>,
    ) -> Result<SendReceipt, DeliveryError> {
        Ok(SendReceipt {
            method: "gmail-link".to_string(),
            link: Some(gmail_compose_link(&email.to, &email.subject, &email.body)),
            delivered: false,
        })
    }

    fn send_sms(&self, sms: &SmsMessage) -> Result<SendReceipt, DeliveryError> {
        Ok(SendReceipt {
            method: "sms-link".to_string(),
            link: Some(sms_link(&sms.to, &sms.message)),
            delivered: false,
        })
    }
}

/// Dispatcher plus the signature applied when a batch names no sender.
pub(crate) struct OutreachDesk {
    pub(crate) dispatcher: OutreachDispatcher<LinkOnlySender>,
    pub(crate) default_sender: String,
}

impl OutreachDesk {
    pub(crate) fn new(default_sender: impl Into<String>) -> Self {
        Self {
            dispatcher: OutreachDispatcher::new(Arc::new(LinkOnlySender)),
            default_sender: default_sender.into(),
        }
    }
}

pub(crate) fn parse_state(raw: &str) -> Result<UsState, String> {
    raw.parse::<UsState>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_only_sender_never_reports_delivery() {
        let sender = LinkOnlySender;
        let receipt = sender
            .send_sms(&SmsMessage {
                to: "8165550142".to_string(),
                message: "Still selling?".to_string(),
                kind: "sms-1".to_string(),
                send_delay: String::new(),
            })
            .expect("link generated");

        assert!(!receipt.delivered);
        assert_eq!(receipt.method, "sms-link");
        assert!(receipt
            .link
            .as_deref()
            .is_some_and(|link| link.starts_with("sms:8165550142?body=")));
    }

    #[test]
    fn removing_unknown_records_reports_not_found() {
        let repository = InMemoryPipelineRepository::default();

        assert!(matches!(
            repository.remove_lead(&LeadId("lead-999999".to_string())),
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            repository.remove_buyer(&RecordId("buyer-999999".to_string())),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn parse_state_accepts_lowercase_codes() {
        assert_eq!(parse_state("mo"), Ok(UsState::Missouri));
        assert!(parse_state("XX").is_err());
    }
}
