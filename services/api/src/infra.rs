use driving_school::config::PaymentConfig;
use driving_school::registration::SimulatedGateway;
use driving_school::site::{ContactInbox, ContactMessage, InboxError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps contact messages in process until an e-mail relay is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContactInbox {
    messages: Arc<Mutex<Vec<ContactMessage>>>,
}

impl ContactInbox for InMemoryContactInbox {
    fn deliver(&self, message: ContactMessage) -> Result<(), InboxError> {
        let mut guard = self
            .messages
            .lock()
            .map_err(|_| InboxError::Unavailable("inbox lock poisoned".to_string()))?;
        guard.push(message);
        Ok(())
    }
}

impl InMemoryContactInbox {
    #[cfg(test)]
    pub(crate) fn messages(&self) -> Vec<ContactMessage> {
        self.messages.lock().expect("inbox mutex poisoned").clone()
    }
}

pub(crate) fn gateway_from_config(config: &PaymentConfig) -> SimulatedGateway {
    if config.simulate_decline {
        SimulatedGateway::declining(config.delay)
    } else {
        SimulatedGateway::new(config.delay)
    }
}
