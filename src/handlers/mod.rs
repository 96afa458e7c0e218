//! Fluxos do painel: cada ação do usuário chama a API, atualiza o
//! [`PanelState`] e transforma qualquer falha em toast.

use std::sync::Arc;

use tracing::warn;

use crate::api::PanelClient;
use crate::config::ClientConfig;
use crate::engine::poller::{PaymentModal, PaymentPoller, PollSettings};
use crate::error::Result;
use crate::notify::{Notifier, Toast};
use crate::session::PanelState;

pub mod account;
pub mod admin;
pub mod orders;
pub mod payments;

// ========================================
// Controller do painel
// ========================================
pub struct Panel {
    client: Arc<PanelClient>,
    state: PanelState,
    notifier: Arc<dyn Notifier>,
    modal: PaymentModal,
}

impl Panel {
    pub fn new(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let client = Arc::new(PanelClient::new(config)?);
        Ok(Self::with_client(client, notifier, PollSettings::from(config)))
    }

    pub fn with_client(
        client: Arc<PanelClient>,
        notifier: Arc<dyn Notifier>,
        settings: PollSettings,
    ) -> Self {
        let poller = PaymentPoller::new(client.clone(), Arc::clone(&notifier), settings);
        Self {
            client,
            state: PanelState::new(),
            notifier,
            modal: PaymentModal::new(poller),
        }
    }

    pub fn client(&self) -> &PanelClient {
        &self.client
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn modal(&self) -> &PaymentModal {
        &self.modal
    }

    fn success(&self, message: impl Into<String>) {
        self.notifier.notify(Toast::success(message));
    }

    /// Falha vira toast; o estado do painel fica como estava
    fn report<T>(&self, result: Result<T>, fallback: &str) -> Result<T> {
        if let Err(e) = &result {
            warn!("Painel: {} ({})", fallback, e);
            self.notifier.notify(Toast::error(e.toast_message(fallback)));
        }
        result
    }
}
