use tracing::{debug, info};

use super::Panel;
use crate::engine::amount::parse_amount;
use crate::engine::poller::PollOutcome;
use crate::error::{PanelError, Result};
use crate::models::{Payment, PaymentCheck, PaymentStatus, PendingPayment};

impl Panel {
    pub async fn load_payments(&mut self) -> Result<Vec<Payment>> {
        self.report(self.client.payments().await, "Erro ao carregar pagamentos")
    }

    /// "Adicionar saldo": valida o valor, cria a cobrança PIX e abre o modal
    /// com a verificação periódica já em andamento.
    pub async fn add_balance(&mut self, input: &str) -> Result<PendingPayment> {
        let amount = self.report(
            parse_amount(input).map_err(PanelError::from),
            "Valor inválido",
        )?;

        let created = self.report(
            self.client.create_payment(amount).await,
            "Erro ao criar pagamento",
        )?;
        let pending = PendingPayment::from(created);
        info!(
            payment_id = pending.payment_id,
            amount = pending.amount,
            "Painel: cobrança PIX criada"
        );

        self.modal.open(pending.clone());
        Ok(pending)
    }

    /// Consulta avulsa, sem modal aberto
    pub async fn check_payment(&self, payment_id: i64) -> Result<PaymentCheck> {
        self.report(
            self.client.check_payment(payment_id).await,
            "Erro ao verificar pagamento",
        )
    }

    /// Botão "Verificar Status" do modal
    pub async fn check_payment_now(&mut self) -> Option<PaymentStatus> {
        let status = self.modal.check_now().await;
        if status.as_ref().is_some_and(PaymentStatus::is_approved) {
            self.settle_payment(PollOutcome::Approved { user_balance: None })
                .await;
        }
        status
    }

    /// Aguarda o fim da verificação do modal aberto
    pub async fn wait_payment(&self) -> Option<PollOutcome> {
        match self.modal.handle() {
            Some(handle) => Some(handle.outcome().await),
            None => None,
        }
    }

    pub fn close_payment_modal(&mut self) -> Option<PendingPayment> {
        self.modal.close()
    }

    /// Depois da aprovação: fecha o modal, atualiza saldo e histórico
    pub async fn settle_payment(&mut self, outcome: PollOutcome) {
        let PollOutcome::Approved { user_balance } = outcome else {
            return;
        };
        let user_balance =
            user_balance.or_else(|| self.modal.handle().and_then(|h| h.last_check()?.user_balance));
        self.modal.close();

        match user_balance {
            Some(balance) => self.state.set_balance(balance),
            None => {
                if let Err(e) = self.refresh_balance().await {
                    debug!("Painel: saldo não atualizado após aprovação ({})", e);
                }
            }
        }
        if let Err(e) = self.load_payments().await {
            debug!("Painel: histórico não recarregado após aprovação ({})", e);
        }
    }
}
