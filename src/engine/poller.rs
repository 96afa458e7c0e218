//! Verificação periódica do status de um pagamento PIX.
//!
//! Cada modal de pagamento aberto possui no máximo um [`PollHandle`]. O timer
//! dispara a cada `interval` independente das requisições anteriores, então
//! respostas lentas podem se sobrepor; o status exibido é sempre o da última
//! resposta aplicada. A aprovação encerra o timer e gera um único toast.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{PaymentCheck, PaymentStatus, PendingPayment};
use crate::notify::{Notifier, Toast};

pub const APPROVED_MESSAGE: &str = "Pagamento aprovado! Saldo adicionado.";
pub const EXPIRED_MESSAGE: &str =
    "Tempo de verificação esgotado. Use \"Verificar Status\" para consultar o pagamento.";

/// Consulta externa do status de um pagamento
#[async_trait]
pub trait PaymentStatusSource: Send + Sync {
    async fn check_payment(&self, payment_id: i64) -> Result<PaymentCheck>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// `None` = verifica até aprovação ou fechamento do modal
    pub max_attempts: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        let cfg = ClientConfig::default();
        Self::from(&cfg)
    }
}

impl From<&ClientConfig> for PollSettings {
    fn from(cfg: &ClientConfig) -> Self {
        Self {
            interval: cfg.poll_interval.max(Duration::from_millis(1)),
            max_attempts: cfg.poll_max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Approved { user_balance: Option<f64> },
    Cancelled,
    Expired { attempts: u32 },
}

// ========================================
// Estado compartilhado entre timer, checks e handle
// ========================================
struct PollShared {
    payment_id: i64,
    source: Arc<dyn PaymentStatusSource>,
    notifier: Arc<dyn Notifier>,
    token: CancellationToken,
    approved: AtomicBool,
    expired: AtomicBool,
    attempts: AtomicU32,
    last_check: watch::Sender<Option<PaymentCheck>>,
}

impl PollShared {
    async fn check_once(&self) -> Option<PaymentStatus> {
        match self.source.check_payment(self.payment_id).await {
            Ok(check) => {
                let status = check.status.clone();
                self.apply(check);
                Some(status)
            }
            Err(e) => {
                warn!(
                    payment_id = self.payment_id,
                    "Pagamento: falha ao verificar status: {}", e
                );
                None
            }
        }
    }

    fn apply(&self, check: PaymentCheck) {
        let approved_now = check.status.is_approved();
        let applied = self.last_check.send_if_modified(|slot| {
            // Depois de aprovado, respostas atrasadas não sobrescrevem o status
            if slot.as_ref().is_some_and(|c| c.status.is_approved()) {
                return false;
            }
            *slot = Some(check);
            true
        });

        if !applied {
            debug!(payment_id = self.payment_id, "Pagamento: resposta ignorada após aprovação");
            return;
        }

        if approved_now && !self.approved.swap(true, Ordering::SeqCst) {
            info!(payment_id = self.payment_id, "Pagamento aprovado");
            self.notifier.notify(Toast::success(APPROVED_MESSAGE));
            self.token.cancel();
        }
    }

    fn outcome(&self) -> PollOutcome {
        if self.approved.load(Ordering::SeqCst) {
            let user_balance = self
                .last_check
                .borrow()
                .as_ref()
                .and_then(|c| c.user_balance);
            PollOutcome::Approved { user_balance }
        } else if self.expired.load(Ordering::SeqCst) {
            PollOutcome::Expired {
                attempts: self.attempts.load(Ordering::SeqCst),
            }
        } else {
            PollOutcome::Cancelled
        }
    }
}

async fn run(shared: Arc<PollShared>, settings: PollSettings) {
    let mut ticker = time::interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = JoinSet::new();
    let mut exhausted = false;

    loop {
        // Limite atingido: só expira depois que a última resposta chegar
        if exhausted && in_flight.is_empty() && !shared.token.is_cancelled() {
            let attempts = shared.attempts.load(Ordering::SeqCst);
            info!(payment_id = shared.payment_id, attempts, "Pagamento: limite de verificações atingido");
            shared.expired.store(true, Ordering::SeqCst);
            shared.notifier.notify(Toast::info(EXPIRED_MESSAGE));
            shared.token.cancel();
            break;
        }

        tokio::select! {
            biased;
            _ = shared.token.cancelled() => break,
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            _ = ticker.tick(), if !exhausted => {
                let done = shared.attempts.load(Ordering::SeqCst);
                if settings.max_attempts.is_some_and(|max| done >= max) {
                    debug!(payment_id = shared.payment_id, pending = in_flight.len(), "Pagamento: aguardando verificações em andamento");
                    exhausted = true;
                } else {
                    shared.attempts.store(done + 1, Ordering::SeqCst);
                    debug!(payment_id = shared.payment_id, attempt = done + 1, "Pagamento: verificando status");
                    let check = Arc::clone(&shared);
                    in_flight.spawn(async move {
                        check.check_once().await;
                    });
                }
            }
        }
    }

    // Cancelado ou aprovado: requisições pendentes morrem junto com o modal
    in_flight.abort_all();
}

// ========================================
// Poller
// ========================================
#[derive(Clone)]
pub struct PaymentPoller {
    source: Arc<dyn PaymentStatusSource>,
    notifier: Arc<dyn Notifier>,
    settings: PollSettings,
}

impl fmt::Debug for PaymentPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentPoller")
            .field("settings", &self.settings)
            .finish()
    }
}

impl PaymentPoller {
    pub fn new(
        source: Arc<dyn PaymentStatusSource>,
        notifier: Arc<dyn Notifier>,
        settings: PollSettings,
    ) -> Self {
        Self {
            source,
            notifier,
            settings,
        }
    }

    /// Inicia a verificação periódica. Precisa de um runtime tokio ativo.
    pub fn start(&self, payment_id: i64) -> PollHandle {
        let (last_check, status_rx) = watch::channel(None);
        let shared = Arc::new(PollShared {
            payment_id,
            source: Arc::clone(&self.source),
            notifier: Arc::clone(&self.notifier),
            token: CancellationToken::new(),
            approved: AtomicBool::new(false),
            expired: AtomicBool::new(false),
            attempts: AtomicU32::new(0),
            last_check,
        });

        info!(
            payment_id,
            interval_secs = self.settings.interval.as_secs_f64(),
            "Pagamento: iniciando verificação periódica"
        );
        let task = tokio::spawn(run(Arc::clone(&shared), self.settings));

        PollHandle {
            shared,
            status_rx,
            task,
        }
    }
}

// ========================================
// Handle do timer
// ========================================

/// Cancela o timer ao ser descartado.
pub struct PollHandle {
    shared: Arc<PollShared>,
    status_rx: watch::Receiver<Option<PaymentCheck>>,
    task: JoinHandle<()>,
}

impl fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollHandle")
            .field("payment_id", &self.shared.payment_id)
            .field("active", &self.is_active())
            .field("attempts", &self.attempts())
            .field("status", &self.status())
            .finish()
    }
}

impl PollHandle {
    pub fn payment_id(&self) -> i64 {
        self.shared.payment_id
    }

    pub fn is_active(&self) -> bool {
        !self.shared.token.is_cancelled() && !self.task.is_finished()
    }

    pub fn is_approved(&self) -> bool {
        self.shared.approved.load(Ordering::SeqCst)
    }

    /// Verificações disparadas pelo timer (não conta as manuais)
    pub fn attempts(&self) -> u32 {
        self.shared.attempts.load(Ordering::SeqCst)
    }

    /// Último status recebido; `None` enquanto nenhuma resposta chegou
    pub fn status(&self) -> Option<PaymentStatus> {
        self.status_rx.borrow().as_ref().map(|c| c.status.clone())
    }

    pub fn last_check(&self) -> Option<PaymentCheck> {
        self.status_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<PaymentCheck>> {
        self.status_rx.clone()
    }

    /// Verificação manual imediata, com as mesmas regras do timer
    pub async fn check_now(&self) -> Option<PaymentStatus> {
        self.shared.check_once().await
    }

    pub fn cancel(&self) {
        if !self.shared.token.is_cancelled() {
            debug!(payment_id = self.shared.payment_id, "Pagamento: verificação cancelada");
            self.shared.token.cancel();
        }
    }

    /// Aguarda o fim da verificação (aprovação, cancelamento ou limite)
    pub async fn outcome(&self) -> PollOutcome {
        self.shared.token.cancelled().await;
        self.shared.outcome()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shared.token.cancel();
    }
}

// ========================================
// Modal de pagamento
// ========================================
struct OpenPayment {
    payment: PendingPayment,
    handle: PollHandle,
}

/// Dono do pagamento pendente e do seu único timer de verificação.
#[derive(Debug)]
pub struct PaymentModal {
    poller: PaymentPoller,
    current: Option<OpenPayment>,
}

impl fmt::Debug for OpenPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenPayment")
            .field("payment", &self.payment)
            .field("handle", &self.handle)
            .finish()
    }
}

impl PaymentModal {
    pub fn new(poller: PaymentPoller) -> Self {
        Self {
            poller,
            current: None,
        }
    }

    /// Abre o modal para um novo pagamento, cancelando o timer anterior
    pub fn open(&mut self, payment: PendingPayment) -> &PollHandle {
        if let Some(previous) = self.current.take() {
            debug!(
                payment_id = previous.payment.payment_id,
                "Pagamento: substituindo modal anterior"
            );
            previous.handle.cancel();
        }
        let handle = self.poller.start(payment.payment_id);
        &self.current.insert(OpenPayment { payment, handle }).handle
    }

    /// Fecha o modal; devolve o pagamento descartado
    pub fn close(&mut self) -> Option<PendingPayment> {
        self.current.take().map(|open| {
            open.handle.cancel();
            open.payment
        })
    }

    /// Aberto e ainda aguardando aprovação
    pub fn is_open(&self) -> bool {
        self.pending().is_some()
    }

    pub fn pending(&self) -> Option<&PendingPayment> {
        self.current
            .as_ref()
            .filter(|open| !open.handle.is_approved())
            .map(|open| &open.payment)
    }

    pub fn payment(&self) -> Option<&PendingPayment> {
        self.current.as_ref().map(|open| &open.payment)
    }

    pub fn handle(&self) -> Option<&PollHandle> {
        self.current.as_ref().map(|open| &open.handle)
    }

    pub fn status(&self) -> Option<PaymentStatus> {
        self.handle().and_then(|h| h.status())
    }

    pub async fn check_now(&self) -> Option<PaymentStatus> {
        match self.handle() {
            Some(handle) => handle.check_now().await,
            None => None,
        }
    }
}
