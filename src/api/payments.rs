use async_trait::async_trait;

use super::PanelClient;
use crate::engine::amount::Amount;
use crate::engine::poller::PaymentStatusSource;
use crate::error::Result;
use crate::models::{CreatePaymentRequest, Payment, PaymentCheck, PaymentCreated};

impl PanelClient {
    pub async fn payments(&self) -> Result<Vec<Payment>> {
        self.perform_get("/payments").await
    }

    /// Cria a cobrança PIX no Mercado Pago
    pub async fn create_payment(&self, amount: Amount) -> Result<PaymentCreated> {
        let body = CreatePaymentRequest {
            amount: amount.value(),
        };
        self.perform_post("/payments/create-payment", &body).await
    }

    pub async fn check_payment(&self, payment_id: i64) -> Result<PaymentCheck> {
        self.perform_get(&format!("/payments/check-payment/{}", payment_id))
            .await
    }
}

#[async_trait]
impl PaymentStatusSource for PanelClient {
    async fn check_payment(&self, payment_id: i64) -> Result<PaymentCheck> {
        PanelClient::check_payment(self, payment_id).await
    }
}
