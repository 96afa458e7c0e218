use tracing::debug;

use super::PanelClient;
use crate::error::{PanelError, Result};
use crate::models::{
    AdminConfig, AdminStats, ConfigValue, DiagnosticResult, MessageResponse, PaymentDecision,
    PaymentsPage, ServicesSync, User,
};

impl PanelClient {
    pub async fn admin_config(&self) -> Result<AdminConfig> {
        self.perform_get("/admin/config").await
    }

    pub async fn save_admin_config(&self, config: &AdminConfig) -> Result<MessageResponse> {
        self.perform_post("/admin/config", config).await
    }

    pub async fn set_admin_config(&self, key: &str, value: Option<String>) -> Result<MessageResponse> {
        let key: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        self.perform_put(&format!("/admin/config/{}", key), &ConfigValue { value })
            .await
    }

    pub async fn test_barato_api(&self) -> Result<DiagnosticResult> {
        self.perform_diagnostic("/admin/test-barato-api").await
    }

    pub async fn test_mercado_pago(&self) -> Result<DiagnosticResult> {
        self.perform_diagnostic("/admin/test-mercado-pago").await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.perform_get("/users").await
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        self.perform_get("/admin/dashboard-stats").await
    }

    pub async fn admin_payments(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        status: Option<&str>,
    ) -> Result<PaymentsPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            query.push(("status", status.to_string()));
        }
        self.perform_get_query("/admin/payments", &query).await
    }

    pub async fn approve_payment(&self, payment_id: i64) -> Result<PaymentDecision> {
        self.perform_post_empty(&format!("/admin/payments/{}/approve", payment_id))
            .await
    }

    pub async fn reject_payment(&self, payment_id: i64) -> Result<PaymentDecision> {
        self.perform_post_empty(&format!("/admin/payments/{}/reject", payment_id))
            .await
    }

    pub async fn sync_services(&self) -> Result<ServicesSync> {
        self.perform_post_empty("/admin/sync-services").await
    }

    /// Os testes de conexão respondem `{success, message}` mesmo com status de erro
    async fn perform_diagnostic(&self, path: &str) -> Result<DiagnosticResult> {
        debug!("API: POST {}", path);
        let response = self.client.post(self.endpoint(path)).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<DiagnosticResult>(&bytes) {
            Ok(result) if status.is_success() || !result.success => Ok(result),
            Ok(result) => Err(PanelError::http(status, result.error.or(result.message))),
            Err(e) if status.is_success() => Err(PanelError::Decode(e.to_string())),
            Err(_) => Err(PanelError::http(status, None)),
        }
    }
}
