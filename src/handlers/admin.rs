use tracing::{debug, info, warn};

use super::Panel;
use crate::error::{PanelError, Result};
use crate::models::{AdminConfig, AdminStats, DiagnosticResult, Payment, PaymentsPage, User};
use crate::notify::Toast;

pub const ADMIN_PAYMENTS_PER_PAGE: u32 = 20;

/// Saldo informado pelo teste da BaratoSocial ("N/A" quando ausente)
fn diagnostic_balance(result: &DiagnosticResult) -> String {
    match &result.balance {
        None | Some(serde_json::Value::Null) => "N/A".into(),
        Some(serde_json::Value::String(s)) if s.is_empty() => "N/A".into(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Object(map)) => map
            .get("balance")
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "N/A".into()),
        Some(other) => other.to_string(),
    }
}

fn diagnostic_failure(result: &DiagnosticResult) -> String {
    result
        .message
        .clone()
        .or_else(|| result.error.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Erro desconhecido".into())
}

impl Panel {
    /// Bloqueia fluxos de admin sem tocar na rede
    fn require_admin(&self) -> Result<()> {
        if self.state.is_admin() {
            return Ok(());
        }
        self.report(Err(PanelError::Forbidden), "Acesso negado")
    }

    // ========================================
    // Configurações
    // ========================================
    pub async fn load_admin_config(&self) -> Result<AdminConfig> {
        self.require_admin()?;
        self.report(
            self.client.admin_config().await,
            "Erro ao carregar configurações",
        )
    }

    pub async fn save_admin_config(&self, config: &AdminConfig) -> Result<()> {
        self.require_admin()?;
        self.report(
            self.client.save_admin_config(config).await,
            "Erro ao salvar configurações",
        )?;
        info!(keys = config.len(), "Admin: configurações salvas");
        self.success("Configurações salvas com sucesso!");
        Ok(())
    }

    pub async fn set_admin_config(&self, key: &str, value: Option<String>) -> Result<()> {
        self.require_admin()?;
        let key = key.trim();
        if key.is_empty() {
            return self.report(
                Err(PanelError::Validation("Informe a chave".into())),
                "Erro ao salvar configurações",
            );
        }
        let saved = self.report(
            self.client.set_admin_config(key, value).await,
            "Erro ao salvar configurações",
        )?;
        self.success(
            saved
                .message
                .unwrap_or_else(|| "Configurações salvas com sucesso!".into()),
        );
        Ok(())
    }

    // ========================================
    // Testes de conexão
    // ========================================
    pub async fn test_barato_api(&self) -> Result<DiagnosticResult> {
        self.require_admin()?;
        let result = self.report(self.client.test_barato_api().await, "Erro na API")?;
        if result.success {
            self.success(format!(
                "API BaratoSocial OK! Saldo: {}",
                diagnostic_balance(&result)
            ));
        } else {
            warn!("Admin: teste BaratoSocial falhou");
            self.notifier.notify(Toast::error(format!(
                "Erro na API: {}",
                diagnostic_failure(&result)
            )));
        }
        Ok(result)
    }

    pub async fn test_mercado_pago(&self) -> Result<DiagnosticResult> {
        self.require_admin()?;
        let result = self.report(self.client.test_mercado_pago().await, "Erro no MP")?;
        if result.success {
            self.success(format!(
                "Mercado Pago OK! Métodos: {}",
                result.payment_methods_count.unwrap_or(0)
            ));
        } else {
            warn!("Admin: teste Mercado Pago falhou");
            self.notifier.notify(Toast::error(format!(
                "Erro no MP: {}",
                diagnostic_failure(&result)
            )));
        }
        Ok(result)
    }

    // ========================================
    // Usuários, estatísticas e pagamentos
    // ========================================
    pub async fn load_users(&self) -> Result<Vec<User>> {
        self.require_admin()?;
        self.report(self.client.users().await, "Erro ao carregar usuários")
    }

    pub async fn load_admin_stats(&self) -> Result<AdminStats> {
        self.require_admin()?;
        self.report(
            self.client.admin_stats().await,
            "Erro ao carregar estatísticas",
        )
    }

    pub async fn load_admin_payments(
        &self,
        page: Option<u32>,
        status: Option<&str>,
    ) -> Result<PaymentsPage> {
        self.require_admin()?;
        self.report(
            self.client
                .admin_payments(page, Some(ADMIN_PAYMENTS_PER_PAGE), status)
                .await,
            "Erro ao carregar pagamentos",
        )
    }

    pub async fn approve_payment(&mut self, payment_id: i64) -> Result<Payment> {
        self.require_admin()?;
        let decision = self.report(
            self.client.approve_payment(payment_id).await,
            "Erro ao aprovar pagamento",
        )?;
        info!(payment_id, "Admin: pagamento aprovado manualmente");
        self.success(
            decision
                .message
                .unwrap_or_else(|| "Pagamento aprovado com sucesso".into()),
        );
        // Admin aprovando a própria recarga
        if decision.payment.user_id == self.state.user.as_ref().map(|u| u.id) {
            if let Some(balance) = decision.user_new_balance {
                self.state.set_balance(balance);
            }
        }
        Ok(decision.payment)
    }

    pub async fn reject_payment(&self, payment_id: i64) -> Result<Payment> {
        self.require_admin()?;
        let decision = self.report(
            self.client.reject_payment(payment_id).await,
            "Erro ao rejeitar pagamento",
        )?;
        info!(payment_id, "Admin: pagamento rejeitado");
        self.success(decision.message.unwrap_or_else(|| "Pagamento rejeitado".into()));
        Ok(decision.payment)
    }

    pub async fn sync_services(&mut self) -> Result<(u64, u64)> {
        self.require_admin()?;
        let synced = self.report(
            self.client.sync_services().await,
            "Erro ao sincronizar serviços",
        )?;
        self.success(format!(
            "{} ({} novos, {} atualizados)",
            synced
                .message
                .as_deref()
                .unwrap_or("Serviços sincronizados com sucesso"),
            synced.new_services,
            synced.updated_services
        ));
        if let Err(e) = self.load_services().await {
            debug!("Painel: catálogo não recarregado após sincronização ({})", e);
        }
        Ok((synced.new_services, synced.updated_services))
    }
}
