use tracing::{debug, info};

use super::Panel;
use crate::engine::stats::{self, DashboardStats};
use crate::error::Result;
use crate::models::{Credentials, ProfileUpdate, Registration, User};

impl Panel {
    /// Restaura a sessão a partir do cookie; sem toast quando não há login
    pub async fn check_auth(&mut self) -> bool {
        match self.client.profile().await {
            Ok(user) => {
                debug!("Painel: sessão ativa para {}", user.username);
                self.state.set_user(user);
                true
            }
            Err(e) => {
                debug!("Painel: sem sessão ({})", e);
                self.state.clear();
                false
            }
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let credentials = Credentials {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let user = self.report(self.client.login(&credentials).await, "Erro no login")?;

        info!("Painel: login de {}", user.username);
        self.state.set_user(user.clone());
        self.success("Login realizado com sucesso!");
        Ok(user)
    }

    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        let registration = Registration {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let created = self.report(
            self.client.register(&registration).await,
            "Erro no registro",
        )?;
        self.success("Conta criada com sucesso! Faça login.");
        Ok(created.user)
    }

    /// Encerra a sessão local mesmo se o backend não responder
    pub async fn logout(&mut self) {
        if let Err(e) = self.client.logout().await {
            debug!("Painel: logout sem resposta do servidor ({})", e);
        }
        self.modal.close();
        self.state.clear();
        self.success("Logout realizado com sucesso!");
    }

    /// Recarrega perfil (saldo) e pedidos, e devolve os números do dashboard
    pub async fn load_dashboard(&mut self) -> Result<DashboardStats> {
        let user = self.report(self.client.profile().await, "Erro ao carregar dashboard")?;
        self.state.set_user(user);
        self.load_orders(None).await?;
        Ok(self.state.dashboard_stats())
    }

    pub fn recent_orders(&self) -> &[crate::models::Order] {
        stats::recent_orders(&self.state.orders)
    }

    /// Atualiza saldo exibido a partir de `/balance`
    pub async fn refresh_balance(&mut self) -> Result<f64> {
        let balance = self.report(self.client.balance().await, "Erro ao carregar saldo")?;
        self.state.set_balance(balance);
        Ok(balance)
    }

    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<User> {
        let updated = self.report(
            self.client.update_profile(&update).await,
            "Erro ao atualizar perfil",
        )?;
        self.success(
            updated
                .message
                .unwrap_or_else(|| "Perfil atualizado com sucesso".into()),
        );
        self.state.set_user(updated.user.clone());
        Ok(updated.user)
    }
}
