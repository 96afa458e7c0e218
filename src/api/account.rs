use super::PanelClient;
use crate::error::Result;
use crate::models::{
    BalanceResponse, Credentials, HealthResponse, MessageResponse, ProfileUpdate, Registration,
    User, UserEnvelope,
};

impl PanelClient {
    pub async fn health(&self) -> Result<HealthResponse> {
        self.perform_get("/health").await
    }

    /// Abre a sessão; o cookie fica guardado no cliente
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let envelope: UserEnvelope = self.perform_post("/login", credentials).await?;
        Ok(envelope.user)
    }

    pub async fn register(&self, registration: &Registration) -> Result<UserEnvelope> {
        self.perform_post("/register", registration).await
    }

    pub async fn logout(&self) -> Result<MessageResponse> {
        self.perform_post_empty("/logout").await
    }

    pub async fn profile(&self) -> Result<User> {
        self.perform_get("/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserEnvelope> {
        self.perform_put("/profile", update).await
    }

    pub async fn balance(&self) -> Result<f64> {
        let resp: BalanceResponse = self.perform_get("/balance").await?;
        Ok(resp.balance)
    }
}
