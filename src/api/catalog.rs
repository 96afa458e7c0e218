use super::PanelClient;
use crate::error::Result;
use crate::models::Service;

impl PanelClient {
    pub async fn services(&self) -> Result<Vec<Service>> {
        self.perform_get("/services").await
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        self.perform_get("/services/categories").await
    }
}
