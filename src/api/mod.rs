//! Cliente HTTP da API do painel.
//!
//! A sessão é mantida pelo cookie store do reqwest: depois do login, todas as
//! chamadas seguintes usam o mesmo cookie de sessão.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{PanelError, Result};
use crate::models::ErrorBody;

mod account;
mod admin;
mod catalog;
mod orders;
mod payments;

#[derive(Debug, Clone)]
pub struct PanelClient {
    client: reqwest::Client,
    base: String,
}

impl PanelClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn perform_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.get(self.endpoint(path)), "GET", path)
            .await
    }

    async fn perform_get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.client.get(self.endpoint(path)).query(query), "GET", path)
            .await
    }

    async fn perform_post<R, T>(&self, path: &str, body: &R) -> Result<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.endpoint(path)).json(body), "POST", path)
            .await
    }

    async fn perform_post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.post(self.endpoint(path)), "POST", path)
            .await
    }

    async fn perform_put<R, T>(&self, path: &str, body: &R) -> Result<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.put(self.endpoint(path)).json(body), "PUT", path)
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<T> {
        debug!("API: {} {}", method, path);
        let response = request.send().await?;
        read_json(response).await
    }
}

/// Corpo JSON em caso de sucesso; campo `error` do backend em caso de falha
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
        debug!("API: HTTP {} ({:?})", status, body.error);
        return Err(PanelError::http(status, body.error));
    }

    serde_json::from_slice(&bytes).map_err(|e| PanelError::Decode(e.to_string()))
}
