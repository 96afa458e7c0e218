use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
/// Uma hora de verificações com o intervalo padrão
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 360;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    /// `None` = sem limite
    pub poll_max_attempts: Option<u32>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            poll_max_attempts: Some(DEFAULT_POLL_MAX_ATTEMPTS),
            username: None,
            password: None,
        }
    }
}

impl ClientConfig {
    /// Lê a configuração das variáveis de ambiente `PAINEL_*`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, fallback: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(fallback)
        };

        let api_url = lookup("PAINEL_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let poll_max_attempts = match lookup("PAINEL_POLL_MAX_ATTEMPTS")
            .and_then(|v| v.trim().parse::<u32>().ok())
        {
            Some(0) => None,
            Some(n) => Some(n),
            None => defaults.poll_max_attempts,
        };

        Self {
            api_url,
            request_timeout: Duration::from_secs(secs("PAINEL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS).max(1)),
            poll_interval: Duration::from_secs(
                secs("PAINEL_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS).max(1),
            ),
            poll_max_attempts,
            username: lookup("PAINEL_USER").map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
            password: lookup("PAINEL_PASS").filter(|v| !v.is_empty()),
        }
    }

    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}
