use reqwest::StatusCode;
use thiserror::Error;

/// Mensagem genérica para falhas de rede
pub const CONNECTION_ERROR: &str = "Erro de conexão";

// ========================================
// Validação do valor de recarga
// ========================================
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("Por favor, insira um valor")]
    Empty,
    #[error("Valor inválido. Use apenas números.")]
    Invalid,
    #[error("Valor mínimo é R$ 1,00")]
    BelowMinimum,
    #[error("Valor máximo é R$ 10.000,00")]
    AboveMaximum,
}

// ========================================
// Erros do cliente do painel
// ========================================
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("falha de conexão: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("sem detalhes"))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("resposta inesperada do servidor: {0}")]
    Decode(String),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("{0}")]
    Validation(String),

    #[error("Acesso negado")]
    Forbidden,
}

impl PanelError {
    pub fn http(status: StatusCode, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    /// Texto do toast: erro do backend verbatim, senão o fallback do fluxo
    pub fn toast_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(e) if e.is_decode() => fallback.to_string(),
            Self::Transport(_) => CONNECTION_ERROR.to_string(),
            Self::Http {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            Self::Http { .. } | Self::Decode(_) => fallback.to_string(),
            Self::Amount(e) => e.to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::Forbidden => "Acesso negado".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T, E = PanelError> = std::result::Result<T, E>;
