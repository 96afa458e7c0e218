//! Cliente do painel INFLUENCIANDO: sessão, catálogo, pedidos e recarga PIX
//! com verificação periódica do pagamento.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod session;
pub mod views;

pub use api::PanelClient;
pub use config::ClientConfig;
pub use error::{PanelError, Result};
pub use handlers::Panel;
