use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ========== Usuário ==========
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Resposta de login, registro e atualização de perfil
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// ========== Serviços ==========
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: i64,
    pub service_id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub rate: f64,
    pub final_rate: f64,
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// ========== Pedidos ==========
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub link: String,
    pub quantity: i64,
    pub charge: f64,
    #[serde(default)]
    pub start_count: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub barato_order_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub current_page: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub service_id: i64,
    pub link: String,
    pub quantity: i64,
    pub comments: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreated {
    #[serde(default)]
    pub message: Option<String>,
    pub order: Order,
    #[serde(default)]
    pub remaining_balance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(default)]
    pub message: Option<String>,
    pub order: Order,
}

// ========== Pagamentos ==========

/// Status normalizado de um pagamento
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Refunded,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Other(s) => s,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl From<String> for PaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<PaymentStatus> for String {
    fn from(s: PaymentStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub payment_id: Option<String>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentsPage {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub current_page: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub amount: f64,
}

/// Mercado Pago devolve `null` em campos ausentes do PIX
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PixInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qr_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qr_code_base64: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ticket_url: String,
}

impl PixInfo {
    pub fn has_qr_code(&self) -> bool {
        !self.qr_code.trim().is_empty()
    }
}

/// Resposta de `create-payment`
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCreated {
    pub payment_id: i64,
    #[serde(default)]
    pub mp_payment_id: Option<serde_json::Value>,
    pub amount: f64,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub pix_info: Option<PixInfo>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Pagamento aguardando confirmação no modal PIX
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayment {
    pub payment_id: i64,
    pub amount: f64,
    pub pix_info: Option<PixInfo>,
    pub mp_payment_id: Option<String>,
    pub expires_at: Option<String>,
}

impl From<PaymentCreated> for PendingPayment {
    fn from(p: PaymentCreated) -> Self {
        let mp_payment_id = p.mp_payment_id.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
        Self {
            payment_id: p.payment_id,
            amount: p.amount,
            pix_info: p.pix_info.filter(|pix| pix.has_qr_code() || !pix.qr_code_base64.is_empty()),
            mp_payment_id,
            expires_at: p.expires_at,
        }
    }
}

/// Resposta de `check-payment/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentCheck {
    #[serde(default)]
    pub payment_id: Option<i64>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub mp_status: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub user_balance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDecision {
    #[serde(default)]
    pub message: Option<String>,
    pub payment: Payment,
    #[serde(default)]
    pub user_new_balance: Option<f64>,
}

// ========== Admin ==========

/// Configurações do admin (chave → valor)
pub type AdminConfig = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue {
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub pending_orders: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub monthly_revenue: f64,
    #[serde(default)]
    pub total_user_balance: f64,
    #[serde(default)]
    pub pending_payments: u64,
}

/// Resultado dos testes de conexão (BaratoSocial / Mercado Pago)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiagnosticResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub balance: Option<serde_json::Value>,
    #[serde(default)]
    pub payment_methods_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicesSync {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub new_services: u64,
    #[serde(default)]
    pub updated_services: u64,
}

/// Corpo de erro padrão do backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
