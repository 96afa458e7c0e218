#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{json, Value};

use painel::engine::poller::PollSettings;
use painel::notify::MemoryNotifier;
use painel::{ClientConfig, Panel, PanelClient};

pub const USER_NAME: &str = "ana";
pub const USER_PASSWORD: &str = "senha123";
pub const ADMIN_NAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const PIX_CODE: &str = "00020126580014br.gov.bcb.pix0136teste";
/// Só a assinatura de um PNG
pub const QR_BASE64: &str = "iVBORw0KGgo=";

const SESSION_COOKIE: &str = "session";
const CREATED_AT: &str = "2024-05-01T13:45:10.123456";

// ========================================
// Estado do backend falso
// ========================================
#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub balance: f64,
    pub is_admin: bool,
}

impl FakeUser {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "balance": self.balance,
            "is_admin": self.is_admin,
            "created_at": CREATED_AT,
        })
    }
}

#[derive(Debug, Default)]
pub struct Inner {
    pub users: Vec<FakeUser>,
    pub sessions: HashMap<String, i64>,
    pub services: Vec<Value>,
    pub orders: Vec<Value>,
    pub payments: Vec<Value>,
    pub config: BTreeMap<String, Option<String>>,
    /// Respostas do check-payment em ordem; vazio = "pending"
    pub check_script: VecDeque<&'static str>,
    pub requests: Vec<String>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_mut(&mut self, id: i64) -> Option<&mut FakeUser> {
        self.users.iter_mut().find(|u| u.id == id)
    }
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
}

impl FakeBackend {
    pub fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn hits(&self, route: &str) -> usize {
        self.inner().requests.iter().filter(|r| *r == route).count()
    }

    pub fn script_checks(&self, statuses: &[&'static str]) {
        self.inner().check_script.extend(statuses.iter().copied());
    }

    pub fn balance_of(&self, username: &str) -> f64 {
        self.inner()
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.balance)
            .unwrap_or_default()
    }

    fn seeded() -> Self {
        let mut inner = Inner {
            next_id: 100,
            ..Default::default()
        };
        inner.users = vec![
            FakeUser {
                id: 1,
                username: USER_NAME.into(),
                email: "ana@example.com".into(),
                password: USER_PASSWORD.into(),
                balance: 15.0,
                is_admin: false,
            },
            FakeUser {
                id: 2,
                username: ADMIN_NAME.into(),
                email: "admin@example.com".into(),
                password: ADMIN_PASSWORD.into(),
                balance: 0.0,
                is_admin: true,
            },
        ];
        inner.services = vec![
            json!({
                "id": 1, "service_id": 101, "name": "Seguidores Instagram", "type": "Default",
                "rate": 10.0, "final_rate": 12.0, "min": 100, "max": 10000,
                "category": "Instagram", "description": "Seguidores brasileiros", "is_active": true
            }),
            json!({
                "id": 2, "service_id": 202, "name": "Curtidas TikTok", "type": "Default",
                "rate": 3.75, "final_rate": 4.5, "min": 50, "max": 5000,
                "category": "TikTok", "description": null, "is_active": true
            }),
        ];
        inner.orders = vec![
            order_json(3, 101, "Seguidores Instagram", 1000, 12.0, "Completed"),
            order_json(2, 202, "Curtidas TikTok", 1000, 4.5, "In progress"),
            order_json(1, 202, "Curtidas TikTok", 100, 0.45, "Pending"),
        ];
        inner.payments = vec![json!({
            "id": 9, "user_id": 1, "amount": 20.0, "payment_id": "555",
            "status": "pending", "created_at": CREATED_AT, "updated_at": null
        })];
        inner.config.insert("profit_margin".into(), Some("20".into()));
        Self {
            inner: Mutex::new(inner),
        }
    }
}

fn order_json(id: i64, service_id: i64, name: &str, quantity: i64, charge: f64, status: &str) -> Value {
    json!({
        "id": id, "service_id": service_id, "service_name": name,
        "link": "https://instagram.com/perfil", "quantity": quantity, "charge": charge,
        "start_count": 0, "status": status, "barato_order_id": null,
        "created_at": CREATED_AT, "updated_at": null
    })
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

type Fake = State<Arc<FakeBackend>>;

fn session_user(fake: &FakeBackend, jar: &CookieJar) -> Option<FakeUser> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();
    let inner = fake.inner();
    let id = *inner.sessions.get(&token)?;
    inner.users.iter().find(|u| u.id == id).cloned()
}

macro_rules! require_user {
    ($fake:expr, $jar:expr) => {
        match session_user(&$fake, &$jar) {
            Some(user) => user,
            None => return error(StatusCode::UNAUTHORIZED, "Não autenticado"),
        }
    };
}

macro_rules! require_admin {
    ($fake:expr, $jar:expr) => {{
        let user = require_user!($fake, $jar);
        if !user.is_admin {
            return error(StatusCode::FORBIDDEN, "Acesso negado");
        }
        user
    }};
}

// ========================================
// Sessão e perfil
// ========================================
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn login(State(fake): Fake, jar: CookieJar, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let user = fake
        .inner()
        .users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .cloned();
    let Some(user) = user else {
        return error(StatusCode::UNAUTHORIZED, "Credenciais inválidas");
    };

    let token = format!("tok-{}-{}", user.id, fake.inner().sessions.len());
    fake.inner().sessions.insert(token.clone(), user.id);
    let cookie = Cookie::build((SESSION_COOKIE, token)).path("/").http_only(true);
    (
        jar.add(cookie),
        Json(json!({ "message": "Login realizado com sucesso", "user": user.to_json() })),
    )
        .into_response()
}

async fn register(State(fake): Fake, Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Campo username é obrigatório");
    }

    let mut inner = fake.inner();
    if inner.users.iter().any(|u| u.username == username) {
        return error(StatusCode::BAD_REQUEST, "Nome de usuário já existe");
    }
    let user = FakeUser {
        id: inner.next_id(),
        username,
        email,
        password,
        balance: 0.0,
        is_admin: false,
    };
    inner.users.push(user.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Usuário criado com sucesso", "user": user.to_json() })),
    )
        .into_response()
}

async fn logout(State(fake): Fake, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        fake.inner().sessions.remove(cookie.value());
    }
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(json!({ "message": "Logout realizado com sucesso" })),
    )
        .into_response()
}

async fn profile(State(fake): Fake, jar: CookieJar) -> Response {
    let user = require_user!(fake, jar);
    Json(user.to_json()).into_response()
}

async fn update_profile(State(fake): Fake, jar: CookieJar, Json(body): Json<Value>) -> Response {
    let user = require_user!(fake, jar);
    let mut inner = fake.inner();
    let Some(stored) = inner.user_mut(user.id) else {
        return error(StatusCode::NOT_FOUND, "Usuário não encontrado");
    };
    if let Some(email) = body["email"].as_str() {
        stored.email = email.to_string();
    }
    if let Some(password) = body["password"].as_str() {
        stored.password = password.to_string();
    }
    Json(json!({ "message": "Perfil atualizado com sucesso", "user": stored.to_json() }))
        .into_response()
}

async fn balance(State(fake): Fake, jar: CookieJar) -> Response {
    let user = require_user!(fake, jar);
    Json(json!({ "balance": user.balance })).into_response()
}

// ========================================
// Serviços e pedidos
// ========================================
async fn services(State(fake): Fake) -> Json<Value> {
    Json(Value::Array(fake.inner().services.clone()))
}

async fn categories(State(fake): Fake) -> Json<Value> {
    let mut cats: Vec<String> = fake
        .inner()
        .services
        .iter()
        .filter_map(|s| s["category"].as_str().map(String::from))
        .collect();
    cats.sort();
    cats.dedup();
    Json(json!(cats))
}

async fn orders(State(fake): Fake, jar: CookieJar) -> Response {
    require_user!(fake, jar);
    let orders = fake.inner().orders.clone();
    Json(json!({
        "orders": orders, "total": orders.len(), "pages": 1, "current_page": 1
    }))
    .into_response()
}

async fn create_order(State(fake): Fake, jar: CookieJar, Json(body): Json<Value>) -> Response {
    let user = require_user!(fake, jar);
    let service_id = body["service_id"].as_i64().unwrap_or_default();
    let quantity = body["quantity"].as_i64().unwrap_or_default();

    let mut inner = fake.inner();
    let Some(service) = inner
        .services
        .iter()
        .find(|s| s["service_id"].as_i64() == Some(service_id))
        .cloned()
    else {
        return error(StatusCode::NOT_FOUND, "Serviço não encontrado");
    };
    let charge = service["final_rate"].as_f64().unwrap_or_default() * quantity as f64 / 1000.0;
    if user.balance < charge {
        return error(StatusCode::BAD_REQUEST, "Saldo insuficiente");
    }

    let id = inner.next_id();
    let name = service["name"].as_str().unwrap_or_default().to_string();
    let order = order_json(id, service_id, &name, quantity, charge, "Pending");
    inner.orders.insert(0, order.clone());
    let remaining = match inner.user_mut(user.id) {
        Some(stored) => {
            stored.balance -= charge;
            stored.balance
        }
        None => 0.0,
    };
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Pedido criado com sucesso", "order": order, "remaining_balance": remaining
        })),
    )
        .into_response()
}

async fn order_status(State(fake): Fake, jar: CookieJar, Path(id): Path<i64>) -> Response {
    require_user!(fake, jar);
    let mut inner = fake.inner();
    let Some(order) = inner.orders.iter_mut().find(|o| o["id"].as_i64() == Some(id)) else {
        return error(StatusCode::NOT_FOUND, "Pedido não encontrado");
    };
    order["status"] = json!("Completed");
    Json(json!({ "message": "Status atualizado", "order": order.clone() })).into_response()
}

async fn sync_status(State(fake): Fake, jar: CookieJar) -> Response {
    require_user!(fake, jar);
    let mut inner = fake.inner();
    let mut updated = 0;
    for order in inner.orders.iter_mut() {
        if order["status"] != json!("Completed") {
            order["status"] = json!("Completed");
            updated += 1;
        }
    }
    Json(json!({ "message": format!("{} pedidos atualizados", updated) })).into_response()
}

// ========================================
// Pagamentos
// ========================================
async fn payments(State(fake): Fake, jar: CookieJar) -> Response {
    let user = require_user!(fake, jar);
    let list: Vec<Value> = fake
        .inner()
        .payments
        .iter()
        .filter(|p| p["user_id"].as_i64() == Some(user.id))
        .cloned()
        .collect();
    Json(Value::Array(list)).into_response()
}

async fn create_payment(State(fake): Fake, jar: CookieJar, Json(body): Json<Value>) -> Response {
    let user = require_user!(fake, jar);
    let amount = body["amount"].as_f64().unwrap_or_default();
    let mut inner = fake.inner();
    let id = inner.next_id();
    inner.payments.insert(
        0,
        json!({
            "id": id, "user_id": user.id, "amount": amount, "payment_id": "123456789",
            "status": "pending", "created_at": CREATED_AT, "updated_at": null
        }),
    );
    Json(json!({
        "payment_id": id,
        "mp_payment_id": 123456789,
        "amount": amount,
        "status": "pending",
        "pix_info": { "qr_code": PIX_CODE, "qr_code_base64": QR_BASE64, "ticket_url": null },
        "expires_at": null
    }))
    .into_response()
}

async fn check_payment(State(fake): Fake, jar: CookieJar, Path(id): Path<i64>) -> Response {
    let user = require_user!(fake, jar);
    let mut inner = fake.inner();
    let step = inner.check_script.pop_front().unwrap_or("pending");
    if step == "error" {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Erro ao verificar pagamento");
    }

    let Some(payment) = inner.payments.iter_mut().find(|p| p["id"].as_i64() == Some(id)) else {
        return error(StatusCode::NOT_FOUND, "Pagamento não encontrado");
    };
    let amount = payment["amount"].as_f64().unwrap_or_default();
    let credit = step == "approved" && payment["status"] != json!("approved");
    payment["status"] = json!(step);

    let balance = match inner.user_mut(user.id) {
        Some(stored) => {
            if credit {
                stored.balance += amount;
            }
            stored.balance
        }
        None => 0.0,
    };
    Json(json!({
        "payment_id": id, "status": step, "mp_status": step,
        "amount": amount, "user_balance": balance
    }))
    .into_response()
}

// ========================================
// Admin
// ========================================
async fn admin_config(State(fake): Fake, jar: CookieJar) -> Response {
    require_admin!(fake, jar);
    Json(json!(fake.inner().config.clone())).into_response()
}

async fn save_admin_config(
    State(fake): Fake,
    jar: CookieJar,
    Json(body): Json<BTreeMap<String, Option<String>>>,
) -> Response {
    require_admin!(fake, jar);
    fake.inner().config.extend(body);
    Json(json!({ "message": "Configurações atualizadas com sucesso" })).into_response()
}

async fn set_admin_config(
    State(fake): Fake,
    jar: CookieJar,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_admin!(fake, jar);
    let value = body["value"].as_str().map(String::from);
    fake.inner().config.insert(key.clone(), value);
    Json(json!({ "message": format!("Configuração {} atualizada com sucesso", key) }))
        .into_response()
}

async fn test_barato(State(fake): Fake, jar: CookieJar) -> Response {
    require_admin!(fake, jar);
    let configured = fake
        .inner()
        .config
        .get("barato_api_key")
        .is_some_and(|v| v.as_deref().is_some_and(|v| !v.is_empty()));
    if !configured {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Chave API não configurada" })),
        )
            .into_response();
    }
    Json(json!({
        "success": true, "message": "Conexão com BaratoSocial estabelecida", "balance": "123.45"
    }))
    .into_response()
}

async fn test_mercado_pago(State(fake): Fake, jar: CookieJar) -> Response {
    require_admin!(fake, jar);
    Json(json!({
        "success": true, "message": "Conexão com Mercado Pago estabelecida",
        "payment_methods_count": 12
    }))
    .into_response()
}

async fn users(State(fake): Fake, jar: CookieJar) -> Response {
    require_admin!(fake, jar);
    let users: Vec<Value> = fake.inner().users.iter().map(FakeUser::to_json).collect();
    Json(Value::Array(users)).into_response()
}

async fn admin_stats(State(fake): Fake, jar: CookieJar) -> Response {
    require_admin!(fake, jar);
    let inner = fake.inner();
    Json(json!({
        "total_users": inner.users.len(),
        "active_users": inner.users.len(),
        "total_orders": inner.orders.len(),
        "pending_orders": 2,
        "total_revenue": 16.95,
        "monthly_revenue": 16.95,
        "total_user_balance": inner.users.iter().map(|u| u.balance).sum::<f64>(),
        "pending_payments": inner.payments.iter().filter(|p| p["status"] == json!("pending")).count()
    }))
    .into_response()
}

async fn admin_payments(
    State(fake): Fake,
    jar: CookieJar,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    require_admin!(fake, jar);
    let list: Vec<Value> = fake
        .inner()
        .payments
        .iter()
        .filter(|p| match query.get("status") {
            Some(status) => p["status"].as_str() == Some(status.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    let page: u64 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "payments": list, "total": list.len(), "pages": 1, "current_page": page
    }))
    .into_response()
}

fn decide_payment(fake: &FakeBackend, id: i64, status: &str, message: &str) -> Response {
    let mut inner = fake.inner();
    let Some(payment) = inner.payments.iter_mut().find(|p| p["id"].as_i64() == Some(id)) else {
        return error(StatusCode::NOT_FOUND, "Pagamento não encontrado");
    };
    if payment["status"] != json!("pending") {
        return error(StatusCode::BAD_REQUEST, "Pagamento não está pendente");
    }
    payment["status"] = json!(status);
    let payment = payment.clone();

    let mut body = json!({ "message": message, "payment": payment });
    if status == "approved" {
        let owner = payment["user_id"].as_i64().unwrap_or_default();
        let amount = payment["amount"].as_f64().unwrap_or_default();
        if let Some(user) = inner.user_mut(owner) {
            user.balance += amount;
            body["user_new_balance"] = json!(user.balance);
        }
    }
    Json(body).into_response()
}

async fn approve_payment(State(fake): Fake, jar: CookieJar, Path(id): Path<i64>) -> Response {
    require_admin!(fake, jar);
    decide_payment(&fake, id, "approved", "Pagamento aprovado com sucesso")
}

async fn reject_payment(State(fake): Fake, jar: CookieJar, Path(id): Path<i64>) -> Response {
    require_admin!(fake, jar);
    decide_payment(&fake, id, "rejected", "Pagamento rejeitado")
}

async fn sync_services(State(fake): Fake, jar: CookieJar) -> Response {
    require_admin!(fake, jar);
    Json(json!({
        "message": "Serviços sincronizados com sucesso", "new_services": 3, "updated_services": 2
    }))
    .into_response()
}

async fn record(State(fake): Fake, req: Request, next: Next) -> Response {
    fake.inner()
        .requests
        .push(format!("{} {}", req.method(), req.uri().path()));
    next.run(req).await
}

// ========================================
// Servidor
// ========================================
pub async fn spawn_backend() -> (String, Arc<FakeBackend>) {
    let fake = Arc::new(FakeBackend::seeded());

    let api = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/profile", get(profile).put(update_profile))
        .route("/balance", get(balance))
        .route("/services", get(services))
        .route("/services/categories", get(categories))
        .route("/orders", get(orders).post(create_order))
        .route("/orders/sync-status", post(sync_status))
        .route("/orders/:id/status", post(order_status))
        .route("/payments", get(payments))
        .route("/payments/create-payment", post(create_payment))
        .route("/payments/check-payment/:id", get(check_payment))
        .route("/admin/config", get(admin_config).post(save_admin_config))
        .route("/admin/config/:key", axum::routing::put(set_admin_config))
        .route("/admin/test-barato-api", post(test_barato))
        .route("/admin/test-mercado-pago", post(test_mercado_pago))
        .route("/users", get(users))
        .route("/admin/dashboard-stats", get(admin_stats))
        .route("/admin/payments", get(admin_payments))
        .route("/admin/payments/:id/approve", post(approve_payment))
        .route("/admin/payments/:id/reject", post(reject_payment))
        .route("/admin/sync-services", post(sync_services));

    let app = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(fake.clone(), record))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fake backend");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend died");
    });

    (format!("http://{}/api", addr), fake)
}

pub fn test_config(api_url: &str) -> ClientConfig {
    ClientConfig {
        api_url: api_url.to_string(),
        request_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(50),
        poll_max_attempts: None,
        ..Default::default()
    }
}

pub fn client(api_url: &str) -> PanelClient {
    PanelClient::new(&test_config(api_url)).expect("failed to build client")
}

/// Painel com verificação rápida e toasts em memória
pub fn panel(api_url: &str, max_attempts: Option<u32>) -> (Panel, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let client = Arc::new(client(api_url));
    let settings = PollSettings {
        interval: Duration::from_millis(50),
        max_attempts,
    };
    (Panel::with_client(client, notifier.clone(), settings), notifier)
}
