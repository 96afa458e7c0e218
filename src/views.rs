use crate::engine::catalog::estimate_order_total;
use crate::engine::helpers::{format_brl, format_date, format_rate, status_slug, truncate_link};
use crate::engine::stats::DashboardStats;
use crate::models::{
    AdminConfig, AdminStats, Order, Payment, PaymentStatus, PendingPayment, Service, User,
};

const LINK_WIDTH: usize = 30;

/// Chaves de configuração exibidas mascaradas
const SECRET_KEYS: [&str; 4] = ["key", "token", "secret", "password"];

// ============================
// Usuário
// ============================
pub fn user_line(user: &User) -> String {
    let role = if user.is_admin { " (admin)" } else { "" };
    format!(
        "{}{} <{}> | Saldo: {}",
        user.username,
        role,
        user.email,
        format_brl(user.balance)
    )
}

// ============================
// Dashboard
// ============================
pub fn dashboard(stats: &DashboardStats, recent: &[Order]) -> String {
    let mut s = String::from("Dashboard\n");
    s.push_str(&format!("  Total de pedidos:   {}\n", stats.total_orders));
    s.push_str(&format!("  Pedidos pendentes:  {}\n", stats.pending_orders));
    s.push_str(&format!("  Pedidos concluídos: {}\n", stats.completed_orders));
    s.push_str(&format!("  Total gasto:        {}\n", format_brl(stats.total_spent)));
    s.push_str("\nPedidos recentes\n");
    if recent.is_empty() {
        s.push_str("  Nenhum pedido encontrado\n");
        return s;
    }
    for order in recent {
        s.push_str(&format!(
            "  #{} {} | {} | {}\n",
            order.id,
            order.service_name,
            format_brl(order.charge),
            order.status
        ));
    }
    s
}

// ============================
// Serviços
// ============================
pub fn services(services: &[&Service]) -> String {
    if services.is_empty() {
        return "Nenhum serviço encontrado\n".into();
    }
    let mut s = String::new();
    for svc in services {
        s.push_str(&format!(
            "[{}] {} | {} | min {} / max {} | {}\n",
            svc.service_id,
            svc.name,
            format_rate(svc.final_rate),
            svc.min,
            svc.max,
            svc.category.as_deref().unwrap_or("-")
        ));
        if let Some(desc) = svc.description.as_deref().filter(|d| !d.trim().is_empty()) {
            s.push_str(&format!("      {}\n", desc.trim()));
        }
    }
    s
}

pub fn order_estimate(service: &Service, quantity: i64) -> String {
    format!(
        "{} x {} = {}",
        quantity,
        format_rate(service.final_rate),
        format_brl(estimate_order_total(service.final_rate, quantity))
    )
}

// ============================
// Pedidos
// ============================
pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "Nenhum pedido encontrado\n".into();
    }
    let mut s = String::new();
    for order in orders {
        s.push_str(&format!(
            "#{} {} | {} | qtd {} | {} | [{}] | {}\n",
            order.id,
            order.service_name,
            truncate_link(&order.link, LINK_WIDTH),
            order.quantity,
            format_brl(order.charge),
            status_slug(&order.status),
            format_date(order.created_at)
        ));
    }
    s
}

// ============================
// Pagamentos
// ============================
pub fn payments(payments: &[Payment]) -> String {
    if payments.is_empty() {
        return "Nenhum pagamento encontrado\n".into();
    }
    let mut s = String::new();
    for p in payments {
        let owner = p
            .user_id
            .map(|id| format!(" | usuário {}", id))
            .unwrap_or_default();
        s.push_str(&format!(
            "#{} {} | {} | {}{}\n",
            p.id,
            format_brl(p.amount),
            p.status,
            format_date(p.created_at),
            owner
        ));
    }
    s
}

/// Conteúdo do modal PIX
pub fn payment_modal(payment: &PendingPayment, status: Option<&PaymentStatus>) -> String {
    let mut s = String::from("Pagamento PIX\n");
    s.push_str(&format!("Valor: {}\n", format_brl(payment.amount)));
    s.push_str(&format!("ID do Pagamento: {}\n\n", payment.payment_id));

    match payment.pix_info.as_ref().filter(|pix| pix.has_qr_code()) {
        Some(pix) => {
            s.push_str("Código PIX:\n");
            s.push_str(pix.qr_code.trim());
            s.push('\n');
            if !pix.ticket_url.is_empty() {
                s.push_str(&format!("Link: {}\n", pix.ticket_url));
            }
        }
        None => {
            s.push_str("Aguardando geração do código PIX...\n");
            s.push_str("O código PIX será gerado em alguns segundos.\n");
        }
    }

    s.push_str(&format!("\n{}\n", payment_status_line(status)));
    s
}

pub fn payment_status_line(status: Option<&PaymentStatus>) -> String {
    match status {
        Some(status) => format!("Status: {}", status),
        None => "Status: Aguardando pagamento...".into(),
    }
}

// ============================
// Admin
// ============================
pub fn admin_stats(stats: &AdminStats) -> String {
    let mut s = String::from("Estatísticas\n");
    s.push_str(&format!(
        "  Usuários:             {} ({} ativos)\n",
        stats.total_users, stats.active_users
    ));
    s.push_str(&format!(
        "  Pedidos:              {} ({} pendentes)\n",
        stats.total_orders, stats.pending_orders
    ));
    s.push_str(&format!("  Receita total:        {}\n", format_brl(stats.total_revenue)));
    s.push_str(&format!("  Receita do mês:       {}\n", format_brl(stats.monthly_revenue)));
    s.push_str(&format!(
        "  Saldo dos usuários:   {}\n",
        format_brl(stats.total_user_balance)
    ));
    s.push_str(&format!("  Pagamentos pendentes: {}\n", stats.pending_payments));
    s
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "Nenhum usuário encontrado\n".into();
    }
    users
        .iter()
        .map(|u| format!("#{} {} | {}\n", u.id, user_line(u), format_date(u.created_at)))
        .collect()
}

fn is_secret(key: &str) -> bool {
    let key = key.to_lowercase();
    SECRET_KEYS.iter().any(|s| key.contains(s))
}

/// Mostra só os 4 últimos caracteres de chaves e tokens
fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= 4 {
        return "****".into();
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

pub fn admin_config(config: &AdminConfig) -> String {
    if config.is_empty() {
        return "Nenhuma configuração cadastrada\n".into();
    }
    let mut s = String::new();
    for (key, value) in config {
        let shown = match value.as_deref() {
            None | Some("") => "-".to_string(),
            Some(v) if is_secret(key) => mask(v),
            Some(v) => v.to_string(),
        };
        s.push_str(&format!("{} = {}\n", key, shown));
    }
    s
}
