use crate::models::Order;

/// Status considerados "em andamento" pelo provedor
pub const PENDING_ORDER_STATUSES: [&str; 3] = ["Pending", "In progress", "Processing"];
pub const COMPLETED_ORDER_STATUS: &str = "Completed";
pub const RECENT_ORDERS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub total_spent: f64,
}

pub fn is_pending_status(status: &str) -> bool {
    PENDING_ORDER_STATUSES.contains(&status)
}

pub fn dashboard_stats(orders: &[Order]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_orders: orders.len(),
        ..Default::default()
    };
    for order in orders {
        if is_pending_status(&order.status) {
            stats.pending_orders += 1;
        } else if order.status == COMPLETED_ORDER_STATUS {
            stats.completed_orders += 1;
        }
        stats.total_spent += order.charge;
    }
    stats
}

/// Pedidos já chegam ordenados do mais novo para o mais antigo
pub fn recent_orders(orders: &[Order]) -> &[Order] {
    &orders[..orders.len().min(RECENT_ORDERS_LIMIT)]
}
