use crate::engine::stats::{self, DashboardStats};
use crate::models::{Order, Service, User};

/// Estado em memória do painel: usuário logado e caches das páginas.
///
/// Cada recarga substitui o cache inteiro; não há mescla parcial.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub user: Option<User>,
    pub services: Vec<Service>,
    pub categories: Vec<String>,
    pub orders: Vec<Order>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn balance(&self) -> Option<f64> {
        self.user.as_ref().map(|u| u.balance)
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn set_balance(&mut self, balance: f64) {
        if let Some(user) = self.user.as_mut() {
            user.balance = balance;
        }
    }

    pub fn replace_services(&mut self, services: Vec<Service>) {
        self.services = services;
    }

    pub fn replace_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub fn replace_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        stats::dashboard_stats(&self.orders)
    }

    /// Logout: descarta usuário e caches
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
