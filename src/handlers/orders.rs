use tracing::{debug, info};

use super::Panel;
use crate::engine::catalog;
use crate::error::{PanelError, Result};
use crate::models::{Order, OrderRequest};

pub const ORDERS_PER_PAGE: u32 = 20;

impl Panel {
    // ========================================
    // Serviços
    // ========================================
    pub async fn load_services(&mut self) -> Result<usize> {
        let services = self.report(self.client.services().await, "Erro ao carregar serviços")?;
        let categories = self.report(
            self.client.categories().await,
            "Erro ao carregar serviços",
        )?;

        let total = services.len();
        self.state.replace_services(services);
        self.state.replace_categories(categories);
        Ok(total)
    }

    // ========================================
    // Pedidos
    // ========================================
    pub async fn load_orders(&mut self, page: Option<u32>) -> Result<usize> {
        let page = self.report(
            self.client.orders(page, Some(ORDERS_PER_PAGE)).await,
            "Erro ao carregar pedidos",
        )?;
        let total = page.orders.len();
        self.state.replace_orders(page.orders);
        Ok(total)
    }

    /// Valida localmente, cria o pedido e recarrega saldo e lista
    pub async fn create_order(&mut self, request: OrderRequest) -> Result<Order> {
        let checked = self.validate_order(&request);
        self.report(checked, "Erro ao criar pedido")?;

        let created = self.report(
            self.client.create_order(&request).await,
            "Erro ao criar pedido",
        )?;
        info!(
            order_id = created.order.id,
            service_id = request.service_id,
            "Painel: pedido criado"
        );
        self.success("Pedido criado com sucesso!");

        match created.remaining_balance {
            Some(balance) => self.state.set_balance(balance),
            None => {
                if let Err(e) = self.refresh_balance().await {
                    debug!("Painel: saldo não atualizado após pedido ({})", e);
                }
            }
        }
        self.reload_orders().await;
        Ok(created.order)
    }

    fn validate_order(&self, request: &OrderRequest) -> Result<()> {
        // Sem catálogo carregado a validação fica com o backend
        if self.state.services.is_empty() {
            return Ok(());
        }
        let service = catalog::find_service(&self.state.services, request.service_id)
            .ok_or_else(|| PanelError::Validation("Serviço não encontrado".into()))?;
        catalog::validate_order(request, service).map_err(PanelError::Validation)
    }

    pub async fn refresh_order_status(&mut self, order_id: i64) -> Result<Order> {
        let update = self.report(
            self.client.refresh_order_status(order_id).await,
            "Erro ao atualizar status",
        )?;
        self.success("Status atualizado");
        self.reload_orders().await;
        Ok(update.order)
    }

    pub async fn sync_orders(&mut self) -> Result<()> {
        let synced = self.report(
            self.client.sync_orders_status().await,
            "Erro ao sincronizar status",
        )?;
        self.success(
            synced
                .message
                .unwrap_or_else(|| "Status sincronizados".into()),
        );
        self.reload_orders().await;
        Ok(())
    }

    /// Recarga depois de uma ação já concluída; a falha só vira toast
    async fn reload_orders(&mut self) {
        if let Err(e) = self.load_orders(None).await {
            debug!("Painel: lista de pedidos não recarregada ({})", e);
        }
    }
}
