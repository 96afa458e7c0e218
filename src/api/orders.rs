use super::PanelClient;
use crate::error::Result;
use crate::models::{MessageResponse, Order, OrderCreated, OrderRequest, OrderStatusUpdate, OrdersPage};

impl PanelClient {
    pub async fn orders(&self, page: Option<u32>, per_page: Option<u32>) -> Result<OrdersPage> {
        let mut query: Vec<(&str, u32)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page));
        }
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page));
        }
        self.perform_get_query("/orders", &query).await
    }

    pub async fn order(&self, order_id: i64) -> Result<Order> {
        self.perform_get(&format!("/orders/{}", order_id)).await
    }

    pub async fn create_order(&self, request: &OrderRequest) -> Result<OrderCreated> {
        self.perform_post("/orders", request).await
    }

    /// Consulta o status no provedor e atualiza o pedido
    pub async fn refresh_order_status(&self, order_id: i64) -> Result<OrderStatusUpdate> {
        self.perform_post_empty(&format!("/orders/{}/status", order_id))
            .await
    }

    /// Sincroniza todos os pedidos pendentes de uma vez
    pub async fn sync_orders_status(&self) -> Result<MessageResponse> {
        self.perform_post_empty("/orders/sync-status").await
    }
}
