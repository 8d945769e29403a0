use async_trait::async_trait;
use railbook_order::{Order, OrderId, OrderRepository};
use tokio::sync::RwLock;
use crate::StoreError;

/// Order storage kept in process memory, in submission order
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn create_order(&self, order: &Order) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(Box::new(StoreError::DuplicateOrder(order.order_id.to_string())));
        }

        orders.push(order.clone());
        tracing::debug!(order_id = %order.order_id, stored = orders.len(), "Order stored");
        Ok(())
    }

    async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| &o.order_id == order_id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.orders.read().await.clone())
    }
}
