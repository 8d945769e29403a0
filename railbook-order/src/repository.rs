use async_trait::async_trait;
use crate::models::{Order, OrderId};

/// Storage for submitted orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a freshly submitted order
    async fn create_order(&self, order: &Order) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>>;

    /// All orders, oldest first
    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>>;
}
