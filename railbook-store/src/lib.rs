pub mod app_config;
pub mod order_repo;
pub mod train_repo;

pub use app_config::Config;
pub use order_repo::InMemoryOrderStore;
pub use train_repo::{seed_trains, InMemoryTrainRepository};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Duplicate order id: {0}")]
    DuplicateOrder(String),

    #[error("Unknown seat class in fare config: {0}")]
    UnknownSeatClass(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
