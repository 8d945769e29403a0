use async_trait::async_trait;
use chrono::NaiveDate;
use crate::conditions::SearchConditions;
use crate::train::{TrainDetail, TrainInfo};

/// Repository trait for train data access
#[async_trait]
pub trait TrainRepository: Send + Sync {
    /// Trains matching a search, in repository order (the list engine sorts)
    async fn search_trains(
        &self,
        conditions: &SearchConditions,
    ) -> Result<Vec<TrainInfo>, Box<dyn std::error::Error + Send + Sync>>;

    /// Seat and fare detail of one train on one date
    async fn get_train_detail(
        &self,
        train_number: &str,
        date: NaiveDate,
    ) -> Result<Option<TrainDetail>, Box<dyn std::error::Error + Send + Sync>>;
}
