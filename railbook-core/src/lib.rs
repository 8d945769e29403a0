pub mod passenger;
pub mod train;
pub mod conditions;
pub mod repository;

pub use passenger::{FieldErrors, Passenger, PassengerClass, PassengerFields, PassengerId};
pub use train::{SeatInfoItem, SeatValue, TrainDetail, TrainInfo};
pub use conditions::{SearchConditions, SearchPassengerType, SearchTrainType};
pub use repository::TrainRepository;
