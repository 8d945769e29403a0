pub mod seat;
pub mod fare;

pub use seat::{SeatClass, SeatClassParseError};
pub use fare::{FareTable, DEFAULT_FARE};
