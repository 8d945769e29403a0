pub mod availability;
pub mod filter;
pub mod sort;
pub mod view;
pub mod controller;

pub use availability::{classify, seat_cell, seat_cells, SeatAvailability, SeatCell, TrainCategory};
pub use filter::{DisplayToggle, FilterCategory, FilterState};
pub use sort::{parse_duration, SortDirection, SortKey, SortState};
pub use view::{filter_trains, view};
pub use controller::{NoopListener, TrainListController, TrainListListener};
