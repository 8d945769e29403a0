pub mod models;
pub mod registry;
pub mod composer;
pub mod repository;
pub mod submitter;

pub use models::{total_price, Order, OrderId, TicketLine, TicketType, CURRENCY};
pub use registry::{PassengerRegistry, RegistryError};
pub use composer::{ComposeError, ComposerEvent, TicketComposer};
pub use repository::OrderRepository;
pub use submitter::{validate_submission, OrderError, OrderSubmitter, Submission, DEFAULT_SUBMIT_TIMEOUT};
