pub mod errors;

pub use errors::{handle_panic, redact_internal_errors, GENERIC_ERROR_MESSAGE};
