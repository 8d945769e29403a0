use railbook_core::{Passenger, TrainInfo};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use crate::models::{Order, TicketLine};
use crate::repository::OrderRepository;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Please select at least one passenger")]
    NoPassengerSelected,

    #[error("Please complete the ticket information")]
    IncompleteTicketInfo,

    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    #[error("This order has already been submitted")]
    AlreadySubmitted,

    #[error("Order submission failed: {reason}")]
    SubmissionFailed { reason: String },
}

/// Check a selection before it becomes an order.
///
/// Every ticket line needs a non-blank name, and the lines must cover exactly
/// the selected passengers, one each.
pub fn validate_submission(passengers: &[Passenger], tickets: &[TicketLine]) -> Result<(), OrderError> {
    if passengers.is_empty() {
        return Err(OrderError::NoPassengerSelected);
    }

    if tickets.iter().any(|line| line.passenger_name.trim().is_empty()) {
        return Err(OrderError::IncompleteTicketInfo);
    }

    if tickets.len() != passengers.len() {
        return Err(OrderError::IncompleteTicketInfo);
    }

    let selected: HashSet<_> = passengers.iter().map(|p| &p.id).collect();
    let lined: HashSet<_> = tickets.iter().map(|line| &line.passenger_id).collect();
    if selected.len() != passengers.len() || selected != lined {
        return Err(OrderError::IncompleteTicketInfo);
    }

    Ok(())
}

/// Turns a validated selection into a stored order, one submission at a time.
///
/// A submitter is spent by its first successful submission; later attempts
/// fail with `AlreadySubmitted`.
pub struct OrderSubmitter {
    repository: Arc<dyn OrderRepository>,
    in_flight: AtomicBool,
    submitted: AtomicBool,
    timeout: Duration,
}

impl OrderSubmitter {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self::with_timeout(repository, DEFAULT_SUBMIT_TIMEOUT)
    }

    pub fn with_timeout(repository: Arc<dyn OrderRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            in_flight: AtomicBool::new(false),
            submitted: AtomicBool::new(false),
            timeout,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.load(Ordering::Acquire)
    }

    /// Claim the submitter. The claim holds the in-flight flag until the
    /// returned `Submission` completes or is dropped.
    pub fn begin(&self) -> Result<Submission<'_>, OrderError> {
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(OrderError::SubmissionInFlight)?;
        if self.is_submitted() {
            return Err(OrderError::AlreadySubmitted);
        }
        Ok(Submission { submitter: self, _guard: guard })
    }

    /// Validate, build and store an order.
    ///
    /// A second call while one is pending fails with `SubmissionInFlight`.
    /// The flag is cleared on every exit path, including a storage error or timeout.
    pub async fn submit(
        &self,
        train: &TrainInfo,
        passengers: &[Passenger],
        tickets: &[TicketLine],
    ) -> Result<Order, OrderError> {
        validate_submission(passengers, tickets)?;
        self.begin()?.store(train, passengers, tickets).await
    }
}

/// A claimed submitter, ready to store one order
pub struct Submission<'a> {
    submitter: &'a OrderSubmitter,
    _guard: InFlightGuard<'a>,
}

impl Submission<'_> {
    /// Store the order. On success the submitter is marked spent before the
    /// in-flight flag is released.
    pub async fn store(
        self,
        train: &TrainInfo,
        passengers: &[Passenger],
        tickets: &[TicketLine],
    ) -> Result<Order, OrderError> {
        validate_submission(passengers, tickets)?;

        let submitter = self.submitter;
        let order = Order::new(train, passengers, tickets);

        match tokio::time::timeout(submitter.timeout, submitter.repository.create_order(&order)).await {
            Ok(Ok(())) => {
                submitter.submitted.store(true, Ordering::Release);
                tracing::info!(
                    order_id = %order.order_id,
                    train_no = %order.train.train_no,
                    tickets = order.tickets.len(),
                    total_price = order.total_price,
                    "Order submitted"
                );
                Ok(order)
            }
            Ok(Err(e)) => {
                tracing::warn!(train_no = %train.train_no, "Order submission failed: {}", e);
                Err(OrderError::SubmissionFailed { reason: e.to_string() })
            }
            Err(_) => {
                tracing::warn!(train_no = %train.train_no, timeout = ?submitter.timeout, "Order submission timed out");
                Err(OrderError::SubmissionFailed {
                    reason: format!("timed out after {}s", submitter.timeout.as_secs()),
                })
            }
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
