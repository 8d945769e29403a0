use railbook_catalog::{FareTable, SeatClass};
use railbook_core::{Passenger, PassengerId, TrainInfo};
use serde::{Deserialize, Serialize};
use crate::models::{total_price, TicketLine, TicketType};
use crate::registry::PassengerRegistry;

/// User actions on the passenger picker and the ticket table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComposerEvent {
    #[serde(rename_all = "camelCase")]
    Select { passenger_id: PassengerId },
    #[serde(rename_all = "camelCase")]
    Deselect { passenger_id: PassengerId },
    #[serde(rename_all = "camelCase")]
    ChangeSeatClass { passenger_id: PassengerId, seat_class: SeatClass },
}

/// Derives the ticket lines of an order from the passenger selection.
///
/// Selected passengers and ticket lines are kept in lock-step: position `i`
/// of one belongs to position `i` of the other, so there is always exactly
/// one line per selected passenger. Both hold value copies taken at
/// selection time.
#[derive(Debug, Clone)]
pub struct TicketComposer {
    train: TrainInfo,
    shown_seat_class: SeatClass,
    fares: FareTable,
    selected: Vec<Passenger>,
    lines: Vec<TicketLine>,
}

impl TicketComposer {
    /// `shown_seat_class` is the seat class the train was chosen with; new lines start there.
    pub fn new(train: TrainInfo, shown_seat_class: SeatClass, fares: FareTable) -> Self {
        Self {
            train,
            shown_seat_class,
            fares,
            selected: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Apply one event. A failed event leaves the state unchanged.
    pub fn apply(&mut self, passengers: &PassengerRegistry, event: ComposerEvent) -> Result<(), ComposeError> {
        match event {
            ComposerEvent::Select { passenger_id } => self.select(passengers, &passenger_id),
            ComposerEvent::Deselect { passenger_id } => {
                self.deselect(&passenger_id);
                Ok(())
            }
            ComposerEvent::ChangeSeatClass { passenger_id, seat_class } => {
                self.change_seat_class(&passenger_id, seat_class)
            }
        }
    }

    /// Select a passenger. Selecting an already selected passenger is a no-op.
    pub fn select(&mut self, passengers: &PassengerRegistry, passenger_id: &PassengerId) -> Result<(), ComposeError> {
        if self.is_selected(passenger_id) {
            return Ok(());
        }

        let passenger = passengers
            .get(passenger_id)
            .ok_or_else(|| ComposeError::UnknownPassenger(passenger_id.clone()))?;

        self.lines.push(TicketLine {
            passenger_id: passenger.id.clone(),
            passenger_name: passenger.name.clone(),
            seat_class: self.shown_seat_class,
            ticket_type: TicketType::from(passenger.passenger_class),
            price: self.fares.price_of(&self.shown_seat_class),
        });
        self.selected.push(passenger.clone());
        Ok(())
    }

    /// Drop a passenger and its line. Returns whether it was selected.
    pub fn deselect(&mut self, passenger_id: &PassengerId) -> bool {
        match self.position(passenger_id) {
            Some(index) => {
                self.selected.remove(index);
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Re-seat one selected passenger and re-price only that line
    pub fn change_seat_class(&mut self, passenger_id: &PassengerId, seat_class: SeatClass) -> Result<(), ComposeError> {
        let index = self
            .position(passenger_id)
            .ok_or_else(|| ComposeError::NotSelected(passenger_id.clone()))?;

        let line = &mut self.lines[index];
        line.seat_class = seat_class;
        line.price = self.fares.price_of(&seat_class);
        Ok(())
    }

    pub fn is_selected(&self, passenger_id: &PassengerId) -> bool {
        self.position(passenger_id).is_some()
    }

    pub fn lines(&self) -> &[TicketLine] {
        &self.lines
    }

    /// Snapshots of the selected passengers, in selection order
    pub fn selected_passengers(&self) -> &[Passenger] {
        &self.selected
    }

    pub fn total_price(&self) -> i32 {
        total_price(&self.lines)
    }

    pub fn train(&self) -> &TrainInfo {
        &self.train
    }

    pub fn shown_seat_class(&self) -> SeatClass {
        self.shown_seat_class
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    fn position(&self, passenger_id: &PassengerId) -> Option<usize> {
        self.selected.iter().position(|p| &p.id == passenger_id)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Passenger not found: {0}")]
    UnknownPassenger(PassengerId),

    #[error("Passenger not selected: {0}")]
    NotSelected(PassengerId),
}
