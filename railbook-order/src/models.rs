use chrono::{DateTime, Utc};
use rand::Rng;
use railbook_catalog::SeatClass;
use railbook_core::{Passenger, PassengerClass, PassengerId, TrainInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orders are priced in whole yuan
pub const CURRENCY: &str = "CNY";

const ORDER_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ORDER_SUFFIX_LEN: usize = 9;

/// Ticket type printed on a ticket, fixed from the passenger class at selection time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketType {
    #[serde(rename = "Adult ticket")]
    Adult,
    #[serde(rename = "Child ticket")]
    Child,
    #[serde(rename = "Student ticket")]
    Student,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Adult => "Adult ticket",
            TicketType::Child => "Child ticket",
            TicketType::Student => "Student ticket",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketType::Adult => "成人票",
            TicketType::Child => "儿童票",
            TicketType::Student => "学生票",
        }
    }
}

impl From<PassengerClass> for TicketType {
    fn from(class: PassengerClass) -> Self {
        match class {
            PassengerClass::Adult => TicketType::Adult,
            PassengerClass::Child => TicketType::Child,
            PassengerClass::Student => TicketType::Student,
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One passenger's priced booking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLine {
    pub passenger_id: PassengerId,
    /// Snapshot taken at selection time
    pub passenger_name: String,
    pub seat_class: SeatClass,
    pub ticket_type: TicketType,
    pub price: i32,
}

/// `ORDER_<unix millis>_<9 base-36 chars>`.
///
/// The random suffix makes two orders submitted in the same millisecond
/// collide with probability 36^-9; ids are not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn generate(at: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ORDER_SUFFIX_LEN)
            .map(|_| ORDER_SUFFIX_ALPHABET[rng.gen_range(0..ORDER_SUFFIX_ALPHABET.len())] as char)
            .collect();

        Self(format!("ORDER_{}_{}", at.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A submitted purchase. Owns deep copies of everything it refers to, so later
/// changes to the passenger registry never reach a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub train: TrainInfo,
    pub passengers: Vec<Passenger>,
    pub tickets: Vec<TicketLine>,
    pub total_price: i32,
    pub currency: String,
    pub submitted_at: DateTime<Utc>,
}

impl Order {
    pub fn new(train: &TrainInfo, passengers: &[Passenger], tickets: &[TicketLine]) -> Self {
        let now = Utc::now();
        Self {
            order_id: OrderId::generate(now),
            train: train.clone(),
            passengers: passengers.to_vec(),
            tickets: tickets.to_vec(),
            total_price: total_price(tickets),
            currency: CURRENCY.to_string(),
            submitted_at: now,
        }
    }
}

/// Sum of line prices; 0 for no lines
pub fn total_price(tickets: &[TicketLine]) -> i32 {
    tickets.iter().map(|line| line.price).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ticket_type_from_class() {
        assert_eq!(TicketType::from(PassengerClass::Adult), TicketType::Adult);
        assert_eq!(TicketType::from(PassengerClass::Child).as_str(), "Child ticket");
        assert_eq!(TicketType::from(PassengerClass::Student).label(), "学生票");
        assert_eq!(serde_json::to_string(&TicketType::Adult).unwrap(), "\"Adult ticket\"");
    }

    #[test]
    fn test_order_id_format() {
        let at = Utc.timestamp_millis_opt(1_737_331_200_000).unwrap();
        let id = OrderId::generate(at);

        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ORDER");
        assert_eq!(parts[1], "1737331200000");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_order_ids_differ_within_one_millisecond() {
        let at = Utc::now();
        let ids: std::collections::HashSet<OrderId> = (0..100).map(|_| OrderId::generate(at)).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(&[]), 0);

        let line = |price| TicketLine {
            passenger_id: PassengerId::from("1"),
            passenger_name: "张三".to_string(),
            seat_class: SeatClass::SecondClass,
            ticket_type: TicketType::Adult,
            price,
        };
        assert_eq!(total_price(&[line(553), line(933)]), 1486);
    }
}
