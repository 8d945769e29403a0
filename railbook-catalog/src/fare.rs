use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::seat::SeatClass;

/// Fare charged for a seat class that has no entry of its own.
pub const DEFAULT_FARE: i32 = 553;

/// Static seat class -> unit price lookup (whole yuan).
///
/// Pricing is best-effort: a seat class that is not listed, or a key that
/// does not name a seat class at all, is charged the default fare instead of
/// failing. Callers relying on an exact fare should check [`FareTable::is_listed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareTable {
    prices: BTreeMap<SeatClass, i32>,
    default_fare: i32,
}

impl Default for FareTable {
    fn default() -> Self {
        let mut prices = BTreeMap::new();
        prices.insert(SeatClass::Business, 1748);
        prices.insert(SeatClass::FirstClass, 933);
        prices.insert(SeatClass::SecondClass, 553);
        prices.insert(SeatClass::NoSeat, 553);

        Self {
            prices,
            default_fare: DEFAULT_FARE,
        }
    }
}

impl FareTable {
    pub fn new(prices: BTreeMap<SeatClass, i32>, default_fare: i32) -> Self {
        Self { prices, default_fare }
    }

    /// Unit price for a seat class, falling back to the default fare
    pub fn price_of(&self, seat_class: &SeatClass) -> i32 {
        self.prices
            .get(seat_class)
            .copied()
            .unwrap_or(self.default_fare)
    }

    /// Unit price for a seat class given by key or label.
    /// Unparseable keys are charged the default fare.
    pub fn price_of_key(&self, key: &str) -> i32 {
        key.parse::<SeatClass>()
            .map(|class| self.price_of(&class))
            .unwrap_or(self.default_fare)
    }

    pub fn default_fare(&self) -> i32 {
        self.default_fare
    }

    pub fn is_listed(&self, seat_class: &SeatClass) -> bool {
        self.prices.contains_key(seat_class)
    }

    /// Seat classes with an explicit fare, in train-list column order
    pub fn listed(&self) -> impl Iterator<Item = (SeatClass, i32)> + '_ {
        self.prices.iter().map(|(class, price)| (*class, *price))
    }

    /// Override or add the fare of one seat class
    pub fn with_price(mut self, seat_class: SeatClass, price: i32) -> Self {
        self.prices.insert(seat_class, price);
        self
    }
}
