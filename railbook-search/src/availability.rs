use railbook_catalog::SeatClass;
use railbook_core::{SeatValue, TrainInfo};
use serde::{Deserialize, Serialize};

/// Markers meaning "sold out, waitlist open"
pub const WAITLIST_MARKERS: [&str; 3] = ["候补", "waitlist", "waitlisted"];

/// How a seat-map cell is presented. Consumers use this instead of
/// inspecting [`SeatValue`] themselves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeatAvailability {
    Unavailable,
    Available,
    Waitlisted,
}

/// Classify a raw seat value.
///
/// Absent, zero, negative and blank values are unavailable. The waitlist
/// markers map to `Waitlisted`; "有"/"available" and any other positive count
/// or non-blank text are an available count/marker.
pub fn classify(value: Option<&SeatValue>) -> SeatAvailability {
    match value {
        None => SeatAvailability::Unavailable,
        Some(SeatValue::Count(n)) if *n > 0 => SeatAvailability::Available,
        Some(SeatValue::Count(_)) => SeatAvailability::Unavailable,
        Some(SeatValue::Marker(text)) => {
            let text = text.trim();
            if text.is_empty() || text == "0" {
                SeatAvailability::Unavailable
            } else if WAITLIST_MARKERS.contains(&text) {
                SeatAvailability::Waitlisted
            } else {
                SeatAvailability::Available
            }
        }
    }
}

/// Rendered seat-map cell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatCell {
    pub seat_class: SeatClass,
    pub availability: SeatAvailability,
    pub text: String,
}

pub fn seat_cell(train: &TrainInfo, seat_class: SeatClass) -> SeatCell {
    let value = train.seat(&seat_class);
    let availability = classify(value);

    let text = match (availability, value) {
        (SeatAvailability::Unavailable, _) | (_, None) => "--".to_string(),
        (_, Some(SeatValue::Count(n))) => n.to_string(),
        (_, Some(SeatValue::Marker(text))) => text.trim().to_string(),
    };

    SeatCell {
        seat_class,
        availability,
        text,
    }
}

/// One cell per seat-class column, in column order
pub fn seat_cells(train: &TrainInfo) -> Vec<SeatCell> {
    SeatClass::ALL
        .into_iter()
        .map(|class| seat_cell(train, class))
        .collect()
}

/// Badge colour group of a train, derived from the leading letter of its type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrainCategory {
    HighSpeed,
    Emu,
    Direct,
    Express,
    Fast,
    Other,
}

impl TrainCategory {
    pub fn of(train_type: &str) -> Self {
        match train_type.chars().next() {
            Some('G') | Some('C') => TrainCategory::HighSpeed,
            Some('D') => TrainCategory::Emu,
            Some('Z') => TrainCategory::Direct,
            Some('T') => TrainCategory::Express,
            Some('K') => TrainCategory::Fast,
            _ => TrainCategory::Other,
        }
    }
}
