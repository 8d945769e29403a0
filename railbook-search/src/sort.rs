use railbook_core::TrainInfo;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Departure,
    Arrival,
    Duration,
    TrainNo,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active column sort of the train list. Defaults to departure time ascending.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column header click: the same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn compare(&self, a: &TrainInfo, b: &TrainInfo) -> Ordering {
        let ordering = match self.key {
            SortKey::Departure => a.from_time.cmp(&b.from_time),
            SortKey::Arrival => a.to_time.cmp(&b.to_time),
            SortKey::Duration => parse_duration(&a.duration).cmp(&parse_duration(&b.duration)),
            SortKey::TrainNo => a.train_no.cmp(&b.train_no),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable in-place sort; equal keys keep their input order in both directions.
    pub fn sort(&self, trains: &mut [TrainInfo]) {
        trains.sort_by(|a, b| self.compare(a, b));
    }
}

/// Total minutes of a duration such as "4:30", "10:05" or "4小时30分".
/// Anything unparseable counts as 0.
pub fn parse_duration(duration: &str) -> u32 {
    let duration = duration.trim();

    if let Some((hours, minutes)) = duration.split_once(':') {
        return match (hours.trim().parse::<u32>(), minutes.trim().parse::<u32>()) {
            (Ok(h), Ok(m)) => to_minutes(h, m),
            _ => 0,
        };
    }

    if let Some((hours, rest)) = duration.split_once("小时") {
        let minutes = rest.trim_end_matches('分').trim();
        let minutes = if minutes.is_empty() { Ok(0) } else { minutes.parse::<u32>() };
        return match (hours.trim().parse::<u32>(), minutes) {
            (Ok(h), Ok(m)) => to_minutes(h, m),
            _ => 0,
        };
    }

    duration
        .strip_suffix('分')
        .and_then(|m| m.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Out-of-range values count as unparseable
fn to_minutes(hours: u32, minutes: u32) -> u32 {
    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .unwrap_or(0)
}
