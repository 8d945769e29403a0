use railbook_catalog::SeatClass;
use railbook_core::TrainInfo;
use serde::{Deserialize, Serialize};
use crate::availability::{classify, SeatAvailability};

/// Value accepted by every list category meaning "any"
pub const ANY: &str = "all";

/// Multi-select categories of the filter panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    DepartureTime,
    TrainTypes,
    DepartureStations,
    ArrivalStations,
    SeatTypes,
}

/// Display-option checkboxes. Together they form one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DisplayToggle {
    DiscountTrains,
    PointsTrains,
    AllBookableTrains,
}

/// Filter panel state.
///
/// A train is kept when, for every non-empty category, it matches at least
/// one selected value: OR within a category, AND across categories. An empty
/// category is no constraint. Values a category does not understand never
/// match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// "HH:MM-HH:MM" windows on the departure time, end exclusive
    pub departure_time: Vec<String>,
    /// "all", letter groups such as "GC" or "D", "other", "smart"
    pub train_types: Vec<String>,
    /// "all", a station name or a station code
    pub departure_stations: Vec<String>,
    pub arrival_stations: Vec<String>,
    /// "all" or a seat filter key such as "second_class"
    pub seat_types: Vec<String>,
    pub show_discount_trains: bool,
    pub show_points_trains: bool,
    pub show_all_bookable_trains: bool,
}

impl FilterState {
    /// True when no category constrains the list
    pub fn is_empty(&self) -> bool {
        self.departure_time.is_empty()
            && self.train_types.is_empty()
            && self.departure_stations.is_empty()
            && self.arrival_stations.is_empty()
            && self.seat_types.is_empty()
            && self.enabled_toggles().is_empty()
    }

    pub fn values(&self, category: FilterCategory) -> &[String] {
        match category {
            FilterCategory::DepartureTime => &self.departure_time,
            FilterCategory::TrainTypes => &self.train_types,
            FilterCategory::DepartureStations => &self.departure_stations,
            FilterCategory::ArrivalStations => &self.arrival_stations,
            FilterCategory::SeatTypes => &self.seat_types,
        }
    }

    pub fn values_mut(&mut self, category: FilterCategory) -> &mut Vec<String> {
        match category {
            FilterCategory::DepartureTime => &mut self.departure_time,
            FilterCategory::TrainTypes => &mut self.train_types,
            FilterCategory::DepartureStations => &mut self.departure_stations,
            FilterCategory::ArrivalStations => &mut self.arrival_stations,
            FilterCategory::SeatTypes => &mut self.seat_types,
        }
    }

    pub fn toggle(&self, toggle: DisplayToggle) -> bool {
        match toggle {
            DisplayToggle::DiscountTrains => self.show_discount_trains,
            DisplayToggle::PointsTrains => self.show_points_trains,
            DisplayToggle::AllBookableTrains => self.show_all_bookable_trains,
        }
    }

    pub fn set_toggle(&mut self, toggle: DisplayToggle, enabled: bool) {
        match toggle {
            DisplayToggle::DiscountTrains => self.show_discount_trains = enabled,
            DisplayToggle::PointsTrains => self.show_points_trains = enabled,
            DisplayToggle::AllBookableTrains => self.show_all_bookable_trains = enabled,
        }
    }

    fn enabled_toggles(&self) -> Vec<DisplayToggle> {
        [
            DisplayToggle::DiscountTrains,
            DisplayToggle::PointsTrains,
            DisplayToggle::AllBookableTrains,
        ]
        .into_iter()
        .filter(|t| self.toggle(*t))
        .collect()
    }

    pub fn matches(&self, train: &TrainInfo) -> bool {
        any_or_empty(&self.departure_time, |v| departure_window_matches(v, &train.from_time))
            && any_or_empty(&self.train_types, |v| train_type_matches(v, &train.train_type))
            && any_or_empty(&self.departure_stations, |v| {
                station_matches(v, &train.from_station, train.from_station_code.as_deref())
            })
            && any_or_empty(&self.arrival_stations, |v| {
                station_matches(v, &train.to_station, train.to_station_code.as_deref())
            })
            && any_or_empty(&self.seat_types, |v| seat_type_matches(v, train))
            && self.display_options_match(train)
    }

    fn display_options_match(&self, train: &TrainInfo) -> bool {
        let toggles = self.enabled_toggles();
        toggles.is_empty()
            || toggles.into_iter().any(|toggle| match toggle {
                DisplayToggle::DiscountTrains => train.discounted,
                DisplayToggle::PointsTrains => train.points_redeemable,
                DisplayToggle::AllBookableTrains => train.can_book,
            })
    }
}

fn any_or_empty(values: &[String], matches: impl Fn(&str) -> bool) -> bool {
    values.is_empty() || values.iter().any(|v| matches(v.trim()))
}

fn departure_window_matches(window: &str, from_time: &str) -> bool {
    if window == ANY {
        return true;
    }
    match window.split_once('-') {
        // fixed-width HH:MM compares correctly as text
        Some((start, end)) => start.trim() <= from_time && from_time < end.trim(),
        None => false,
    }
}

fn train_type_matches(value: &str, train_type: &str) -> bool {
    let first = train_type.chars().next();
    match value {
        ANY => true,
        "other" => !matches!(first, Some('G' | 'C' | 'D' | 'Z' | 'T' | 'K')),
        "smart" => train_type.contains("智能"),
        letters if !letters.is_empty() && letters.chars().all(|c| c.is_ascii_uppercase()) => {
            first.is_some_and(|c| letters.contains(c))
        }
        _ => false,
    }
}

fn station_matches(value: &str, station: &str, code: Option<&str>) -> bool {
    value == ANY || value == station || code.is_some_and(|c| c.eq_ignore_ascii_case(value))
}

fn seat_type_matches(value: &str, train: &TrainInfo) -> bool {
    if value == ANY {
        return true;
    }
    match value.parse::<SeatClass>() {
        Ok(class) => classify(train.seat(&class)) != SeatAvailability::Unavailable,
        Err(_) => false,
    }
}
