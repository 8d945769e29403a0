use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::train::TrainInfo;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchPassengerType {
    #[default]
    Adult,
    Student,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchTrainType {
    #[default]
    All,
    HighSpeed,
}

/// Query bar state: route, date and the coarse passenger/train type toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConditions {
    pub from_station: String,
    pub to_station: String,
    pub depart_date: NaiveDate,
    #[serde(default)]
    pub passenger_type: SearchPassengerType,
    #[serde(default)]
    pub train_type: SearchTrainType,
}

impl SearchConditions {
    pub fn new(from_station: impl Into<String>, to_station: impl Into<String>, depart_date: NaiveDate) -> Self {
        Self {
            from_station: from_station.into(),
            to_station: to_station.into(),
            depart_date,
            passenger_type: SearchPassengerType::Adult,
            train_type: SearchTrainType::All,
        }
    }

    pub fn swap_stations(&mut self) {
        std::mem::swap(&mut self.from_station, &mut self.to_station);
    }

    /// Whether a train serves this route and train type.
    ///
    /// Stations match by exact name or by prefix of the station name, so a
    /// city-level query ("上海") matches "上海虹桥". An empty station matches any.
    pub fn matches(&self, train: &TrainInfo) -> bool {
        let station_matches = |query: &str, station: &str| {
            let query = query.trim();
            query.is_empty() || station.starts_with(query)
        };

        station_matches(&self.from_station, &train.from_station)
            && station_matches(&self.to_station, &train.to_station)
            && (self.train_type == SearchTrainType::All || train.is_high_speed)
    }
}
