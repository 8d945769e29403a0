use railbook_catalog::SeatClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw seat-map cell: a remaining-seat count or a text marker such as "有" or "候补".
/// A missing key or JSON `null` means the seat class is not sold on this train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeatValue {
    Count(i64),
    Marker(String),
}

/// One row of a train search result. Never mutated by the list engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainInfo {
    pub train_no: String,
    pub train_type: String,
    pub from_station: String,
    pub to_station: String,
    #[serde(default)]
    pub from_station_code: Option<String>,
    #[serde(default)]
    pub to_station_code: Option<String>,
    /// HH:MM, zero padded
    pub from_time: String,
    /// HH:MM, zero padded
    pub to_time: String,
    /// H:MM or HH:MM
    pub duration: String,
    #[serde(default)]
    pub seats: BTreeMap<SeatClass, Option<SeatValue>>,
    pub can_book: bool,
    pub is_high_speed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub discounted: bool,
    #[serde(default)]
    pub points_redeemable: bool,
}

impl TrainInfo {
    pub fn seat(&self, seat_class: &SeatClass) -> Option<&SeatValue> {
        self.seats.get(seat_class).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatInfoItem {
    pub total_seats: u32,
    pub available_seats: u32,
    pub price: i32,
    pub is_available: bool,
}

/// Train detail served by `GET /trains/{trainNumber}?date=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainDetail {
    pub train_number: String,
    pub train_type: String,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub seat_info: BTreeMap<SeatClass, SeatInfoItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_info_deserialization() {
        let json = r#"
            {
                "trainNo": "G1",
                "trainType": "G",
                "fromStation": "北京南",
                "toStation": "上海虹桥",
                "fromStationCode": "VNP",
                "fromTime": "09:00",
                "toTime": "13:28",
                "duration": "4:28",
                "seats": {
                    "business": 5,
                    "firstClass": "有",
                    "secondClass": "候补",
                    "noSeat": null
                },
                "canBook": true,
                "isHighSpeed": true
            }
        "#;
        let train: TrainInfo = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(train.train_no, "G1");
        assert_eq!(train.from_station_code.as_deref(), Some("VNP"));
        assert_eq!(train.to_station_code, None);
        assert_eq!(train.seat(&SeatClass::Business), Some(&SeatValue::Count(5)));
        assert_eq!(train.seat(&SeatClass::FirstClass), Some(&SeatValue::Marker("有".to_string())));
        assert_eq!(train.seat(&SeatClass::NoSeat), None);
        assert_eq!(train.seat(&SeatClass::HardSeat), None);
        assert!(!train.discounted);
        assert_eq!(train.remarks, None);
    }

    #[test]
    fn test_train_detail_round_trip_keys() {
        let json = r#"
            {
                "trainNumber": "G1",
                "trainType": "G",
                "fromStation": "北京南",
                "toStation": "上海虹桥",
                "departureTime": "09:00",
                "arrivalTime": "13:28",
                "duration": "4:28",
                "seatInfo": {
                    "secondClass": { "totalSeats": 500, "availableSeats": 12, "price": 553, "isAvailable": true }
                }
            }
        "#;
        let detail: TrainDetail = serde_json::from_str(json).expect("Failed to deserialize");
        let second = &detail.seat_info[&SeatClass::SecondClass];

        assert_eq!(second.available_seats, 12);
        assert_eq!(second.price, 553);

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["seatInfo"]["secondClass"]["totalSeats"], 500);
    }
}
