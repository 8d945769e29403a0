use async_trait::async_trait;
use chrono::NaiveDate;
use railbook_catalog::{FareTable, SeatClass};
use railbook_core::{SearchConditions, SeatInfoItem, SeatValue, TrainDetail, TrainInfo, TrainRepository};
use std::collections::BTreeMap;

/// Timetable held in memory. Every train runs daily, so the date only
/// matters to callers.
pub struct InMemoryTrainRepository {
    trains: Vec<TrainInfo>,
    fares: FareTable,
}

impl InMemoryTrainRepository {
    pub fn new(trains: Vec<TrainInfo>, fares: FareTable) -> Self {
        Self { trains, fares }
    }

    pub fn seeded(fares: FareTable) -> Self {
        Self::new(seed_trains(), fares)
    }

    pub fn trains(&self) -> &[TrainInfo] {
        &self.trains
    }

    fn detail_of(&self, train: &TrainInfo) -> TrainDetail {
        let seat_info = train
            .seats
            .iter()
            .filter_map(|(class, value)| value.as_ref().map(|v| (*class, v)))
            .map(|(class, value)| {
                let total_seats = capacity(class);
                let available_seats = match value {
                    SeatValue::Count(n) => (*n).clamp(0, i64::from(total_seats)) as u32,
                    SeatValue::Marker(m) if m == "有" => total_seats,
                    SeatValue::Marker(_) => 0,
                };
                let item = SeatInfoItem {
                    total_seats,
                    available_seats,
                    price: self.fares.price_of(&class),
                    is_available: available_seats > 0,
                };
                (class, item)
            })
            .collect();

        TrainDetail {
            train_number: train.train_no.clone(),
            train_type: train.train_type.clone(),
            from_station: train.from_station.clone(),
            to_station: train.to_station.clone(),
            departure_time: train.from_time.clone(),
            arrival_time: train.to_time.clone(),
            duration: train.duration.clone(),
            seat_info,
        }
    }
}

#[async_trait]
impl TrainRepository for InMemoryTrainRepository {
    async fn search_trains(
        &self,
        conditions: &SearchConditions,
    ) -> Result<Vec<TrainInfo>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .trains
            .iter()
            .filter(|train| conditions.matches(train))
            .cloned()
            .collect())
    }

    async fn get_train_detail(
        &self,
        train_number: &str,
        _date: NaiveDate,
    ) -> Result<Option<TrainDetail>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .trains
            .iter()
            .find(|train| train.train_no.eq_ignore_ascii_case(train_number))
            .map(|train| self.detail_of(train)))
    }
}

/// Seats per class on one train
fn capacity(class: SeatClass) -> u32 {
    match class {
        SeatClass::Business | SeatClass::FirstClassPlus => 10,
        SeatClass::FirstClassPremium | SeatClass::SecondClassPackage => 20,
        SeatClass::FirstClass => 50,
        SeatClass::SecondClass => 500,
        SeatClass::PremiumSleeper | SeatClass::FirstSleeper => 24,
        SeatClass::SoftSleeper | SeatClass::SecondSleeper => 60,
        SeatClass::HardSleeper => 120,
        SeatClass::SoftSeat => 80,
        SeatClass::HardSeat => 200,
        SeatClass::NoSeat | SeatClass::Other => 100,
    }
}

struct Seed<'a> {
    train_no: &'a str,
    train_type: &'a str,
    from: (&'a str, &'a str),
    to: (&'a str, &'a str),
    times: (&'a str, &'a str, &'a str),
    seats: &'a [(SeatClass, Option<SeatValue>)],
    high_speed: bool,
}

impl Seed<'_> {
    fn build(&self) -> TrainInfo {
        let seats: BTreeMap<SeatClass, Option<SeatValue>> = self.seats.iter().cloned().collect();
        let can_book = seats.values().flatten().any(|v| match v {
            SeatValue::Count(n) => *n > 0,
            SeatValue::Marker(m) => !m.is_empty() && m != "0",
        });

        TrainInfo {
            train_no: self.train_no.to_string(),
            train_type: self.train_type.to_string(),
            from_station: self.from.0.to_string(),
            to_station: self.to.0.to_string(),
            from_station_code: Some(self.from.1.to_string()),
            to_station_code: Some(self.to.1.to_string()),
            from_time: self.times.0.to_string(),
            to_time: self.times.1.to_string(),
            duration: self.times.2.to_string(),
            seats,
            can_book,
            is_high_speed: self.high_speed,
            remarks: None,
            discounted: false,
            points_redeemable: false,
        }
    }
}

/// Beijing - Shanghai development timetable
pub fn seed_trains() -> Vec<TrainInfo> {
    use SeatClass::*;
    let count = |n: i64| Some(SeatValue::Count(n));
    let marker = |m: &str| Some(SeatValue::Marker(m.to_string()));

    let mut g1234 = Seed {
        train_no: "G1234",
        train_type: "G",
        from: ("北京南", "VNP"),
        to: ("上海虹桥", "AOH"),
        times: ("08:00", "12:30", "4:30"),
        seats: &[(Business, count(5)), (FirstClass, count(20)), (SecondClass, marker("有")), (NoSeat, None)],
        high_speed: true,
    }
    .build();
    g1234.discounted = true;

    let mut g5 = Seed {
        train_no: "G5",
        train_type: "G-复兴号智能动车组",
        from: ("北京南", "VNP"),
        to: ("上海", "SHH"),
        times: ("07:00", "11:38", "4:38"),
        seats: &[(Business, marker("候补")), (FirstClass, count(0)), (SecondClass, count(12))],
        high_speed: true,
    }
    .build();
    g5.points_redeemable = true;

    let g9 = Seed {
        train_no: "G9",
        train_type: "G",
        from: ("北京南", "VNP"),
        to: ("上海虹桥", "AOH"),
        times: ("14:00", "18:28", "4:28"),
        seats: &[(Business, count(0)), (FirstClass, count(0)), (SecondClass, count(0))],
        high_speed: true,
    }
    .build();

    let d709 = Seed {
        train_no: "D709",
        train_type: "D",
        from: ("北京", "BJP"),
        to: ("上海", "SHH"),
        times: ("19:36", "07:36", "12:00"),
        seats: &[(SoftSleeper, count(8)), (SecondClass, count(30)), (NoSeat, count(50))],
        high_speed: true,
    }
    .build();

    let z281 = Seed {
        train_no: "Z281",
        train_type: "Z",
        from: ("北京西", "BXP"),
        to: ("上海南", "SNH"),
        times: ("19:10", "09:04", "13:54"),
        seats: &[(SoftSleeper, count(0)), (HardSleeper, marker("候补")), (HardSeat, count(15))],
        high_speed: false,
    }
    .build();

    let t109 = Seed {
        train_no: "T109",
        train_type: "T",
        from: ("北京", "BJP"),
        to: ("上海", "SHH"),
        times: ("20:05", "13:55", "17:50"),
        seats: &[(HardSleeper, count(20)), (HardSeat, count(100)), (NoSeat, marker("有"))],
        high_speed: false,
    }
    .build();

    vec![g1234, g5, g9, d709, z281, t109]
}
