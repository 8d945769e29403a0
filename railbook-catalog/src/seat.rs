use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seat classes sold on the network, in the column order of the train list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SeatClass {
    Business,
    FirstClassPlus,
    FirstClassPremium,
    FirstClass,
    SecondClass,
    SecondClassPackage,
    PremiumSleeper,
    SoftSleeper,
    FirstSleeper,
    HardSleeper,
    SecondSleeper,
    SoftSeat,
    HardSeat,
    NoSeat,
    Other,
}

impl SeatClass {
    pub const ALL: [SeatClass; 15] = [
        SeatClass::Business,
        SeatClass::FirstClassPlus,
        SeatClass::FirstClassPremium,
        SeatClass::FirstClass,
        SeatClass::SecondClass,
        SeatClass::SecondClassPackage,
        SeatClass::PremiumSleeper,
        SeatClass::SoftSleeper,
        SeatClass::FirstSleeper,
        SeatClass::HardSleeper,
        SeatClass::SecondSleeper,
        SeatClass::SoftSeat,
        SeatClass::HardSeat,
        SeatClass::NoSeat,
        SeatClass::Other,
    ];

    /// Wire key, as used in train seat maps
    pub fn key(&self) -> &'static str {
        match self {
            SeatClass::Business => "business",
            SeatClass::FirstClassPlus => "firstClassPlus",
            SeatClass::FirstClassPremium => "firstClassPremium",
            SeatClass::FirstClass => "firstClass",
            SeatClass::SecondClass => "secondClass",
            SeatClass::SecondClassPackage => "secondClassPackage",
            SeatClass::PremiumSleeper => "premiumSleeper",
            SeatClass::SoftSleeper => "softSleeper",
            SeatClass::FirstSleeper => "firstSleeper",
            SeatClass::HardSleeper => "hardSleeper",
            SeatClass::SecondSleeper => "secondSleeper",
            SeatClass::SoftSeat => "softSeat",
            SeatClass::HardSeat => "hardSeat",
            SeatClass::NoSeat => "noSeat",
            SeatClass::Other => "other",
        }
    }

    /// Key used by the seat-type filter panel
    pub fn filter_key(&self) -> &'static str {
        match self {
            SeatClass::Business => "business",
            SeatClass::FirstClassPlus => "first_class_plus",
            SeatClass::FirstClassPremium => "first_class_premium",
            SeatClass::FirstClass => "first_class",
            SeatClass::SecondClass => "second_class",
            SeatClass::SecondClassPackage => "second_class_package",
            SeatClass::PremiumSleeper => "premium_sleeper",
            SeatClass::SoftSleeper => "soft_sleeper",
            SeatClass::FirstSleeper => "first_sleeper",
            SeatClass::HardSleeper => "hard_sleeper",
            SeatClass::SecondSleeper => "second_sleeper",
            SeatClass::SoftSeat => "soft_seat",
            SeatClass::HardSeat => "hard_seat",
            SeatClass::NoSeat => "no_seat",
            SeatClass::Other => "other_seat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeatClass::Business => "商务座",
            SeatClass::FirstClassPlus => "特等座",
            SeatClass::FirstClassPremium => "优选一等座",
            SeatClass::FirstClass => "一等座",
            SeatClass::SecondClass => "二等座",
            SeatClass::SecondClassPackage => "二等包座",
            SeatClass::PremiumSleeper => "高级软卧",
            SeatClass::SoftSleeper => "软卧/动卧",
            SeatClass::FirstSleeper => "一等卧",
            SeatClass::HardSleeper => "硬卧",
            SeatClass::SecondSleeper => "二等卧",
            SeatClass::SoftSeat => "软座",
            SeatClass::HardSeat => "硬座",
            SeatClass::NoSeat => "无座",
            SeatClass::Other => "其他",
        }
    }

    /// Column header text in the train list
    pub fn short_label(&self) -> &'static str {
        match self {
            SeatClass::Business => "商务",
            SeatClass::FirstClassPlus => "特等",
            SeatClass::FirstClassPremium => "优选一等",
            SeatClass::FirstClass => "一等",
            SeatClass::SecondClass => "二等",
            SeatClass::SecondClassPackage => "二等包",
            SeatClass::PremiumSleeper => "高软",
            SeatClass::SoftSleeper => "软卧",
            SeatClass::FirstSleeper => "一等卧",
            SeatClass::HardSleeper => "硬卧",
            SeatClass::SecondSleeper => "二等卧",
            SeatClass::SoftSeat => "软座",
            SeatClass::HardSeat => "硬座",
            SeatClass::NoSeat => "无座",
            SeatClass::Other => "其他",
        }
    }

    /// Look up a seat class by its snake_case filter key
    pub fn from_filter_key(key: &str) -> Option<SeatClass> {
        Self::ALL.into_iter().find(|c| c.filter_key() == key)
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts the wire key, the filter key or the label.
impl FromStr for SeatClass {
    type Err = SeatClassParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s || c.filter_key() == s || c.label() == s)
            .ok_or_else(|| SeatClassParseError::Unknown(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatClassParseError {
    #[error("Unknown seat class: {0:?}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_every_spelling() {
        assert_eq!("secondClass".parse::<SeatClass>(), Ok(SeatClass::SecondClass));
        assert_eq!("second_class".parse::<SeatClass>(), Ok(SeatClass::SecondClass));
        assert_eq!("二等座".parse::<SeatClass>(), Ok(SeatClass::SecondClass));
        assert_eq!("other_seat".parse::<SeatClass>(), Ok(SeatClass::Other));
        assert!("economy".parse::<SeatClass>().is_err());
        assert!("".parse::<SeatClass>().is_err());
    }

    #[test]
    fn test_keys_are_unique() {
        for (i, a) in SeatClass::ALL.iter().enumerate() {
            for b in &SeatClass::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
                assert_ne!(a.filter_key(), b.filter_key());
            }
        }
    }

    #[test]
    fn test_serde_uses_wire_key() {
        let json = serde_json::to_string(&SeatClass::FirstClassPremium).unwrap();
        assert_eq!(json, "\"firstClassPremium\"");

        let class: SeatClass = serde_json::from_str("\"noSeat\"").unwrap();
        assert_eq!(class, SeatClass::NoSeat);
    }

    #[test]
    fn test_from_filter_key() {
        assert_eq!(SeatClass::from_filter_key("hard_sleeper"), Some(SeatClass::HardSleeper));
        assert_eq!(SeatClass::from_filter_key("hardSleeper"), None);
        assert_eq!(SeatClass::from_filter_key("all"), None);
    }
}
