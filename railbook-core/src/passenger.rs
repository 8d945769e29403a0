use railbook_shared::Masked;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque passenger identifier.
///
/// Seeded passengers use short numeric ids; passengers added at runtime get a
/// time-ordered UUIDv7 so ids issued by the same process never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassengerId(pub String);

impl PassengerId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PassengerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PassengerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PassengerClass {
    #[default]
    #[serde(rename = "adult", alias = "成人")]
    Adult,
    #[serde(rename = "child", alias = "儿童")]
    Child,
    #[serde(rename = "student", alias = "学生")]
    Student,
}

impl PassengerClass {
    pub fn label(&self) -> &'static str {
        match self {
            PassengerClass::Adult => "成人",
            PassengerClass::Child => "儿童",
            PassengerClass::Student => "学生",
        }
    }
}

/// User-editable passenger data, as submitted by the add/edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerFields {
    pub name: String,
    pub national_id: Masked<String>,
    pub phone: Masked<String>,
    #[serde(default)]
    pub passenger_class: PassengerClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
    pub national_id: Masked<String>,
    pub phone: Masked<String>,
    pub passenger_class: PassengerClass,
}

impl Passenger {
    pub fn from_fields(id: PassengerId, fields: PassengerFields) -> Self {
        Self {
            id,
            name: fields.name,
            national_id: fields.national_id,
            phone: fields.phone,
            passenger_class: fields.passenger_class,
        }
    }

    pub fn fields(&self) -> PassengerFields {
        PassengerFields {
            name: self.name.clone(),
            national_id: self.national_id.clone(),
            phone: self.phone.clone(),
            passenger_class: self.passenger_class,
        }
    }
}

/// Field-scoped validation failures: field name -> message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("invalid passenger fields: {}", .0.keys().copied().collect::<Vec<_>>().join(", "))]
pub struct FieldErrors(pub BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// Validate a passenger form.
///
/// Every field is checked so the caller can show all messages at once. A blank
/// field reports "required"; a filled but malformed field reports its format.
pub fn validate_fields(fields: &PassengerFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if fields.name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }

    let national_id = fields.national_id.expose();
    if national_id.trim().is_empty() {
        errors.insert("nationalId", "National ID number is required");
    } else if !is_valid_national_id(national_id) {
        errors.insert("nationalId", "National ID number must be 17 digits followed by a digit or X");
    }

    let phone = fields.phone.expose();
    if phone.trim().is_empty() {
        errors.insert("phone", "Phone number is required");
    } else if !is_valid_mobile(phone) {
        errors.insert("phone", "Phone number must be an 11-digit mobile number");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// 17 digits then a digit or an upper-case X
pub fn is_valid_national_id(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 18
        && bytes[..17].iter().all(u8::is_ascii_digit)
        && (bytes[17].is_ascii_digit() || bytes[17] == b'X')
}

/// 11 digits, leading 1, second digit 3-9
pub fn is_valid_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, national_id: &str, phone: &str) -> PassengerFields {
        PassengerFields {
            name: name.to_string(),
            national_id: Masked::from(national_id),
            phone: Masked::from(phone),
            passenger_class: PassengerClass::Adult,
        }
    }

    #[test]
    fn test_valid_fields() {
        assert!(validate_fields(&fields("张三", "110101199001011234", "13800138000")).is_ok());
        assert!(validate_fields(&fields("李四", "11010119950101123X", "19912345678")).is_ok());
    }

    #[test]
    fn test_required_fields() {
        let errors = validate_fields(&fields("  ", "", "")).unwrap_err();

        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("nationalId"), Some("National ID number is required"));
        assert_eq!(errors.get("phone"), Some("Phone number is required"));
    }

    #[test]
    fn test_national_id_format() {
        assert!(!is_valid_national_id("11010119900101123"));
        assert!(!is_valid_national_id("1101011990010112345"));
        assert!(!is_valid_national_id("11010119900101123x"));
        assert!(!is_valid_national_id("X10101199001011234"));

        let errors = validate_fields(&fields("张三", "11010119900101123x", "13800138000")).unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert!(errors.get("nationalId").is_some());
    }

    #[test]
    fn test_mobile_format() {
        assert!(is_valid_mobile("13800138000"));
        assert!(!is_valid_mobile("12800138000"));
        assert!(!is_valid_mobile("23800138000"));
        assert!(!is_valid_mobile("1380013800"));
        assert!(!is_valid_mobile("138001380001"));
        assert!(!is_valid_mobile("1380013800a"));
    }

    #[test]
    fn test_passenger_class_accepts_labels() {
        let class: PassengerClass = serde_json::from_str("\"学生\"").unwrap();
        assert_eq!(class, PassengerClass::Student);

        let class: PassengerClass = serde_json::from_str("\"child\"").unwrap();
        assert_eq!(class, PassengerClass::Child);
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"child\"");
    }

    #[test]
    fn test_fields_deserialize_with_default_class() {
        let json = r#"{"name":"王五","nationalId":"110101199001011234","phone":"13800138000"}"#;
        let parsed: PassengerFields = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.passenger_class, PassengerClass::Adult);
        assert_eq!(parsed.national_id.expose(), "110101199001011234");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PassengerId::generate();
        let b = PassengerId::generate();
        assert_ne!(a, b);
    }
}
