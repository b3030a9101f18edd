use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

pub fn nested_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: de::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Deserialize::deserialize(deserializer)?))
}

/// normalizes a socials value into a list of strings.
///
/// the backend has sent this field as a json encoded string as well as a
/// plain array. anything that cannot be understood becomes an empty list.
pub fn normalize_socials(value: Value) -> Vec<String> {
    match value {
        Value::Array(list) => list.into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None
            })
            .collect(),
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(Value::Array(list)) => normalize_socials(Value::Array(list)),
            Ok(_) | Err(_) => {
                tracing::debug!("discarding unparsable socials value");

                Vec::new()
            }
        },
        _ => Vec::new()
    }
}

pub fn socials<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.map(normalize_socials).unwrap_or_default())
}

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

struct DateTimeVisitor;

impl<'de> de::Visitor<'de> for DateTimeVisitor {
    type Value = NaiveDateTime;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a date, a local date time or an rfc3339 timestamp")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_date_time(s).ok_or_else(|| E::invalid_value(de::Unexpected::Str(s), &self))
    }
}

/// accepts the formats event dates have been sent with
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub mod date_time {
    use super::*;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.collect_str(&value.format(DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>
    {
        deserializer.deserialize_str(DateTimeVisitor)
    }
}

pub mod option_date_time {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(DATE_TIME_FORMAT)),
            None => serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>
    {
        let given = Option::<String>::deserialize(deserializer)?;

        match given {
            Some(s) => parse_date_time(&s)
                .map(Some)
                .ok_or_else(|| de::Error::invalid_value(de::Unexpected::Str(&s), &DateTimeVisitor)),
            None => Ok(None)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn socials_from_encoded_string() {
        assert_eq!(
            normalize_socials(json!("[\"twitter\",\"insta\"]")),
            vec![String::from("twitter"), String::from("insta")]
        );
    }

    #[test]
    fn socials_from_array() {
        assert_eq!(
            normalize_socials(json!(["twitter", 12, "insta"])),
            vec![String::from("twitter"), String::from("insta")]
        );
    }

    #[test]
    fn socials_fallback_to_empty() {
        let invalid = [
            json!("not json"),
            json!("{\"twitter\":1}"),
            json!(null),
            json!(42),
            json!({"twitter": "@me"}),
        ];

        for given in invalid {
            assert!(normalize_socials(given.clone()).is_empty(), "expected empty for {}", given);
        }
    }

    #[test]
    fn date_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 14)
            .and_then(|d| d.and_hms_opt(20, 30, 0))
            .unwrap();

        let valid = [
            "2025-06-14T20:30:00",
            "2025-06-14T20:30:00.000",
            "2025-06-14T20:30",
            "2025-06-14 20:30:00",
            "2025-06-14T20:30:00Z",
            "2025-06-14T22:30:00+02:00",
        ];

        for given in valid {
            assert_eq!(parse_date_time(given), Some(expected), "failed parsing {:?}", given);
        }

        assert_eq!(
            parse_date_time("2025-06-14"),
            NaiveDate::from_ymd_opt(2025, 6, 14).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(parse_date_time("14/06/2025"), None);
    }
}
