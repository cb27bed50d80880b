//! `reported_at` parsing for both JSON strings and native TOML datetimes.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Text(String),
    Toml(toml::value::Datetime),
}

/// Deserializes an optional RFC 3339 timestamp.
///
/// Accepts a string (`"2024-06-01T10:00:00Z"`) or an unquoted TOML offset
/// datetime (`2024-06-01T10:00:00Z`). Datetimes without a UTC offset are
/// rejected.
///
/// # Errors
///
/// Returns a deserializer error if the value is neither form or does not
/// carry an offset.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(repr) = Option::<TimestampRepr>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = match repr {
        TimestampRepr::Text(text) => text,
        TimestampRepr::Toml(datetime) => datetime.to_string(),
    };

    DateTime::parse_from_rfc3339(&text)
        .map(|at| Some(at.with_timezone(&Utc)))
        .map_err(|e| {
            D::Error::custom(format!(
                "invalid timestamp {text:?} ({e}); expected RFC 3339 with a UTC offset"
            ))
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "deserialize_optional")]
        at: Option<DateTime<Utc>>,
    }

    fn expected() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn native_toml_datetime() {
        let record: Record = toml::from_str("at = 2024-06-01T10:00:00Z").unwrap();
        assert_eq!(record.at, Some(expected()));
    }

    #[test]
    fn quoted_toml_and_json_strings() {
        let record: Record = toml::from_str("at = \"2024-06-01T12:00:00+02:00\"").unwrap();
        assert_eq!(record.at, Some(expected()));

        let record: Record = serde_json::from_str(r#"{"at":"2024-06-01T10:00:00Z"}"#).unwrap();
        assert_eq!(record.at, Some(expected()));
    }

    #[test]
    fn absent_and_null_are_none() {
        let record: Record = toml::from_str("").unwrap();
        assert_eq!(record.at, None);

        let record: Record = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(record.at, None);
    }

    #[test]
    fn local_datetime_without_offset_is_rejected() {
        let err = toml::from_str::<Record>("at = 2024-06-01T10:00:00")
            .err()
            .unwrap();
        assert!(err.to_string().contains("UTC offset"), "{err}");
    }
}
