//! `HH:MM` time-of-day handling.
//!
//! Times cross every serde boundary as 24-hour `HH:MM` strings. Use the
//! [`hhmm`] module with `#[serde(with = "...")]` on `NaiveTime` fields and
//! [`hhmm::option`] on `Option<NaiveTime>` fields.

use chrono::NaiveTime;

use crate::error::{EngineError, EngineResult};

/// Parses a 24-hour `HH:MM` string.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::parse_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time("08:15").unwrap(), NaiveTime::from_hms_opt(8, 15, 0).unwrap());
/// assert!(parse_time("8h15").is_err());
/// ```
pub fn parse_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

/// Formats a time as `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter for `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    /// Reads `HH:MM`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }

    /// Serde adapter for `Option<NaiveTime>` as an optional `HH:MM`.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Writes `HH:MM`, or null.
        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => serializer.serialize_str(&super::super::format_time(*time)),
                None => serializer.serialize_none(),
            }
        }

        /// Reads an optional `HH:MM`; null and empty strings are `None`.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_time(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}
