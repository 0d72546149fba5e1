// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text representations shared by the backend wire format and the forms.
//!
//! Calendar dates travel as `YYYY-MM-DD` and wall-clock times as `HH:MM`.
//! The backend sometimes answers with `HH:MM:SS`; both are accepted on input
//! and seconds are dropped. Identifiers may arrive as JSON numbers or strings
//! and are always held as strings.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, Time};

/// Formats a time of day as `HH:MM`.
#[must_use]
pub fn format_wall_clock(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parses a time of day from `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` if the value matches neither format.
pub fn parse_wall_clock(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    Time::parse(trimmed, format_description!("[hour]:[minute]"))
        .or_else(|_| Time::parse(trimmed, format_description!("[hour]:[minute]:[second]")))
        .map(|t| t.replace_second(0).unwrap_or(t))
        .map_err(|e| DomainError::InvalidTime {
            value: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_calendar_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a calendar date from `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the value is not an ISO calendar date.
pub fn parse_calendar_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Serde adapter for a required `HH:MM` time.
#[allow(clippy::missing_errors_doc)]
pub mod wall_clock {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::Time;

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wall_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for an optional `HH:MM` time. Blank strings read as `None`.
#[allow(clippy::missing_errors_doc)]
pub mod wall_clock_option {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::Time;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(time: &Option<Time>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&super::format_wall_clock(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Time>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(value) if !value.trim().is_empty() => super::parse_wall_clock(&value)
                .map(Some)
                .map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

/// Serde adapter for a `YYYY-MM-DD` date.
#[allow(clippy::missing_errors_doc)]
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_calendar_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw).map_err(D::Error::custom)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// Serde adapter for identifiers that may be numbers or strings.
#[allow(clippy::missing_errors_doc)]
pub mod flexible_id {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        super::RawId::deserialize(deserializer).map(String::from)
    }
}

/// Optional variant of [`flexible_id`].
#[allow(clippy::missing_errors_doc)]
pub mod flexible_id_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw: Option<super::RawId> = Option::deserialize(deserializer)?;
        Ok(raw.map(String::from).filter(|id| !id.is_empty()))
    }
}
