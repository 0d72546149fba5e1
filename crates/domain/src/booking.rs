// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::amenity::FieldErrors;
use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use crate::wire::{
    calendar_date, flexible_id, flexible_id_option, format_calendar_date, format_wall_clock,
    parse_calendar_date, parse_wall_clock, wall_clock,
};
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime, Time};

/// A candidate or existing reservation period: one date, one time range.
///
/// Ranges never cross midnight; both instants share `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingSlot {
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
}

impl BookingSlot {
    /// Creates a new slot.
    #[must_use]
    pub const fn new(date: Date, start_time: Time, end_time: Time) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }

    /// Parses a slot from its `YYYY-MM-DD` / `HH:MM` text fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` or `DomainError::InvalidTime` when a
    /// field does not parse.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> Result<Self, DomainError> {
        Ok(Self::new(
            parse_calendar_date(date)?,
            parse_wall_clock(start_time)?,
            parse_wall_clock(end_time)?,
        ))
    }

    #[must_use]
    pub const fn start(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date, self.start_time)
    }

    #[must_use]
    pub const fn end(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date, self.end_time)
    }

    /// Length of the range in (fractional) hours. Negative when end precedes start.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        (self.end() - self.start()).as_seconds_f64() / 3600.0
    }
}

impl std::fmt::Display for BookingSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{}",
            format_calendar_date(self.date),
            format_wall_clock(self.start_time),
            format_wall_clock(self.end_time)
        )
    }
}

/// A reservation of an amenity by a resident.
///
/// Bookings are never deleted; cancellation and rejection are statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub booking_id: String,
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub amenity_id: String,
    #[serde(default)]
    pub amenity_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub building_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub resident_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub unit_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub booked_by_resident: Option<String>,
    #[serde(with = "calendar_date")]
    pub booking_date: Date,
    #[serde(with = "wall_clock")]
    pub start_time: Time,
    #[serde(with = "wall_clock")]
    pub end_time: Time,
    pub status: BookingStatus,
    /// The append-only note log.
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub updated_by_name: Option<String>,
}

impl Booking {
    /// The booked slot.
    #[must_use]
    pub const fn slot(&self) -> BookingSlot {
        BookingSlot::new(self.booking_date, self.start_time, self.end_time)
    }

    /// The note log, empty when none has been written.
    #[must_use]
    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Name of the person the booking is for, falling back to their id.
    #[must_use]
    pub fn resident_label(&self) -> &str {
        self.booked_by_resident
            .as_deref()
            .or(self.resident_id.as_deref())
            .unwrap_or("Unknown")
    }

    /// Unit label, preferring the unit number over the unit id.
    #[must_use]
    pub fn unit_label(&self) -> Option<&str> {
        self.unit_number.as_deref().or(self.unit_id.as_deref())
    }
}

/// A resident a staff member may book on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub resident_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub unit_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub unit_number: Option<String>,
}

impl std::fmt::Display for Resident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (Unit {})",
            self.first_name,
            self.last_name,
            self.unit_number.as_deref().unwrap_or("N/A")
        )
    }
}

/// Fields of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingField {
    BookingDate,
    StartTime,
    EndTime,
}

impl BookingField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BookingDate => "bookingDate",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
        }
    }
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controlled state of the booking create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    /// Text of a new note. On edit it is appended to the log, never replacing it.
    pub notes: String,
    /// Only honoured for staff edits.
    pub status: Option<BookingStatus>,
    /// Staff may book for another resident when creating.
    pub resident: Option<Resident>,
}

impl BookingForm {
    /// Pre-fills the form from an existing booking. The note field starts blank.
    #[must_use]
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_date: format_calendar_date(booking.booking_date),
            start_time: format_wall_clock(booking.start_time),
            end_time: format_wall_clock(booking.end_time),
            notes: String::new(),
            status: Some(booking.status),
            resident: None,
        }
    }

    /// Per-field errors for the date and time inputs.
    #[must_use]
    pub fn validate(&self) -> FieldErrors<BookingField> {
        let mut errors: FieldErrors<BookingField> = FieldErrors::new();
        let fields: [(BookingField, &str); 3] = [
            (BookingField::BookingDate, &self.booking_date),
            (BookingField::StartTime, &self.start_time),
            (BookingField::EndTime, &self.end_time),
        ];
        for (field, raw) in fields {
            if raw.trim().is_empty() {
                errors.insert(field, String::from("Required"));
                continue;
            }
            let parsed: Result<(), DomainError> = match field {
                BookingField::BookingDate => parse_calendar_date(raw).map(|_| ()),
                BookingField::StartTime | BookingField::EndTime => {
                    parse_wall_clock(raw).map(|_| ())
                }
            };
            if let Err(e) = parsed {
                errors.insert(field, e.to_string());
            }
        }
        errors
    }

    /// Reads the slot out of the form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteSlot` if any date/time field is blank,
    /// or a parse error if one is malformed.
    pub fn slot(&self) -> Result<BookingSlot, DomainError> {
        if self.booking_date.trim().is_empty()
            || self.start_time.trim().is_empty()
            || self.end_time.trim().is_empty()
        {
            return Err(DomainError::IncompleteSlot);
        }
        BookingSlot::parse(&self.booking_date, &self.start_time, &self.end_time)
    }
}
