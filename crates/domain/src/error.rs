// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::wire::format_wall_clock;
use time::Time;

/// Errors that can occur during domain validation.
///
/// The `Display` output of the booking rule variants is the exact message
/// shown to the person filling in the booking form, as a full sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The proposed start is at or before the current instant.
    BookingInPast,
    /// The proposed end is not strictly after the proposed start.
    EndNotAfterStart,
    /// The proposed duration is shorter than the amenity allows.
    BelowMinimumDuration {
        /// The amenity's minimum duration in hours.
        minimum_hours: f64,
    },
    /// The proposed duration is longer than the amenity allows.
    AboveMaximumDuration {
        /// The amenity's maximum duration in hours.
        maximum_hours: f64,
    },
    /// The proposed range falls outside the amenity's operating window.
    OutsideOperatingHours {
        /// The amenity's opening time.
        opening: Time,
        /// The amenity's closing time.
        closing: Time,
    },
    /// The amenity is not open for bookings.
    AmenityNotBookable {
        /// The amenity name.
        name: String,
    },
    /// One or more of the date/start/end fields was left blank.
    IncompleteSlot,
    /// Failed to parse a calendar date.
    InvalidDate {
        /// The rejected input.
        value: String,
        /// The parser message.
        error: String,
    },
    /// Failed to parse a time of day.
    InvalidTime {
        /// The rejected input.
        value: String,
        /// The parser message.
        error: String,
    },
    /// A confirmation or rejection was attempted without a note.
    NoteRequired {
        /// "confirmation" or "rejection".
        purpose: &'static str,
    },
    /// A note-only update was attempted with a blank note.
    EmptyNote,
    /// Status string is not a known booking status.
    InvalidStatus {
        /// The rejected status string.
        status: String,
    },
    /// The lifecycle does not permit this transition.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// The status cannot be chosen from the admin status selector.
    StatusNotSelectable {
        /// The requested status.
        status: String,
    },
    /// The booking is already in a terminal status.
    BookingNotCancellable {
        /// The current status.
        status: String,
    },
    /// A terminal booking cannot be moved to another slot.
    BookingNotEditable {
        /// The current status.
        status: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookingInPast => write!(f, "Cannot book in the past."),
            Self::EndNotAfterStart => write!(f, "End time must be after start time."),
            Self::BelowMinimumDuration { minimum_hours } => {
                write!(f, "Minimum booking duration is {minimum_hours} hours.")
            }
            Self::AboveMaximumDuration { maximum_hours } => {
                write!(f, "Maximum booking duration is {maximum_hours} hours.")
            }
            Self::OutsideOperatingHours { opening, closing } => {
                write!(
                    f,
                    "Booking must be between {} and {}.",
                    format_wall_clock(*opening),
                    format_wall_clock(*closing)
                )
            }
            Self::AmenityNotBookable { name } => {
                write!(f, "Amenity '{name}' is not available for booking.")
            }
            Self::IncompleteSlot => write!(f, "Please fill in all date and time fields."),
            Self::InvalidDate { value, error } => {
                write!(f, "Invalid date '{value}': {error}")
            }
            Self::InvalidTime { value, error } => {
                write!(f, "Invalid time '{value}': {error}")
            }
            Self::NoteRequired { purpose } => write!(f, "Notes are required for {purpose}."),
            Self::EmptyNote => write!(f, "Note cannot be empty."),
            Self::InvalidStatus { status } => write!(f, "Invalid booking status: {status}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change booking status from {from} to {to}: {reason}")
            }
            Self::StatusNotSelectable { status } => {
                write!(f, "Status {status} cannot be set directly.")
            }
            Self::BookingNotCancellable { status } => {
                write!(f, "A booking with status {status} cannot be cancelled.")
            }
            Self::BookingNotEditable { status } => {
                write!(f, "A booking with status {status} can no longer be moved.")
            }
        }
    }
}

impl std::error::Error for DomainError {}
