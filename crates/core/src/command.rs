// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use condo_domain::{Amenity, Booking, BookingSlot, BookingStatus, Resident};

/// A command represents user intent against a booking as data only.
///
/// Commands are the only way to request booking changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Book an amenity.
    CreateBooking {
        /// The amenity being booked.
        amenity: Amenity,
        /// The requested slot.
        slot: BookingSlot,
        /// Optional first note.
        notes: String,
        /// Staff only: the resident the booking is made for.
        on_behalf_of: Option<Resident>,
    },
    /// Edit the slot of an existing booking, optionally appending a note.
    UpdateBooking {
        /// The booking as last read from the backend.
        booking: Booking,
        /// The booked amenity, for rule validation.
        amenity: Amenity,
        /// The requested slot. May equal the current one.
        slot: BookingSlot,
        /// Text appended as a new note; blank leaves the log untouched.
        notes: String,
        /// Staff only: a status chosen from the status selector.
        status: Option<BookingStatus>,
    },
    /// Staff confirmation of a pending booking.
    ConfirmBooking {
        /// The booking as last read from the backend.
        booking: Booking,
        /// The confirmation note. Required.
        note: String,
    },
    /// Staff rejection of a pending booking.
    RejectBooking {
        /// The booking as last read from the backend.
        booking: Booking,
        /// The reason. Required.
        note: String,
    },
    /// Append a note without changing the status.
    AddNote {
        /// The booking as last read from the backend.
        booking: Booking,
        /// The note text. Required.
        note: String,
    },
    /// Cancel a booking. Irreversible.
    CancelBooking {
        /// The booking as last read from the backend.
        booking: Booking,
    },
}

impl Command {
    /// A stable name for the command, used in logs and error translation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateBooking { .. } => "CreateBooking",
            Self::UpdateBooking { .. } => "UpdateBooking",
            Self::ConfirmBooking { .. } => "ConfirmBooking",
            Self::RejectBooking { .. } => "RejectBooking",
            Self::AddNote { .. } => "AddNote",
            Self::CancelBooking { .. } => "CancelBooking",
        }
    }
}
