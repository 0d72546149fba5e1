// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use condo_audit::NoteAuthor;
use condo_domain::{Booking, BookingSlot, BookingStatus};
use time::{Date, Time};

/// The signed-in person a command is applied for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The user id stamped into `createdBy`/`updatedBy`.
    pub user_id: String,
    /// The building the user belongs to.
    pub building_id: Option<String>,
    /// The user's own unit. Absent for staff.
    pub unit_id: Option<String>,
    /// Name used to attribute notes.
    pub author: NoteAuthor,
    /// True for administrators and building managers.
    pub is_staff: bool,
}

impl Actor {
    /// Creates a new `Actor`.
    #[must_use]
    pub const fn new(
        user_id: String,
        building_id: Option<String>,
        unit_id: Option<String>,
        author: NoteAuthor,
        is_staff: bool,
    ) -> Self {
        Self {
            user_id,
            building_id,
            unit_id,
            author,
            is_staff,
        }
    }
}

/// A booking to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub amenity_id: String,
    pub building_id: Option<String>,
    pub resident_id: Option<String>,
    pub unit_id: Option<String>,
    pub booking_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub notes: String,
    pub status: BookingStatus,
    pub created_by: String,
    pub updated_by: String,
}

/// A full replacement of an existing booking's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingUpdate {
    pub booking_id: String,
    pub amenity_id: String,
    pub booking_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub notes: String,
    pub status: BookingStatus,
    pub updated_by: String,
}

/// The single remote write a command resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingMutation {
    Create(NewBooking),
    Update(BookingUpdate),
    Cancel { booking_id: String },
}

impl BookingMutation {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Cancel { .. } => "cancel",
        }
    }
}

/// A slot that must be reported free by the backend before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub amenity_id: String,
    pub slot: BookingSlot,
}

/// The result of planning a command.
///
/// Nothing here has been sent anywhere. Local state must only be replaced by
/// `expected` once the backend accepts `mutation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The write to send.
    pub mutation: BookingMutation,
    /// The availability query to run first, if the slot is new or moved.
    pub availability_check: Option<AvailabilityQuery>,
    /// The booking as it will read after a successful write.
    /// `None` for creation, where the backend assigns the id.
    pub expected: Option<Booking>,
}
