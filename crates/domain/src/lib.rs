// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod amenity;
mod booking;
mod booking_status;
mod error;
mod validation;
pub mod wire;

#[cfg(test)]
mod tests;

pub use amenity::{
    Amenity, AmenityDraft, AmenityField, AmenityForm, FieldErrors, filter_amenities,
};
pub use booking::{Booking, BookingField, BookingForm, BookingSlot, Resident};
pub use booking_status::{BookingStatus, StatusTone};
pub use error::DomainError;
pub use validation::{SlotCheck, ensure_bookable, validate_booking_slot};
pub use wire::{format_calendar_date, format_wall_clock, parse_calendar_date, parse_wall_clock};
