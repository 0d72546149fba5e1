// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking rule validation.
//!
//! Rules are checked in a fixed order and the first failure wins:
//!
//! 1. the slot must start after `now` (see [`SlotCheck`])
//! 2. the end must be strictly after the start
//! 3. the duration must meet the amenity minimum
//! 4. the duration must not exceed the amenity maximum
//! 5. the range must sit inside the operating window

use crate::amenity::Amenity;
use crate::booking::BookingSlot;
use crate::error::DomainError;
use time::PrimitiveDateTime;

/// How a slot is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCheck {
    /// A brand-new booking.
    NewBooking,
    /// An edit of an existing booking whose slot was `original`.
    ///
    /// An unchanged slot skips the past check so that notes and status can
    /// still be edited once the booking has started.
    Edit { original: BookingSlot },
}

impl SlotCheck {
    /// Returns true if the proposed slot differs from what was booked.
    #[must_use]
    pub fn slot_changed(&self, slot: &BookingSlot) -> bool {
        match self {
            Self::NewBooking => true,
            Self::Edit { original } => original != slot,
        }
    }
}

/// Validates a proposed slot against an amenity's booking rules.
///
/// `now` is local wall-clock time, the same frame the slot is expressed in.
///
/// # Errors
///
/// Returns the first violated rule as a `DomainError` whose `Display` output
/// is the message shown to the user.
pub fn validate_booking_slot(
    amenity: &Amenity,
    slot: &BookingSlot,
    now: PrimitiveDateTime,
    check: &SlotCheck,
) -> Result<(), DomainError> {
    if check.slot_changed(slot) && slot.start() <= now {
        return Err(DomainError::BookingInPast);
    }

    if slot.end() <= slot.start() {
        return Err(DomainError::EndNotAfterStart);
    }

    let duration: f64 = slot.duration_hours();

    if let Some(minimum_hours) = amenity.min_duration_hours() {
        if duration < minimum_hours {
            return Err(DomainError::BelowMinimumDuration { minimum_hours });
        }
    }

    if let Some(maximum_hours) = amenity.max_duration_hours() {
        if duration > maximum_hours {
            return Err(DomainError::AboveMaximumDuration { maximum_hours });
        }
    }

    if let Some((opening, closing)) = amenity.operating_window() {
        if slot.start_time < opening || slot.end_time > closing {
            return Err(DomainError::OutsideOperatingHours { opening, closing });
        }
    }

    Ok(())
}

/// Returns an error if the amenity is closed for new bookings.
///
/// # Errors
///
/// Returns `DomainError::AmenityNotBookable` if the amenity is inactive or
/// not bookable.
pub fn ensure_bookable(amenity: &Amenity) -> Result<(), DomainError> {
    if amenity.is_active && amenity.is_bookable {
        Ok(())
    } else {
        Err(DomainError::AmenityNotBookable {
            name: amenity.amenity_name.clone(),
        })
    }
}
