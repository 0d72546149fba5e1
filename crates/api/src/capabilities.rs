// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for action gating.
//!
//! Capabilities say which actions the client should offer for the signed-in
//! session. They are advisory only and do not replace backend authorization.

use crate::session::Session;
use condo_domain::Booking;

/// Whether an action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Allowed,
    Denied,
}

impl Capability {
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }

    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Actions that do not depend on a particular booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalCapabilities {
    pub can_book_for_resident: Capability,
    pub can_manage_amenities: Capability,
    pub can_view_building_bookings: Capability,
}

/// Actions offered on one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCapabilities {
    pub can_edit: Capability,
    pub can_cancel: Capability,
    pub can_add_note: Capability,
    pub can_confirm: Capability,
    pub can_reject: Capability,
    pub can_set_status: Capability,
}

/// Computes global capabilities for a session.
#[must_use]
pub fn compute_global_capabilities(session: &Session) -> GlobalCapabilities {
    let staff: Capability = Capability::from_bool(session.is_staff());
    GlobalCapabilities {
        can_book_for_resident: staff,
        can_manage_amenities: staff,
        can_view_building_bookings: staff,
    }
}

/// Returns true if the booking belongs to the session's resident or unit.
#[must_use]
pub fn owns_booking(session: &Session, booking: &Booking) -> bool {
    let same_resident: bool = booking.resident_id.as_deref() == Some(session.user_id.as_str());
    let same_unit: bool = match (&booking.unit_id, &session.unit_id) {
        (Some(booking_unit), Some(session_unit)) => booking_unit == session_unit,
        _ => false,
    };
    same_resident || same_unit
}

/// Computes the actions offered on a booking.
///
/// # Arguments
///
/// * `session` - The signed-in session
/// * `booking` - The booking being viewed
///
/// # Returns
///
/// A `BookingCapabilities` struct. Staff may act on any booking in the
/// building; residents only on their own. Terminal bookings cannot be edited
/// and only pending bookings can be confirmed or rejected.
#[must_use]
pub fn compute_booking_capabilities(session: &Session, booking: &Booking) -> BookingCapabilities {
    let staff: bool = session.is_staff();
    let involved: bool = staff || owns_booking(session, booking);

    BookingCapabilities {
        can_edit: Capability::from_bool(involved && !booking.status.is_terminal()),
        can_cancel: Capability::from_bool(involved && booking.status.is_cancellable()),
        can_add_note: Capability::from_bool(involved),
        can_confirm: Capability::from_bool(staff && booking.status.is_awaiting_decision()),
        can_reject: Capability::from_bool(staff && booking.status.is_awaiting_decision()),
        can_set_status: Capability::from_bool(staff && !booking.status.is_terminal()),
    }
}
