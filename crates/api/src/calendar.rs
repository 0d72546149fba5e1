// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Projection of bookings onto calendar events.

use condo_domain::{Booking, BookingSlot, BookingStatus};
use time::PrimitiveDateTime;

/// One booking as shown on the building calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub status: BookingStatus,
    /// Hex colour, `#rrggbb`.
    pub color: &'static str,
}

impl From<&Booking> for CalendarEvent {
    fn from(booking: &Booking) -> Self {
        let amenity: &str = booking
            .amenity_name
            .as_deref()
            .unwrap_or("Unknown Amenity");
        let unit: &str = booking
            .unit_number
            .as_deref()
            .or(booking.unit_id.as_deref())
            .unwrap_or("N/A");
        let slot: BookingSlot = booking.slot();
        Self {
            id: booking.booking_id.clone(),
            title: format!("{amenity} - Unit {unit}"),
            start: slot.start(),
            end: slot.end(),
            status: booking.status,
            color: status_color(booking.status),
        }
    }
}

/// Calendar colour for a status.
#[must_use]
pub const fn status_color(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Cancelled => "#f44336",
        BookingStatus::PendingPayment => "#ff9800",
        BookingStatus::Confirmed => "#4caf50",
        _ => "#3174ad",
    }
}

/// Events for every booking, in start order.
#[must_use]
pub fn calendar_events(bookings: &[Booking]) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = bookings.iter().map(CalendarEvent::from).collect();
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    events
}
