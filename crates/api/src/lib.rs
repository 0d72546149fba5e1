// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client boundary of the booking system.
//!
//! Holds the explicit session context, the role gates, the HTTP backend and
//! the workflow that turns core commands into backend calls.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod backend;
mod calendar;
mod capabilities;
mod clock;
mod debounce;
mod error;
mod handlers;
mod http;
mod request_response;
mod session;
mod workflow;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, AuthorizationService};
pub use backend::Backend;
pub use calendar::{CalendarEvent, calendar_events, status_color};
pub use capabilities::{
    BookingCapabilities, Capability, GlobalCapabilities, compute_booking_capabilities,
    compute_global_capabilities, owns_booking,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    BookingDetails, BookingWindow, booking_details, bookings_in_range, building_calendar,
    create_amenity, default_scope, get_amenity, get_booking, list_amenities,
    list_amenity_bookings, list_bookings, list_resident_bookings, list_residents, update_amenity,
};
pub use http::{ClientConfig, HttpBackend};
pub use request_response::{
    AmenityRequest, BookingScope, CreateBookingRequest, ErrorBody, LoginRequest, LoginResponse,
    UpdateBookingRequest, read_availability,
};
pub use session::{FileSessionStore, MemorySessionStore, Role, Session, SessionHandle, SessionStore};
pub use workflow::BookingWorkflow;
