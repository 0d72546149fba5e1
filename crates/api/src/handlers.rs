// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read paths and amenity management.
//!
//! Each function takes the backend and the session explicitly, checks the
//! role gate where one applies, and forwards to the backend. Booking writes
//! live in [`crate::workflow`].

use crate::auth::AuthorizationService;
use crate::backend::Backend;
use crate::calendar::{CalendarEvent, calendar_events};
use crate::capabilities::{BookingCapabilities, compute_booking_capabilities};
use crate::error::ApiError;
use crate::request_response::{AmenityRequest, BookingScope};
use crate::session::{Session, SessionHandle};
use condo_audit::{NoteLine, render_notes};
use condo_domain::{Amenity, AmenityDraft, AmenityForm, Booking, FieldErrors, Resident};
use std::collections::BTreeMap;
use time::Date;
use tracing::{debug, info};

/// Which slice of history a booking list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingWindow {
    /// Only bookings that have not started yet.
    #[default]
    Upcoming,
    /// Every booking, past ones included.
    All,
}

impl BookingWindow {
    const fn is_upcoming(self) -> bool {
        matches!(self, Self::Upcoming)
    }
}

/// A booking with its rendered note log and the actions offered on it.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking: Booking,
    /// Empty when the booking has no notes.
    pub notes: Vec<NoteLine>,
    pub capabilities: BookingCapabilities,
}

fn building_of(session: &Session) -> Result<String, ApiError> {
    session
        .building_id
        .clone()
        .ok_or_else(|| ApiError::Validation {
            rule: String::from("building_required"),
            message: String::from("No building is associated with this account"),
        })
}

pub(crate) fn form_errors<F: std::fmt::Display>(errors: FieldErrors<F>) -> ApiError {
    let errors: BTreeMap<String, String> = errors
        .into_iter()
        .map(|(field, message)| (field.to_string(), message))
        .collect();
    ApiError::InvalidForm { errors }
}

/// Lists the amenities of the session's building.
///
/// # Errors
///
/// Returns an error if nobody is signed in, the session has no building, or
/// the backend call fails.
pub async fn list_amenities(
    backend: &dyn Backend,
    session: &SessionHandle,
) -> Result<Vec<Amenity>, ApiError> {
    let current: Session = session.require()?;
    let building_id: String = building_of(&current)?;
    let amenities: Vec<Amenity> = backend.amenities_by_building(&building_id).await?;
    debug!(building_id = %building_id, count = amenities.len(), "Listed amenities");
    Ok(amenities)
}

/// Fetches one amenity.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the backend call fails.
pub async fn get_amenity(
    backend: &dyn Backend,
    session: &SessionHandle,
    amenity_id: &str,
) -> Result<Amenity, ApiError> {
    session.require()?;
    backend.amenity(amenity_id).await
}

/// Creates an amenity in the session's building.
///
/// # Arguments
///
/// * `backend` - The backend
/// * `session` - The signed-in session
/// * `form` - The amenity form as entered
///
/// # Errors
///
/// Returns an error if:
/// - The session is not staff
/// - Any form field is invalid (no request is sent)
/// - The backend refuses the amenity
pub async fn create_amenity(
    backend: &dyn Backend,
    session: &SessionHandle,
    form: &AmenityForm,
) -> Result<(), ApiError> {
    let current: Session = session.require()?;
    AuthorizationService::authorize_manage_amenities(&current)?;
    let draft: AmenityDraft = form.to_draft().map_err(form_errors)?;

    let name: String = draft.amenity_name.clone();
    let request: AmenityRequest = AmenityRequest::from_draft(
        draft,
        None,
        current.building_id.clone(),
        Some(current.user_id.clone()),
        current.user_id.clone(),
    );
    backend.create_amenity(&request).await?;
    info!(amenity_name = %name, user_id = %current.user_id, "Amenity created");
    Ok(())
}

/// Saves edits to an existing amenity.
///
/// The amenity's building and creator are carried over unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not staff
/// - Any form field is invalid (no request is sent)
/// - The backend refuses the update
pub async fn update_amenity(
    backend: &dyn Backend,
    session: &SessionHandle,
    amenity: &Amenity,
    form: &AmenityForm,
) -> Result<(), ApiError> {
    let current: Session = session.require()?;
    AuthorizationService::authorize_manage_amenities(&current)?;
    let draft: AmenityDraft = form.to_draft().map_err(form_errors)?;

    let request: AmenityRequest = AmenityRequest::from_draft(
        draft,
        Some(amenity.amenity_id.clone()),
        amenity
            .building_id
            .clone()
            .or_else(|| current.building_id.clone()),
        amenity.created_by.clone(),
        current.user_id.clone(),
    );
    backend.update_amenity(&request).await?;
    info!(amenity_id = %amenity.amenity_id, user_id = %current.user_id, "Amenity updated");
    Ok(())
}

/// Lists the residents staff can book for.
///
/// # Errors
///
/// Returns an error if the session is not staff or the backend call fails.
pub async fn list_residents(
    backend: &dyn Backend,
    session: &SessionHandle,
) -> Result<Vec<Resident>, ApiError> {
    let current: Session = session.require()?;
    AuthorizationService::authorize_list_residents(&current)?;
    backend.residents_by_building(&building_of(&current)?).await
}

/// The scope the signed-in user's booking list is keyed by.
///
/// Staff see the whole building. Residents see their unit, or their own
/// bookings when the session carries no unit.
///
/// # Errors
///
/// Returns an error if a staff session has no building.
pub fn default_scope(session: &Session) -> Result<BookingScope, ApiError> {
    if session.is_staff() {
        return building_of(session).map(BookingScope::Building);
    }
    Ok(session.unit_id.clone().map_or_else(
        || BookingScope::Resident(session.user_id.clone()),
        BookingScope::Unit,
    ))
}

/// Lists the signed-in user's bookings.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the backend call fails.
pub async fn list_bookings(
    backend: &dyn Backend,
    session: &SessionHandle,
    window: BookingWindow,
) -> Result<Vec<Booking>, ApiError> {
    let current: Session = session.require()?;
    let scope: BookingScope = default_scope(&current)?;
    let bookings: Vec<Booking> = backend.bookings(&scope, window.is_upcoming()).await?;
    debug!(scope = ?scope, window = ?window, count = bookings.len(), "Listed bookings");
    Ok(bookings)
}

/// Lists the bookings of one amenity.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the backend call fails.
pub async fn list_amenity_bookings(
    backend: &dyn Backend,
    session: &SessionHandle,
    amenity_id: &str,
    window: BookingWindow,
) -> Result<Vec<Booking>, ApiError> {
    session.require()?;
    backend
        .bookings(
            &BookingScope::Amenity(amenity_id.to_string()),
            window.is_upcoming(),
        )
        .await
}

/// Lists the bookings of one resident.
///
/// Residents may only list their own.
///
/// # Errors
///
/// Returns an error if a resident asks for someone else's bookings or the
/// backend call fails.
pub async fn list_resident_bookings(
    backend: &dyn Backend,
    session: &SessionHandle,
    resident_id: &str,
    window: BookingWindow,
) -> Result<Vec<Booking>, ApiError> {
    let current: Session = session.require()?;
    if current.user_id != resident_id {
        AuthorizationService::authorize_view_building_bookings(&current)?;
    }
    backend
        .bookings(
            &BookingScope::Resident(resident_id.to_string()),
            window.is_upcoming(),
        )
        .await
}

/// Fetches one booking.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the backend call fails.
pub async fn get_booking(
    backend: &dyn Backend,
    session: &SessionHandle,
    booking_id: &str,
) -> Result<Booking, ApiError> {
    session.require()?;
    backend.booking(booking_id).await
}

/// Fetches a booking with its notes rendered and its actions computed.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the backend call fails.
pub async fn booking_details(
    backend: &dyn Backend,
    session: &SessionHandle,
    booking_id: &str,
) -> Result<BookingDetails, ApiError> {
    let current: Session = session.require()?;
    let booking: Booking = backend.booking(booking_id).await?;
    let notes: Vec<NoteLine> = render_notes(booking.notes_text());
    let capabilities: BookingCapabilities = compute_booking_capabilities(&current, &booking);
    Ok(BookingDetails {
        booking,
        notes,
        capabilities,
    })
}

/// Lists an amenity's bookings between two dates, both inclusive.
///
/// # Errors
///
/// Returns an error if `end` is before `start`, nobody is signed in, or the
/// backend call fails.
pub async fn bookings_in_range(
    backend: &dyn Backend,
    session: &SessionHandle,
    amenity_id: &str,
    start: Date,
    end: Date,
) -> Result<Vec<Booking>, ApiError> {
    session.require()?;
    if end < start {
        return Err(ApiError::Validation {
            rule: String::from("range_order"),
            message: String::from("End date must not be before start date"),
        });
    }
    backend.bookings_in_range(amenity_id, start, end).await
}

/// Projects the building's bookings onto calendar events.
///
/// # Errors
///
/// Returns an error if the session is not staff or the backend call fails.
pub async fn building_calendar(
    backend: &dyn Backend,
    session: &SessionHandle,
    window: BookingWindow,
) -> Result<Vec<CalendarEvent>, ApiError> {
    let current: Session = session.require()?;
    AuthorizationService::authorize_view_building_bookings(&current)?;
    let scope: BookingScope = BookingScope::Building(building_of(&current)?);
    let bookings: Vec<Booking> = backend.bookings(&scope, window.is_upcoming()).await?;
    Ok(calendar_events(&bookings))
}
