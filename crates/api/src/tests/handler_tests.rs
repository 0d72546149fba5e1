// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read path and amenity management tests.

use super::helpers::{
    Call, RecordingBackend, create_test_amenity, create_test_booking, create_test_handle,
    create_test_resident_session, create_test_staff_session,
};
use crate::{
    ApiError, BookingDetails, BookingScope, BookingWindow, CalendarEvent, Session,
    SessionHandle, booking_details, bookings_in_range, building_calendar, create_amenity,
    default_scope, list_amenities, list_bookings, list_resident_bookings, list_residents,
    update_amenity,
};
use condo_audit::NoteLine;
use condo_domain::{Amenity, AmenityForm, Booking, BookingStatus};
use time::macros::date;

fn create_test_amenity_form() -> AmenityForm {
    AmenityForm {
        amenity_name: String::from("Gym"),
        description: String::from("Weights and treadmills"),
        price: String::from("0"),
        opening_time: String::from("06:00"),
        closing_time: String::from("22:00"),
        max_capacity: String::new(),
        min_booking_duration: String::new(),
        max_booking_duration: String::from("2"),
        ..AmenityForm::new()
    }
}

// ============================================================================
// Booking lists
// ============================================================================

#[test]
fn test_default_scope_by_role() {
    assert_eq!(
        default_scope(&create_test_staff_session()).unwrap(),
        BookingScope::Building(String::from("1"))
    );
    assert_eq!(
        default_scope(&create_test_resident_session()).unwrap(),
        BookingScope::Unit(String::from("101"))
    );

    let mut unitless: Session = create_test_resident_session();
    unitless.unit_id = None;
    assert_eq!(
        default_scope(&unitless).unwrap(),
        BookingScope::Resident(String::from("11"))
    );

    let mut homeless: Session = create_test_staff_session();
    homeless.building_id = None;
    assert!(default_scope(&homeless).is_err());
}

#[tokio::test]
async fn test_list_bookings_uses_window() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_resident_session());

    list_bookings(&backend, &handle, BookingWindow::default())
        .await
        .unwrap();
    list_bookings(&backend, &handle, BookingWindow::All)
        .await
        .unwrap();

    assert_eq!(
        backend.calls(),
        vec![
            Call::Bookings(BookingScope::Unit(String::from("101")), true),
            Call::Bookings(BookingScope::Unit(String::from("101")), false),
        ]
    );
}

#[tokio::test]
async fn test_list_bookings_requires_session() {
    let backend: RecordingBackend = RecordingBackend::new();

    let err: ApiError = list_bookings(&backend, &SessionHandle::in_memory(), BookingWindow::All)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::NotAuthenticated);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_resident_cannot_list_other_resident() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_resident_session());

    assert!(
        list_resident_bookings(&backend, &handle, "11", BookingWindow::All)
            .await
            .is_ok()
    );
    let err: ApiError = list_resident_bookings(&backend, &handle, "33", BookingWindow::All)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn test_residents_are_staff_only() {
    let backend: RecordingBackend = RecordingBackend::new();

    let refused: ApiError = list_residents(
        &backend,
        &create_test_handle(create_test_resident_session()),
    )
    .await
    .unwrap_err();
    list_residents(&backend, &create_test_handle(create_test_staff_session()))
        .await
        .unwrap();

    assert!(matches!(refused, ApiError::Unauthorized { .. }));
    assert_eq!(backend.calls(), vec![Call::Residents(String::from("1"))]);
}

#[tokio::test]
async fn test_date_range_must_be_ordered() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_resident_session());

    let err: ApiError = bookings_in_range(
        &backend,
        &handle,
        "7",
        date!(2099 - 02 - 01),
        date!(2099 - 01 - 01),
    )
    .await
    .unwrap_err();
    bookings_in_range(
        &backend,
        &handle,
        "7",
        date!(2099 - 01 - 01),
        date!(2099 - 01 - 01),
    )
    .await
    .unwrap();

    assert!(err.is_local());
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn test_booking_details_render_notes_and_capabilities() {
    let mut booking: Booking = create_test_booking(BookingStatus::PendingApproval);
    booking.notes = Some(String::from(
        "Ada Lovelace [3/7/2026, 2:05:09 PM]: Birthday\n\nfree text",
    ));
    let backend: RecordingBackend = RecordingBackend {
        booking: Some(booking),
        ..RecordingBackend::default()
    };
    let handle: SessionHandle = create_test_handle(create_test_staff_session());

    let details: BookingDetails = booking_details(&backend, &handle, "42").await.unwrap();

    assert_eq!(details.notes.len(), 2);
    assert!(matches!(&details.notes[0], NoteLine::Attributed { body, .. } if body == "Birthday"));
    assert_eq!(details.notes[1], NoteLine::Plain(String::from("free text")));
    assert!(details.capabilities.can_confirm.is_allowed());
}

#[tokio::test]
async fn test_building_calendar_projects_bookings() {
    let backend: RecordingBackend = RecordingBackend {
        bookings: vec![create_test_booking(BookingStatus::Confirmed)],
        ..RecordingBackend::default()
    };
    let handle: SessionHandle = create_test_handle(create_test_staff_session());

    let events: Vec<CalendarEvent> = building_calendar(&backend, &handle, BookingWindow::All)
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Party Room - Unit 1204");
    assert_eq!(
        backend.calls(),
        vec![Call::Bookings(BookingScope::Building(String::from("1")), false)]
    );
}

// ============================================================================
// Amenities
// ============================================================================

#[tokio::test]
async fn test_list_amenities_for_session_building() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_resident_session());

    let amenities: Vec<Amenity> = list_amenities(&backend, &handle).await.unwrap();

    assert_eq!(amenities.len(), 1);
    assert_eq!(backend.calls(), vec![Call::Amenities(String::from("1"))]);
}

#[tokio::test]
async fn test_create_amenity_sends_defaults_for_blank_fields() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_staff_session());

    create_amenity(&backend, &handle, &create_test_amenity_form())
        .await
        .unwrap();

    let calls: Vec<Call> = backend.calls();
    let Call::CreateAmenity(request) = &calls[0] else {
        panic!("expected a create amenity call");
    };
    assert!(request.amenity_id.is_none());
    assert_eq!(request.building_id.as_deref(), Some("1"));
    assert_eq!(request.max_capacity, None);
    assert!((request.min_booking_duration - 0.0).abs() < f64::EPSILON);
    assert!((request.max_booking_duration - 2.0).abs() < f64::EPSILON);
    assert_eq!(request.created_by.as_deref(), Some("2"));
    assert_eq!(request.updated_by, "2");
}

#[tokio::test]
async fn test_invalid_amenity_form_makes_no_call() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_staff_session());
    let mut form: AmenityForm = create_test_amenity_form();
    form.amenity_name = String::new();
    form.closing_time = String::from("05:00");

    let err: ApiError = create_amenity(&backend, &handle, &form)
        .await
        .unwrap_err();

    let ApiError::InvalidForm { errors } = err else {
        panic!("expected a form error");
    };
    assert!(errors.contains_key("amenityName"));
    assert_eq!(
        errors.get("closingTime").map(String::as_str),
        Some("Closing time must be after opening time")
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_resident_cannot_manage_amenities() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_resident_session());

    let err: ApiError = create_amenity(&backend, &handle, &create_test_amenity_form())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_update_amenity_keeps_creator() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = create_test_handle(create_test_staff_session());
    let mut amenity: Amenity = create_test_amenity();
    amenity.created_by = Some(String::from("5"));
    let mut form: AmenityForm = AmenityForm::from_amenity(&amenity);
    form.price = String::from("25");

    update_amenity(&backend, &handle, &amenity, &form)
        .await
        .unwrap();

    let calls: Vec<Call> = backend.calls();
    let Call::UpdateAmenity(request) = &calls[0] else {
        panic!("expected an update amenity call");
    };
    assert_eq!(request.amenity_id.as_deref(), Some("7"));
    assert_eq!(request.created_by.as_deref(), Some("5"));
    assert_eq!(request.updated_by, "2");
    assert!((request.price - 25.0).abs() < f64::EPSILON);
}
