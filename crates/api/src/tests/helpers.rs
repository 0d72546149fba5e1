// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{
    AmenityRequest, ApiError, Backend, BookingScope, BookingWorkflow, CreateBookingRequest,
    FixedClock, LoginRequest, LoginResponse, Session, SessionHandle, UpdateBookingRequest,
};
use async_trait::async_trait;
use condo_core::AvailabilityQuery;
use condo_domain::{Amenity, Booking, BookingForm, BookingStatus, Resident};
use std::sync::{Arc, Mutex};
use time::macros::{date, datetime, time};
use time::{Date, OffsetDateTime};
use tokio::sync::Notify;

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-10 12:00:00 UTC)
}

pub fn create_test_resident_session() -> Session {
    Session {
        token: String::from("resident-token"),
        user_id: String::from("11"),
        building_id: Some(String::from("1")),
        unit_id: Some(String::from("101")),
        first_name: String::from("Ada"),
        last_name: String::from("Lovelace"),
        building_name: Some(String::from("Harbour View")),
        roles: vec![String::from("RESIDENT")],
    }
}

pub fn create_test_staff_session() -> Session {
    Session {
        token: String::from("staff-token"),
        user_id: String::from("2"),
        building_id: Some(String::from("1")),
        unit_id: None,
        first_name: String::from("Grace"),
        last_name: String::from("Hopper"),
        building_name: Some(String::from("Harbour View")),
        roles: vec![String::from("BUILDING MANAGER")],
    }
}

pub fn create_test_handle(session: Session) -> SessionHandle {
    let handle: SessionHandle = SessionHandle::in_memory();
    handle.set(session).unwrap();
    handle
}

/// Free, approval-required amenity open 08:00-20:00 for 1 to 4 hours.
pub fn create_test_amenity() -> Amenity {
    Amenity {
        amenity_id: String::from("7"),
        building_id: Some(String::from("1")),
        amenity_name: String::from("Party Room"),
        description: Some(String::from("Room with a view")),
        price: 0.0,
        opening_time: Some(time!(08:00)),
        closing_time: Some(time!(20:00)),
        is_bookable: true,
        is_active: true,
        max_capacity: Some(30),
        min_booking_duration: Some(1.0),
        max_booking_duration: Some(4.0),
        requires_approval: true,
        created_by: Some(String::from("2")),
    }
}

pub fn create_test_booking(status: BookingStatus) -> Booking {
    Booking {
        booking_id: String::from("42"),
        amenity_id: String::from("7"),
        amenity_name: Some(String::from("Party Room")),
        building_id: Some(String::from("1")),
        resident_id: Some(String::from("11")),
        unit_id: Some(String::from("101")),
        unit_number: Some(String::from("1204")),
        booked_by_resident: Some(String::from("Ada Lovelace")),
        booking_date: date!(2099 - 01 - 01),
        start_time: time!(09:00),
        end_time: time!(10:00),
        status,
        notes: Some(String::from("A")),
        created_by: Some(String::from("11")),
        updated_by: Some(String::from("11")),
        created_by_name: None,
        updated_by_name: None,
    }
}

pub fn create_test_form(date: &str, start: &str, end: &str) -> BookingForm {
    BookingForm {
        booking_date: String::from(date),
        start_time: String::from(start),
        end_time: String::from(end),
        ..BookingForm::default()
    }
}

/// One backend call as seen by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Amenities(String),
    Amenity(String),
    CreateAmenity(AmenityRequest),
    UpdateAmenity(AmenityRequest),
    Residents(String),
    Bookings(BookingScope, bool),
    Booking(String),
    BookingsInRange(String, Date, Date),
    Availability(AvailabilityQuery),
    CreateBooking(CreateBookingRequest),
    UpdateBooking(UpdateBookingRequest),
    CancelBooking(String),
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Mutex<Vec<Call>>,
    /// Answer of the availability check. Defaults to available.
    pub slot_taken: bool,
    /// Returned from every write instead of success.
    pub write_error: Option<ApiError>,
    /// Answer to login.
    pub login_response: Option<LoginResponse>,
    pub booking: Option<Booking>,
    pub bookings: Vec<Booking>,
    /// Availability checks wait for this before answering.
    pub gate: Option<Arc<Notify>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<(), ApiError> {
        self.write_error.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record(Call::Login(request.username.clone()));
        self.login_response
            .clone()
            .ok_or(ApiError::InvalidCredentials)
    }

    async fn amenities_by_building(&self, building_id: &str) -> Result<Vec<Amenity>, ApiError> {
        self.record(Call::Amenities(building_id.to_string()));
        Ok(vec![create_test_amenity()])
    }

    async fn amenity(&self, amenity_id: &str) -> Result<Amenity, ApiError> {
        self.record(Call::Amenity(amenity_id.to_string()));
        Ok(create_test_amenity())
    }

    async fn create_amenity(&self, request: &AmenityRequest) -> Result<(), ApiError> {
        self.record(Call::CreateAmenity(request.clone()));
        self.write_result()
    }

    async fn update_amenity(&self, request: &AmenityRequest) -> Result<(), ApiError> {
        self.record(Call::UpdateAmenity(request.clone()));
        self.write_result()
    }

    async fn residents_by_building(&self, building_id: &str) -> Result<Vec<Resident>, ApiError> {
        self.record(Call::Residents(building_id.to_string()));
        Ok(Vec::new())
    }

    async fn bookings(
        &self,
        scope: &BookingScope,
        upcoming: bool,
    ) -> Result<Vec<Booking>, ApiError> {
        self.record(Call::Bookings(scope.clone(), upcoming));
        Ok(self.bookings.clone())
    }

    async fn booking(&self, booking_id: &str) -> Result<Booking, ApiError> {
        self.record(Call::Booking(booking_id.to_string()));
        self.booking.clone().ok_or(ApiError::Remote {
            status: 404,
            message: String::from("Failed to fetch booking details"),
        })
    }

    async fn bookings_in_range(
        &self,
        amenity_id: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Booking>, ApiError> {
        self.record(Call::BookingsInRange(amenity_id.to_string(), start, end));
        Ok(self.bookings.clone())
    }

    async fn check_availability(&self, query: &AvailabilityQuery) -> Result<bool, ApiError> {
        self.record(Call::Availability(query.clone()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(!self.slot_taken)
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<(), ApiError> {
        self.record(Call::CreateBooking(request.clone()));
        self.write_result()
    }

    async fn update_booking(&self, request: &UpdateBookingRequest) -> Result<(), ApiError> {
        self.record(Call::UpdateBooking(request.clone()));
        self.write_result()
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError> {
        self.record(Call::CancelBooking(booking_id.to_string()));
        self.write_result()
    }
}

pub fn create_test_workflow(
    backend: &Arc<RecordingBackend>,
    session: Session,
) -> BookingWorkflow {
    BookingWorkflow::new(
        Arc::clone(backend) as Arc<dyn Backend>,
        create_test_handle(session),
        Arc::new(FixedClock(create_test_now())),
    )
}
