// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The remote system every booking rule ultimately defers to.

use crate::error::ApiError;
use crate::request_response::{
    AmenityRequest, BookingScope, CreateBookingRequest, LoginRequest, LoginResponse,
    UpdateBookingRequest,
};
use async_trait::async_trait;
use condo_core::AvailabilityQuery;
use condo_domain::{Amenity, Booking, Resident};
use time::Date;

/// Port to the property-management backend.
///
/// Implementations attach the current bearer token and clear the session on
/// a 401 answer.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchanges credentials for a login answer.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn amenities_by_building(&self, building_id: &str) -> Result<Vec<Amenity>, ApiError>;

    async fn amenity(&self, amenity_id: &str) -> Result<Amenity, ApiError>;

    async fn create_amenity(&self, request: &AmenityRequest) -> Result<(), ApiError>;

    async fn update_amenity(&self, request: &AmenityRequest) -> Result<(), ApiError>;

    async fn residents_by_building(&self, building_id: &str) -> Result<Vec<Resident>, ApiError>;

    /// Bookings for a scope, optionally restricted to upcoming ones.
    async fn bookings(
        &self,
        scope: &BookingScope,
        upcoming: bool,
    ) -> Result<Vec<Booking>, ApiError>;

    async fn booking(&self, booking_id: &str) -> Result<Booking, ApiError>;

    async fn bookings_in_range(
        &self,
        amenity_id: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Booking>, ApiError>;

    /// Returns false only if the backend reports the slot as taken.
    async fn check_availability(&self, query: &AvailabilityQuery) -> Result<bool, ApiError>;

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<(), ApiError>;

    async fn update_booking(&self, request: &UpdateBookingRequest) -> Result<(), ApiError>;

    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError>;
}
