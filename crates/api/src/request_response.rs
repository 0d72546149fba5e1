// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response bodies exchanged with the backend.

use crate::session::Session;
use condo_core::{BookingUpdate, NewBooking};
use condo_domain::wire::{calendar_date, flexible_id, flexible_id_option, wall_clock};
use condo_domain::{AmenityDraft, BookingStatus};
use serde::{Deserialize, Serialize};
use time::{Date, Time};

/// Credentials for `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Answer to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub user_id: String,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub building_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl LoginResponse {
    /// Builds the session this login grants. Inactive accounts get none.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        if !self.is_active {
            return None;
        }
        Some(Session {
            token: self.jwt_token,
            user_id: self.user_id,
            building_id: self.building_id,
            unit_id: self.unit_id,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            building_name: self.building_name,
            roles: self.roles,
        })
    }
}

/// Body of `POST /api/amenitybookings/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub amenity_id: String,
    pub building_id: Option<String>,
    pub resident_id: Option<String>,
    pub unit_id: Option<String>,
    #[serde(with = "calendar_date")]
    pub booking_date: Date,
    #[serde(with = "wall_clock")]
    pub start_time: Time,
    #[serde(with = "wall_clock")]
    pub end_time: Time,
    pub notes: String,
    pub status: BookingStatus,
    pub created_by: String,
    pub updated_by: String,
}

impl From<NewBooking> for CreateBookingRequest {
    fn from(booking: NewBooking) -> Self {
        Self {
            amenity_id: booking.amenity_id,
            building_id: booking.building_id,
            resident_id: booking.resident_id,
            unit_id: booking.unit_id,
            booking_date: booking.booking_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            notes: booking.notes,
            status: booking.status,
            created_by: booking.created_by,
            updated_by: booking.updated_by,
        }
    }
}

/// Body of `PUT /api/amenitybookings/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub booking_id: String,
    pub amenity_id: String,
    #[serde(with = "calendar_date")]
    pub booking_date: Date,
    #[serde(with = "wall_clock")]
    pub start_time: Time,
    #[serde(with = "wall_clock")]
    pub end_time: Time,
    pub notes: String,
    pub status: BookingStatus,
    pub updated_by: String,
}

impl From<BookingUpdate> for UpdateBookingRequest {
    fn from(update: BookingUpdate) -> Self {
        Self {
            booking_id: update.booking_id,
            amenity_id: update.amenity_id,
            booking_date: update.booking_date,
            start_time: update.start_time,
            end_time: update.end_time,
            notes: update.notes,
            status: update.status,
            updated_by: update.updated_by,
        }
    }
}

/// Body of the amenity create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenity_id: Option<String>,
    pub building_id: Option<String>,
    pub amenity_name: String,
    pub description: String,
    pub price: f64,
    #[serde(with = "wall_clock")]
    pub opening_time: Time,
    #[serde(with = "wall_clock")]
    pub closing_time: Time,
    pub is_bookable: bool,
    pub is_active: bool,
    pub max_capacity: Option<u32>,
    pub min_booking_duration: f64,
    pub max_booking_duration: f64,
    pub requires_approval: bool,
    pub created_by: Option<String>,
    pub updated_by: String,
}

impl AmenityRequest {
    /// Builds the request from a validated draft.
    #[must_use]
    pub fn from_draft(
        draft: AmenityDraft,
        amenity_id: Option<String>,
        building_id: Option<String>,
        created_by: Option<String>,
        updated_by: String,
    ) -> Self {
        Self {
            amenity_id,
            building_id,
            amenity_name: draft.amenity_name,
            description: draft.description,
            price: draft.price,
            opening_time: draft.opening_time,
            closing_time: draft.closing_time,
            is_bookable: draft.is_bookable,
            is_active: draft.is_active,
            max_capacity: draft.max_capacity,
            min_booking_duration: draft.min_booking_duration,
            max_booking_duration: draft.max_booking_duration,
            requires_approval: draft.requires_approval,
            created_by,
            updated_by,
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Which bookings a listing is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingScope {
    Building(String),
    Amenity(String),
    Resident(String),
    Unit(String),
}

impl BookingScope {
    /// The path segment and query key for the scope.
    #[must_use]
    pub const fn key(&self) -> (&'static str, &'static str) {
        match self {
            Self::Building(_) => ("buildingid", "buildingId"),
            Self::Amenity(_) => ("amenityid", "amenityId"),
            Self::Resident(_) => ("residentid", "residentId"),
            Self::Unit(_) => ("unitid", "unitId"),
        }
    }

    /// The id the scope is keyed by.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Building(id) | Self::Amenity(id) | Self::Resident(id) | Self::Unit(id) => id,
        }
    }

    /// Fallback message when the backend gives none.
    #[must_use]
    pub const fn fallback_message(&self, upcoming: bool) -> &'static str {
        match (self, upcoming) {
            (Self::Building(_), false) => "Failed to fetch building bookings",
            (Self::Building(_), true) => "Failed to fetch upcoming building bookings",
            (Self::Amenity(_), false) => "Failed to fetch amenity bookings",
            (Self::Amenity(_), true) => "Failed to fetch upcoming amenity bookings",
            (Self::Resident(_), false) => "Failed to fetch resident bookings",
            (Self::Resident(_), true) => "Failed to fetch upcoming resident bookings",
            (Self::Unit(_), false) => "Failed to fetch unit bookings",
            (Self::Unit(_), true) => "Failed to fetch upcoming unit bookings",
        }
    }
}

/// Reads the availability answer.
///
/// The backend answers with a bare boolean or an object carrying one. Only an
/// explicit `false` marks the slot as taken.
#[must_use]
pub fn read_availability(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(available) => *available,
        serde_json::Value::String(text) => !text.trim().eq_ignore_ascii_case("false"),
        serde_json::Value::Object(map) => ["available", "isAvailable"]
            .iter()
            .find_map(|key| map.get(*key))
            .is_none_or(read_availability),
        _ => true,
    }
}
