// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `reqwest` implementation of [`Backend`].

use crate::backend::Backend;
use crate::error::ApiError;
use crate::request_response::{
    AmenityRequest, BookingScope, CreateBookingRequest, ErrorBody, LoginRequest, LoginResponse,
    UpdateBookingRequest, read_availability,
};
use crate::session::SessionHandle;
use async_trait::async_trait;
use condo_core::AvailabilityQuery;
use condo_domain::{
    Amenity, Booking, Resident, format_calendar_date, format_wall_clock,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use time::Date;
use tracing::{debug, warn};

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub user_agent: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: format!("condo-hub/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// Talks to the backend over HTTP with the session's bearer token.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
    session: SessionHandle,
}

impl HttpBackend {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, session: SessionHandle) -> Result<Self, ApiError> {
        let client: Client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Configuration {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and maps every non-success answer to an `ApiError`.
    ///
    /// A 401 clears the session before returning.
    async fn execute(&self, builder: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        let response: Response = self.authorize(builder).send().await.map_err(|e| {
            warn!(error = %e, "Backend unreachable");
            ApiError::Connection
        })?;

        let status: StatusCode = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend answered 401, clearing session");
            self.session.clear();
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            let message: String = error_message(response, fallback).await;
            debug!(status = status.as_u16(), %message, "Backend refused request");
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        self.execute(builder, fallback)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode {
                message: e.to_string(),
            })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.config.url(path))
    }
}

async fn error_message(response: Response, fallback: &str) -> String {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: Response = self
            .client
            .post(self.config.url("/api/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Backend unreachable during login");
                ApiError::Connection
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ApiError::InvalidCredentials),
            StatusCode::INTERNAL_SERVER_ERROR => Err(ApiError::Remote {
                status: 500,
                message: String::from("Server error. Please try again later."),
            }),
            status if status.is_success() => {
                response
                    .json::<LoginResponse>()
                    .await
                    .map_err(|e| ApiError::Decode {
                        message: e.to_string(),
                    })
            }
            status => Err(ApiError::Remote {
                status: status.as_u16(),
                message: error_message(response, "Unable to login. Please try again.").await,
            }),
        }
    }

    async fn amenities_by_building(&self, building_id: &str) -> Result<Vec<Amenity>, ApiError> {
        self.fetch(
            self.get("/api/amenities/buildingid")
                .query(&[("buildingId", building_id)]),
            "Getting Amenities Failed!",
        )
        .await
    }

    async fn amenity(&self, amenity_id: &str) -> Result<Amenity, ApiError> {
        self.fetch(
            self.get("/api/amenities/amenityid")
                .query(&[("amenityId", amenity_id)]),
            "Getting Amenities Failed!",
        )
        .await
    }

    async fn create_amenity(&self, request: &AmenityRequest) -> Result<(), ApiError> {
        self.execute(
            self.client
                .post(self.config.url("/api/amenities/create"))
                .json(request),
            "Creation failed",
        )
        .await
        .map(drop)
    }

    async fn update_amenity(&self, request: &AmenityRequest) -> Result<(), ApiError> {
        self.execute(
            self.client
                .put(self.config.url("/api/amenities/update"))
                .json(request),
            "Update failed",
        )
        .await
        .map(drop)
    }

    async fn residents_by_building(&self, building_id: &str) -> Result<Vec<Resident>, ApiError> {
        self.fetch(
            self.get("/api/residents/buildingid")
                .query(&[("buildingId", building_id)]),
            "Failed to fetch residents",
        )
        .await
    }

    async fn bookings(
        &self,
        scope: &BookingScope,
        upcoming: bool,
    ) -> Result<Vec<Booking>, ApiError> {
        let (segment, key): (&str, &str) = scope.key();
        let path: String = if upcoming {
            format!("/api/amenitybookings/upcoming/{segment}")
        } else {
            format!("/api/amenitybookings/{segment}")
        };
        self.fetch(
            self.get(&path).query(&[(key, scope.id())]),
            scope.fallback_message(upcoming),
        )
        .await
    }

    async fn booking(&self, booking_id: &str) -> Result<Booking, ApiError> {
        self.fetch(
            self.get("/api/amenitybookings/bookingid")
                .query(&[("bookingId", booking_id)]),
            "Failed to fetch booking details",
        )
        .await
    }

    async fn bookings_in_range(
        &self,
        amenity_id: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Booking>, ApiError> {
        let start: String = format_calendar_date(start);
        let end: String = format_calendar_date(end);
        self.fetch(
            self.get("/api/amenitybookings/date-range").query(&[
                ("amenityId", amenity_id),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ]),
            "Failed to fetch bookings by date range",
        )
        .await
    }

    async fn check_availability(&self, query: &AvailabilityQuery) -> Result<bool, ApiError> {
        let booking_date: String = format_calendar_date(query.slot.date);
        let start_time: String = format_wall_clock(query.slot.start_time);
        let end_time: String = format_wall_clock(query.slot.end_time);
        let answer: serde_json::Value = self
            .fetch(
                self.get("/api/amenitybookings/check-availability")
                    .query(&[
                        ("amenityId", query.amenity_id.as_str()),
                        ("bookingDate", booking_date.as_str()),
                        ("startTime", start_time.as_str()),
                        ("endTime", end_time.as_str()),
                    ]),
                "Failed to check availability",
            )
            .await?;
        Ok(read_availability(&answer))
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> Result<(), ApiError> {
        self.execute(
            self.client
                .post(self.config.url("/api/amenitybookings/create"))
                .json(request),
            "Failed to create booking",
        )
        .await
        .map(drop)
    }

    async fn update_booking(&self, request: &UpdateBookingRequest) -> Result<(), ApiError> {
        self.execute(
            self.client
                .put(self.config.url("/api/amenitybookings/update"))
                .json(request),
            "Failed to update booking",
        )
        .await
        .map(drop)
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError> {
        self.execute(
            self.client
                .put(self.config.url("/api/amenitybookings/cancel"))
                .query(&[("bookingId", booking_id)]),
            "Failed to cancel booking",
        )
        .await
        .map(drop)
    }
}
