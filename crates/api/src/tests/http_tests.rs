// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP backend tests against an in-process stub server.

use super::helpers::{create_test_handle, create_test_resident_session};
use crate::{
    ApiError, Backend, BookingScope, ClientConfig, CreateBookingRequest, HttpBackend,
    LoginRequest, LoginResponse, SessionHandle, UpdateBookingRequest,
};
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use condo_core::AvailabilityQuery;
use condo_domain::{Booking, BookingSlot, BookingStatus};
use serde_json::{Value, json};
use std::collections::HashMap;
use time::macros::{date, time};

type Params = Query<HashMap<String, String>>;

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map_or("", String::as_str)
}

async fn login(Json(body): Json<Value>) -> Response {
    match body["username"].as_str() {
        Some("ada") => Json(json!({
            "jwtToken": "resident-token",
            "roles": ["RESIDENT"],
            "userId": 11,
            "buildingId": 1,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "buildingName": "Harbour View",
            "unitId": "101",
            "isActive": true
        }))
        .into_response(),
        Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response(),
        Some("teapot") => StatusCode::IM_A_TEAPOT.into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn booking_by_id(headers: HeaderMap, Query(params): Params) -> Response {
    if bearer(&headers) != Some("Bearer resident-token") {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "Forbidden" }))).into_response();
    }
    Json(json!({
        "bookingId": param(&params, "bookingId").parse::<u32>().unwrap_or(0),
        "amenityId": 7,
        "amenityName": "Party Room",
        "unitId": 101,
        "bookingDate": "2099-01-01",
        "startTime": "09:00:00",
        "endTime": "10:00:00",
        "status": "PENDING_APPROVAL",
        "notes": null
    }))
    .into_response()
}

async fn expired() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

async fn server_error() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn overlap() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Slot overlaps another booking" })),
    )
        .into_response()
}

async fn availability(Query(params): Params) -> Json<Value> {
    let complete: bool = ["amenityId", "bookingDate", "endTime"]
        .iter()
        .all(|key| params.contains_key(*key));
    if complete && param(&params, "startTime") == "09:00" {
        Json(json!(false))
    } else {
        Json(json!({ "available": true }))
    }
}

async fn cancel(headers: HeaderMap, Query(params): Params) -> StatusCode {
    if bearer(&headers).is_some() && param(&params, "bookingId") == "42" {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn date_range(Query(params): Params) -> Response {
    if param(&params, "amenityId") == "7"
        && param(&params, "start") == "2099-01-01"
        && param(&params, "end") == "2099-01-31"
    {
        Json(json!([])).into_response()
    } else {
        StatusCode::BAD_REQUEST.into_response()
    }
}

fn create_test_router() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/amenitybookings/bookingid", get(booking_by_id))
        .route("/api/amenitybookings/upcoming/unitid", get(expired))
        .route("/api/amenitybookings/create", post(server_error))
        .route("/api/amenitybookings/update", put(overlap))
        .route("/api/amenitybookings/check-availability", get(availability))
        .route("/api/amenitybookings/cancel", put(cancel))
        .route("/api/amenitybookings/date-range", get(date_range))
}

async fn spawn_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_test_router()).await.unwrap();
    });
    format!("http://{address}/")
}

async fn create_test_backend(session: SessionHandle) -> HttpBackend {
    HttpBackend::new(ClientConfig::new(spawn_stub().await), session).unwrap()
}

fn create_test_login(username: &str) -> LoginRequest {
    LoginRequest {
        username: String::from(username),
        password: String::from("secret"),
    }
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_reads_numeric_ids() {
    let backend: HttpBackend = create_test_backend(SessionHandle::in_memory()).await;

    let response: LoginResponse = backend.login(&create_test_login("ada")).await.unwrap();

    assert_eq!(response.user_id, "11");
    assert_eq!(response.building_id.as_deref(), Some("1"));
    assert_eq!(response.unit_id.as_deref(), Some("101"));
    assert!(response.is_active);
}

#[tokio::test]
async fn test_login_maps_refusals() {
    let backend: HttpBackend = create_test_backend(SessionHandle::in_memory()).await;

    let refused: ApiError = backend
        .login(&create_test_login("mallory"))
        .await
        .unwrap_err();
    let crashed: ApiError = backend.login(&create_test_login("boom")).await.unwrap_err();
    let other: ApiError = backend
        .login(&create_test_login("teapot"))
        .await
        .unwrap_err();

    assert_eq!(refused.to_string(), "Invalid username or password");
    assert_eq!(crashed.to_string(), "Server error. Please try again later.");
    assert_eq!(other.to_string(), "Unable to login. Please try again.");
}

// ============================================================================
// Bearer token and 401
// ============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let backend: HttpBackend =
        create_test_backend(create_test_handle(create_test_resident_session())).await;

    let booking: Booking = backend.booking("42").await.unwrap();

    assert_eq!(booking.booking_id, "42");
    assert_eq!(booking.unit_id.as_deref(), Some("101"));
    assert_eq!(booking.start_time, time!(09:00));
    assert_eq!(booking.status, BookingStatus::PendingApproval);
}

#[tokio::test]
async fn test_request_without_session_uses_server_message() {
    let backend: HttpBackend = create_test_backend(SessionHandle::in_memory()).await;

    let err: ApiError = backend.booking("42").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Remote {
            status: 403,
            message: String::from("Forbidden"),
        }
    );
}

#[tokio::test]
async fn test_unauthorized_answer_clears_session() {
    let session: SessionHandle = create_test_handle(create_test_resident_session());
    let backend: HttpBackend = create_test_backend(session.clone()).await;

    let err: ApiError = backend
        .bookings(&BookingScope::Unit(String::from("101")), true)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::SessionExpired);
    assert!(session.current().is_none());
    assert!(session.token().is_none());
}

// ============================================================================
// Writes and fallbacks
// ============================================================================

#[tokio::test]
async fn test_error_without_body_uses_fallback_message() {
    let backend: HttpBackend =
        create_test_backend(create_test_handle(create_test_resident_session())).await;
    let request: CreateBookingRequest = CreateBookingRequest {
        amenity_id: String::from("7"),
        building_id: Some(String::from("1")),
        resident_id: Some(String::from("11")),
        unit_id: Some(String::from("101")),
        booking_date: date!(2099 - 01 - 01),
        start_time: time!(09:00),
        end_time: time!(10:00),
        notes: String::new(),
        status: BookingStatus::PendingApproval,
        created_by: String::from("11"),
        updated_by: String::from("11"),
    };

    let err: ApiError = backend.create_booking(&request).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Remote {
            status: 500,
            message: String::from("Failed to create booking"),
        }
    );
}

#[tokio::test]
async fn test_error_body_message_is_used_verbatim() {
    let backend: HttpBackend =
        create_test_backend(create_test_handle(create_test_resident_session())).await;
    let request: UpdateBookingRequest = UpdateBookingRequest {
        booking_id: String::from("42"),
        amenity_id: String::from("7"),
        booking_date: date!(2099 - 01 - 01),
        start_time: time!(09:00),
        end_time: time!(10:00),
        notes: String::from("A"),
        status: BookingStatus::Confirmed,
        updated_by: String::from("2"),
    };

    let err: ApiError = backend.update_booking(&request).await.unwrap_err();

    assert_eq!(err.to_string(), "Slot overlaps another booking");
}

#[tokio::test]
async fn test_cancel_sends_booking_id_as_query() {
    let backend: HttpBackend =
        create_test_backend(create_test_handle(create_test_resident_session())).await;

    backend.cancel_booking("42").await.unwrap();
}

#[tokio::test]
async fn test_availability_reads_bare_and_wrapped_answers() {
    let backend: HttpBackend =
        create_test_backend(create_test_handle(create_test_resident_session())).await;
    let taken: AvailabilityQuery = AvailabilityQuery {
        amenity_id: String::from("7"),
        slot: BookingSlot::new(date!(2099 - 01 - 01), time!(09:00), time!(10:00)),
    };
    let free: AvailabilityQuery = AvailabilityQuery {
        amenity_id: String::from("7"),
        slot: BookingSlot::new(date!(2099 - 01 - 01), time!(10:00), time!(11:00)),
    };

    assert!(!backend.check_availability(&taken).await.unwrap());
    assert!(backend.check_availability(&free).await.unwrap());
}

#[tokio::test]
async fn test_date_range_formats_dates() {
    let backend: HttpBackend =
        create_test_backend(create_test_handle(create_test_resident_session())).await;

    let bookings: Vec<Booking> = backend
        .bookings_in_range("7", date!(2099 - 01 - 01), date!(2099 - 01 - 31))
        .await
        .unwrap();

    assert!(bookings.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let backend: HttpBackend = HttpBackend::new(
        ClientConfig::new(format!("http://{address}")),
        SessionHandle::in_memory(),
    )
    .unwrap();

    let err: ApiError = backend.booking("42").await.unwrap_err();

    assert_eq!(err, ApiError::Connection);
    assert_eq!(err.to_string(), "Unable to connect to the server.");
}
