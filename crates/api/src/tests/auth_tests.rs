// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, logout and role gate tests.

use super::helpers::{
    Call, RecordingBackend, create_test_handle, create_test_resident_session,
    create_test_staff_session,
};
use crate::{
    ApiError, AuthenticationService, AuthorizationService, LoginResponse, Role, Session,
    SessionHandle,
};

fn create_test_login_response(is_active: bool) -> LoginResponse {
    LoginResponse {
        jwt_token: String::from("resident-token"),
        roles: vec![String::from("RESIDENT")],
        user_id: String::from("11"),
        building_id: Some(String::from("1")),
        first_name: Some(String::from("Ada")),
        last_name: Some(String::from("Lovelace")),
        building_name: None,
        unit_id: Some(String::from("101")),
        is_active,
    }
}

#[tokio::test]
async fn test_login_installs_session() {
    let backend: RecordingBackend = RecordingBackend {
        login_response: Some(create_test_login_response(true)),
        ..RecordingBackend::default()
    };
    let handle: SessionHandle = SessionHandle::in_memory();

    let session: Session = AuthenticationService::login(&backend, &handle, "ada", "secret")
        .await
        .unwrap();

    assert_eq!(session.display_name(), "Ada Lovelace");
    assert_eq!(handle.token().as_deref(), Some("resident-token"));
    assert_eq!(backend.calls(), vec![Call::Login(String::from("ada"))]);
}

#[tokio::test]
async fn test_login_refuses_inactive_account() {
    let backend: RecordingBackend = RecordingBackend {
        login_response: Some(create_test_login_response(false)),
        ..RecordingBackend::default()
    };
    let handle: SessionHandle = SessionHandle::in_memory();

    let err: ApiError = AuthenticationService::login(&backend, &handle, "ada", "secret")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::AccountInactive);
    assert_eq!(
        err.to_string(),
        "Your account is not active. Please contact an administrator."
    );
    assert!(handle.current().is_none());
}

#[tokio::test]
async fn test_failed_login_leaves_no_session() {
    let backend: RecordingBackend = RecordingBackend::new();
    let handle: SessionHandle = SessionHandle::in_memory();

    let err: ApiError = AuthenticationService::login(&backend, &handle, "ada", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::InvalidCredentials);
    assert!(handle.current().is_none());
}

#[test]
fn test_logout_clears_session() {
    let handle: SessionHandle = create_test_handle(create_test_resident_session());

    AuthenticationService::logout(&handle);

    assert!(handle.current().is_none());
    assert_eq!(handle.require().unwrap_err(), ApiError::NotAuthenticated);
}

#[test]
fn test_roles_parse_and_rank() {
    assert_eq!(Role::parse_str("ADMIN"), Role::Admin);
    assert_eq!(Role::parse_str("BUILDING MANAGER"), Role::BuildingManager);
    assert_eq!(Role::parse_str("CONCIERGE"), Role::Resident);
    assert!(Role::BuildingManager.is_staff());
    assert!(!Role::Resident.is_staff());

    let mut session: Session = create_test_resident_session();
    session.roles.push(String::from("ADMIN"));
    assert_eq!(session.primary_role(), Role::Admin);
    assert!(session.is_staff());
}

#[test]
fn test_staff_gates_accept_building_manager() {
    let staff: Session = create_test_staff_session();

    assert!(AuthorizationService::authorize_manage_amenities(&staff).is_ok());
    assert!(AuthorizationService::authorize_confirm_booking(&staff).is_ok());
    assert!(AuthorizationService::authorize_reject_booking(&staff).is_ok());
    assert!(AuthorizationService::authorize_set_status(&staff).is_ok());
    assert!(AuthorizationService::authorize_book_for_resident(&staff).is_ok());
    assert!(AuthorizationService::authorize_list_residents(&staff).is_ok());
    assert!(AuthorizationService::authorize_view_building_bookings(&staff).is_ok());
}

#[test]
fn test_staff_gates_reject_resident() {
    let resident: Session = create_test_resident_session();

    let err: ApiError = AuthorizationService::authorize_confirm_booking(&resident).unwrap_err();

    assert_eq!(
        err,
        ApiError::Unauthorized {
            action: String::from("confirm_booking"),
            required_role: String::from("ADMIN or BUILDING MANAGER"),
        }
    );
    assert!(AuthorizationService::authorize_manage_amenities(&resident).is_err());
    assert!(AuthorizationService::authorize_list_residents(&resident).is_err());
}
