// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use crate::backend::Backend;
use crate::error::ApiError;
use crate::request_response::{LoginRequest, LoginResponse};
use crate::session::{Role, Session, SessionHandle};
use tracing::{info, warn};

/// Role checks for staff-only actions.
///
/// These gate what the client offers. The backend still enforces its own
/// authorization on every request.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_staff(session: &Session, action: &str) -> Result<(), ApiError> {
        if session.is_staff() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required_role: format!("{} or {}", Role::Admin, Role::BuildingManager),
            })
        }
    }

    /// Checks if a session may create or edit amenities.
    ///
    /// Only administrators and building managers may manage amenities.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_manage_amenities(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "manage_amenities")
    }

    /// Checks if a session may confirm a booking.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_confirm_booking(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "confirm_booking")
    }

    /// Checks if a session may reject a booking.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_reject_booking(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "reject_booking")
    }

    /// Checks if a session may pick a booking status directly.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_set_status(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "set_status")
    }

    /// Checks if a session may book on behalf of another resident.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_book_for_resident(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "book_for_resident")
    }

    /// Checks if a session may list the building's residents.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_list_residents(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "list_residents")
    }

    /// Checks if a session may see every booking in the building.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for residents.
    pub fn authorize_view_building_bookings(session: &Session) -> Result<(), ApiError> {
        Self::require_staff(session, "view_building_bookings")
    }
}

/// Login and logout.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Exchanges credentials for a session and installs it.
    ///
    /// # Arguments
    ///
    /// * `backend` - The backend to authenticate against
    /// * `session` - The handle the new session is installed in
    /// * `username` - The login name
    /// * `password` - The password
    ///
    /// # Returns
    ///
    /// The installed session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidCredentials` if the backend refuses the
    /// credentials, `ApiError::AccountInactive` if the account is disabled,
    /// or the transport error otherwise. A session that cannot be persisted
    /// is still installed and the storage error is only logged.
    pub async fn login(
        backend: &dyn Backend,
        session: &SessionHandle,
        username: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let request: LoginRequest = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = backend.login(&request).await.inspect_err(|e| {
            warn!(username = %username, error = %e, "Login failed");
        })?;
        let Some(granted) = response.into_session() else {
            warn!(username = %username, "Login refused for inactive account");
            return Err(ApiError::AccountInactive);
        };
        if let Err(e) = session.set(granted.clone()) {
            warn!(error = %e, "Session could not be persisted");
        }
        info!(user_id = %granted.user_id, username = %username, "Logged in");
        Ok(granted)
    }

    /// Drops the current session.
    pub fn logout(session: &SessionHandle) {
        session.clear();
    }
}
