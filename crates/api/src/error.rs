// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Every booking-flow failure ends up as an [`ApiError`] whose `Display`
//! output is the message shown inline to the user. None of them are fatal;
//! retrying the action is always possible.

use condo_core::CoreError;
use condo_domain::DomainError;
use std::collections::BTreeMap;
use thiserror::Error;

/// API-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A local rule refused the action before any network call.
    #[error("{message}")]
    Validation {
        /// Stable rule name, for logs.
        rule: String,
        /// The message shown to the user.
        message: String,
    },
    /// One or more form fields are invalid. No network call was made.
    #[error("Please correct the highlighted fields")]
    InvalidForm {
        /// Message per field name.
        errors: BTreeMap<String, String>,
    },
    /// The backend refused the request.
    #[error("{message}")]
    Remote {
        /// The HTTP status code.
        status: u16,
        /// The server message, or the operation's fallback message.
        message: String,
    },
    /// The backend could not be reached.
    #[error("Unable to connect to the server.")]
    Connection,
    /// The backend answered 401; the local session has been cleared.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    /// No session is present.
    #[error("Please log in to continue.")]
    NotAuthenticated,
    /// Login was refused.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Login succeeded but the account is disabled.
    #[error("Your account is not active. Please contact an administrator.")]
    AccountInactive,
    /// The signed-in role may not perform this action.
    #[error("'{action}' requires the {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The availability check reported the slot as taken.
    #[error("Selected slot is not available")]
    SlotUnavailable,
    /// Another create/update/cancel/confirm/reject is still in flight.
    #[error("Another request is already in progress")]
    Busy,
    /// The backend answered with a body that could not be read.
    #[error("Unexpected response from server: {message}")]
    Decode {
        /// The decoder message.
        message: String,
    },
    /// The HTTP client could not be built from the configuration.
    #[error("Invalid client configuration: {message}")]
    Configuration {
        /// The builder message.
        message: String,
    },
    /// The session could not be persisted or loaded.
    #[error("Session storage failed: {message}")]
    Storage {
        /// The I/O or encoding message.
        message: String,
    },
}

impl ApiError {
    /// Returns true if the failure happened before anything was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidForm { .. }
                | Self::NotAuthenticated
                | Self::Unauthorized { .. }
                | Self::Busy
        )
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let rule: &str = match &err {
        DomainError::BookingInPast => "future_only",
        DomainError::EndNotAfterStart => "end_after_start",
        DomainError::BelowMinimumDuration { .. } => "minimum_duration",
        DomainError::AboveMaximumDuration { .. } => "maximum_duration",
        DomainError::OutsideOperatingHours { .. } => "operating_hours",
        DomainError::AmenityNotBookable { .. } => "amenity_bookable",
        DomainError::IncompleteSlot => "complete_slot",
        DomainError::InvalidDate { .. } => "date_format",
        DomainError::InvalidTime { .. } => "time_format",
        DomainError::NoteRequired { .. } => "note_required",
        DomainError::EmptyNote => "note_not_empty",
        DomainError::InvalidStatus { .. } => "known_status",
        DomainError::InvalidStatusTransition { .. } => "status_lifecycle",
        DomainError::StatusNotSelectable { .. } => "selectable_status",
        DomainError::BookingNotCancellable { .. } => "cancellable",
        DomainError::BookingNotEditable { .. } => "editable",
    };
    ApiError::Validation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_error) => translate_domain_error(domain_error),
        CoreError::StaffOnly { action } => ApiError::Unauthorized {
            action: action.to_string(),
            required_role: String::from("ADMIN or BUILDING MANAGER"),
        },
    }
}
