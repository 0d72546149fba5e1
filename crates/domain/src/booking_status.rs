// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! Statuses are ordered only by the transition graph below, never by
//! magnitude. `Completed` is set by the backend once a booking has taken
//! place; the client never moves a booking into it.
//!
//! ```text
//! PENDING_PAYMENT ──┬──> CONFIRMED ──> CANCELLED
//! PENDING_APPROVAL ─┼──> REJECTED
//!                   └──> CANCELLED
//! ```

use crate::amenity::Amenity;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The state a booking occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Paid amenity; waiting for payment before confirmation.
    PendingPayment,
    /// Free amenity that requires staff approval.
    PendingApproval,
    /// The slot is held for the resident.
    Confirmed,
    /// Withdrawn by the resident or staff. Terminal.
    Cancelled,
    /// Declined by staff. Terminal.
    Rejected,
    /// The booking took place. Terminal.
    Completed,
}

/// Visual emphasis used when presenting a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Confirmed bookings.
    Success,
    /// Bookings awaiting payment or a decision.
    Warning,
    /// Cancelled or rejected bookings.
    Error,
    /// Completed bookings.
    Info,
}

impl BookingStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PendingPayment,
        Self::PendingApproval,
        Self::Confirmed,
        Self::Cancelled,
        Self::Rejected,
        Self::Completed,
    ];

    /// Statuses offered by the admin status selector when editing a booking.
    pub const SELECTABLE: [Self; 4] = [
        Self::Confirmed,
        Self::PendingPayment,
        Self::Cancelled,
        Self::Rejected,
    ];

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "PENDING_PAYMENT",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Human label used by the status selector.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PendingPayment => "Pending Payment/Approval",
            Self::PendingApproval => "Pending Approval",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
            Self::Completed => "Completed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                status: s.to_string(),
            })
    }

    /// Selects the status a new booking starts in.
    ///
    /// Rules are evaluated in order:
    /// 1. A priced amenity always starts in `PendingPayment`.
    /// 2. A free amenity that requires approval starts in `PendingApproval`.
    /// 3. Everything else is `Confirmed` immediately.
    #[must_use]
    pub fn initial_for(amenity: &Amenity) -> Self {
        if amenity.is_paid() {
            Self::PendingPayment
        } else if amenity.requires_approval {
            Self::PendingApproval
        } else {
            Self::Confirmed
        }
    }

    /// Returns true if no client action may move the booking out of this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Rejected | Self::Completed)
    }

    /// Returns true if the booking is waiting on payment or a staff decision.
    #[must_use]
    pub const fn is_awaiting_decision(&self) -> bool {
        matches!(self, Self::PendingPayment | Self::PendingApproval)
    }

    /// Cancellation is offered for every non-terminal status.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the admin status selector offers this status.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::PendingPayment | Self::Cancelled | Self::Rejected
        )
    }

    #[must_use]
    pub const fn tone(&self) -> StatusTone {
        match self {
            Self::Confirmed => StatusTone::Success,
            Self::PendingPayment | Self::PendingApproval => StatusTone::Warning,
            Self::Cancelled | Self::Rejected => StatusTone::Error,
            Self::Completed => StatusTone::Info,
        }
    }

    /// Validates a lifecycle transition triggered by a dedicated action
    /// (confirm, reject, cancel, or a note-only update).
    ///
    /// Staying in the same status is always permitted; that is how a note is
    /// appended without a status change.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if *self == new_status {
            return Ok(());
        }

        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid: bool = match self {
            Self::PendingPayment | Self::PendingApproval => matches!(
                new_status,
                Self::Confirmed | Self::Rejected | Self::Cancelled
            ),
            Self::Confirmed => matches!(new_status, Self::Cancelled),
            Self::Cancelled | Self::Rejected | Self::Completed => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }

    /// Validates a status picked from the admin status selector.
    ///
    /// The selector bypasses the transition graph and the note requirement,
    /// but it only offers [`BookingStatus::SELECTABLE`] and it cannot reopen a
    /// booking that has already reached a terminal status.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is not offered by the selector or the
    /// booking is already terminal.
    pub fn validate_selection(&self, selected: Self) -> Result<(), DomainError> {
        if *self == selected {
            return Ok(());
        }
        if !selected.is_selectable() {
            return Err(DomainError::StatusNotSelectable {
                status: selected.as_str().to_string(),
            });
        }
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: selected.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
