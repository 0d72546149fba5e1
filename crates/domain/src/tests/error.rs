// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use time::macros::time;

#[test]
fn test_rule_messages_are_user_facing() {
    assert_eq!(
        DomainError::BookingInPast.to_string(),
        "Cannot book in the past."
    );
    assert_eq!(
        DomainError::IncompleteSlot.to_string(),
        "Please fill in all date and time fields."
    );
    assert_eq!(
        DomainError::NoteRequired {
            purpose: "confirmation"
        }
        .to_string(),
        "Notes are required for confirmation."
    );
}

#[test]
fn test_operating_hours_message_uses_wall_clock() {
    let err: DomainError = DomainError::OutsideOperatingHours {
        opening: time!(06:30),
        closing: time!(22:00),
    };
    assert_eq!(err.to_string(), "Booking must be between 06:30 and 22:00.");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::EmptyNote);
    assert_eq!(err.to_string(), "Note cannot be empty.");
}
