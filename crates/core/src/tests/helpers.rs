// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Actor;
use condo_audit::NoteAuthor;
use condo_domain::{Amenity, Booking, BookingStatus, Resident};
use time::OffsetDateTime;
use time::macros::{date, datetime, time};

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-10 12:00:00 UTC)
}

pub fn create_test_resident_actor() -> Actor {
    Actor::new(
        String::from("11"),
        Some(String::from("1")),
        Some(String::from("101")),
        NoteAuthor::new(String::from("Ada"), String::from("Lovelace")),
        false,
    )
}

pub fn create_test_staff_actor() -> Actor {
    Actor::new(
        String::from("2"),
        Some(String::from("1")),
        None,
        NoteAuthor::new(String::from("Grace"), String::from("Hopper")),
        true,
    )
}

/// Free, approval-required amenity open 08:00-20:00 for 1 to 4 hours.
pub fn create_test_amenity() -> Amenity {
    Amenity {
        amenity_id: String::from("7"),
        building_id: Some(String::from("1")),
        amenity_name: String::from("Party Room"),
        description: None,
        price: 0.0,
        opening_time: Some(time!(08:00)),
        closing_time: Some(time!(20:00)),
        is_bookable: true,
        is_active: true,
        max_capacity: None,
        min_booking_duration: Some(1.0),
        max_booking_duration: Some(4.0),
        requires_approval: true,
        created_by: None,
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

pub fn create_test_other_resident() -> Resident {
    Resident {
        resident_id: String::from("33"),
        first_name: String::from("Alan"),
        last_name: String::from("Turing"),
        unit_id: Some(String::from("303")),
        unit_number: Some(String::from("303")),
    }
}
