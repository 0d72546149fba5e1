// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod error;

use crate::Amenity;
use time::macros::time;

/// A free amenity open 08:00-20:00 that requires approval.
pub fn create_test_amenity() -> Amenity {
    Amenity {
        amenity_id: String::from("7"),
        building_id: Some(String::from("1")),
        amenity_name: String::from("Party Room"),
        description: Some(String::from("Ground floor party room")),
        price: 0.0,
        opening_time: Some(time!(08:00)),
        closing_time: Some(time!(20:00)),
        is_bookable: true,
        is_active: true,
        max_capacity: Some(30),
        min_booking_duration: None,
        max_booking_duration: None,
        requires_approval: true,
        created_by: None,
    }
}
