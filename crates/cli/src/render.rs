// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text output for the terminal.

use condo_api::{
    BookingCapabilities, BookingDetails, CalendarEvent, GlobalCapabilities, Session,
    compute_global_capabilities,
};
use condo_audit::{NO_NOTES_PLACEHOLDER, NoteLine};
use condo_domain::{Amenity, Booking, BookingStatus, StatusTone, format_wall_clock};

pub fn session(session: &Session) {
    println!("{} ({})", session.display_name(), session.primary_role());
    if let Some(building) = session.building_name.as_deref() {
        println!("Building: {building}");
    }
    if let Some(unit) = session.unit_id.as_deref() {
        println!("Unit: {unit}");
    }
    let staff_actions: Vec<&str> = staff_actions(&compute_global_capabilities(session));
    if !staff_actions.is_empty() {
        println!("May also: {}", staff_actions.join(", "));
    }
}

fn staff_actions(capabilities: &GlobalCapabilities) -> Vec<&'static str> {
    [
        (capabilities.can_book_for_resident, "book for residents"),
        (capabilities.can_manage_amenities, "manage amenities"),
        (capabilities.can_view_building_bookings, "view building bookings"),
    ]
    .into_iter()
    .filter(|(capability, _)| capability.is_allowed())
    .map(|(_, name)| name)
    .collect()
}

/// Status label with a marker for its tone.
fn status_text(status: BookingStatus) -> String {
    let marker: &str = match status.tone() {
        StatusTone::Success => "+",
        StatusTone::Warning => "!",
        StatusTone::Error => "x",
        StatusTone::Info => "i",
    };
    format!("[{marker}] {}", status.label())
}

fn amenity_line(amenity: &Amenity) -> String {
    let hours: String = amenity.operating_window().map_or_else(
        || String::from("hours not set"),
        |(opening, closing)| {
            format!(
                "{}-{}",
                format_wall_clock(opening),
                format_wall_clock(closing)
            )
        },
    );
    let price: String = if amenity.is_paid() {
        format!("${:.2}", amenity.price)
    } else {
        String::from("free")
    };
    let mut flags: Vec<&str> = Vec::new();
    if !amenity.is_active {
        flags.push("inactive");
    }
    if !amenity.is_bookable {
        flags.push("not bookable");
    }
    if amenity.requires_approval {
        flags.push("needs approval");
    }
    let flags: String = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    format!(
        "{:>6}  {}  {hours}  {price}{flags}",
        amenity.amenity_id, amenity.amenity_name
    )
}

pub fn amenities(amenities: &[Amenity]) {
    let refs: Vec<&Amenity> = amenities.iter().collect();
    amenity_refs(&refs);
}

pub fn amenity_refs(amenities: &[&Amenity]) {
    if amenities.is_empty() {
        println!("No amenities found");
    }
    for amenity in amenities {
        println!("{}", amenity_line(amenity));
    }
}

pub fn amenity(amenity: &Amenity) {
    println!("{}", amenity_line(amenity));
    if let Some(description) = amenity.description.as_deref() {
        println!("  {description}");
    }
    if let Some(capacity) = amenity.max_capacity {
        println!("  Capacity: {capacity}");
    }
    match (amenity.min_duration_hours(), amenity.max_duration_hours()) {
        (Some(min), Some(max)) => println!("  Bookings of {min} to {max} hours"),
        (Some(min), None) => println!("  Bookings of at least {min} hours"),
        (None, Some(max)) => println!("  Bookings of at most {max} hours"),
        (None, None) => {}
    }
}

fn booking_text(booking: &Booking) -> String {
    format!(
        "{:>6}  {}  {}  Unit {}  {}  {}",
        booking.booking_id,
        booking.slot(),
        booking.amenity_name.as_deref().unwrap_or("Unknown Amenity"),
        booking.unit_label().unwrap_or("N/A"),
        booking.resident_label(),
        status_text(booking.status)
    )
}

pub fn booking_line(booking: &Booking) {
    println!("{}", booking_text(booking));
}

pub fn bookings(bookings: &[Booking]) {
    if bookings.is_empty() {
        println!("No bookings found");
    }
    for booking in bookings {
        booking_line(booking);
    }
}

fn allowed_actions(capabilities: &BookingCapabilities) -> Vec<&'static str> {
    [
        (capabilities.can_edit, "edit"),
        (capabilities.can_cancel, "cancel"),
        (capabilities.can_add_note, "note"),
        (capabilities.can_confirm, "confirm"),
        (capabilities.can_reject, "reject"),
        (capabilities.can_set_status, "set status"),
    ]
    .into_iter()
    .filter(|(capability, _)| capability.is_allowed())
    .map(|(_, name)| name)
    .collect()
}

pub fn details(details: &BookingDetails) {
    booking_line(&details.booking);
    println!();
    if details.notes.is_empty() {
        println!("{NO_NOTES_PLACEHOLDER}");
    }
    for note in &details.notes {
        match note {
            NoteLine::Attributed { header, body } => println!("{header}\n  {body}"),
            NoteLine::Plain(text) => println!("{text}"),
        }
    }
    let actions: Vec<&str> = allowed_actions(&details.capabilities);
    if !actions.is_empty() {
        println!();
        println!("Actions: {}", actions.join(", "));
    }
}

pub fn calendar(events: &[CalendarEvent]) {
    if events.is_empty() {
        println!("Nothing on the calendar");
    }
    for event in events {
        println!(
            "{} {}-{}  {}  {} {}",
            event.start.date(),
            format_wall_clock(event.start.time()),
            format_wall_clock(event.end.time()),
            event.title,
            status_text(event.status),
            event.color
        );
    }
}
