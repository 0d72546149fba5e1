// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    Actor, AvailabilityQuery, BookingMutation, BookingUpdate, NewBooking, TransitionResult,
};
use condo_audit::{NoteAction, NoteEntry, append_note};
use condo_domain::{
    Amenity, Booking, BookingSlot, BookingStatus, DomainError, Resident, SlotCheck,
    ensure_bookable, validate_booking_slot,
};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Plans a booking command for the given actor at instant `now`.
///
/// `now` must carry the actor's local offset: its wall-clock part is what the
/// slot is compared against and what note timestamps show.
///
/// # Arguments
///
/// * `command` - The command to plan
/// * `actor` - The signed-in user issuing the command
/// * `now` - The current local instant
///
/// # Returns
///
/// * `Ok(TransitionResult)` describing the single write to perform
/// * `Err(CoreError)` if a local rule refuses the command
///
/// # Errors
///
/// Returns an error if:
/// - The slot fails the booking rules
/// - A confirmation or rejection has no note
/// - A staff-only action is requested by a resident
/// - The status lifecycle forbids the change
/// - A terminal booking would be moved to another slot
pub fn apply(
    command: Command,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateBooking {
            amenity,
            slot,
            notes,
            on_behalf_of,
        } => plan_create(&amenity, slot, &notes, on_behalf_of, actor, now),
        Command::UpdateBooking {
            booking,
            amenity,
            slot,
            notes,
            status,
        } => {
            // Terminal bookings keep their slot; notes may still be added.
            if booking.status.is_terminal() && slot != booking.slot() {
                return Err(CoreError::DomainViolation(DomainError::BookingNotEditable {
                    status: booking.status.as_str().to_string(),
                }));
            }

            let check: SlotCheck = SlotCheck::Edit {
                original: booking.slot(),
            };
            validate_booking_slot(&amenity, &slot, local_wall_clock(now), &check)?;

            let new_status: BookingStatus = match status {
                Some(selected) if actor.is_staff => {
                    booking.status.validate_selection(selected)?;
                    selected
                }
                // Residents cannot move the status through an edit.
                _ => booking.status,
            };

            let notes: String = if notes.trim().is_empty() {
                booking.notes_text().to_string()
            } else {
                append_entry(&booking, actor, NoteAction::Note, notes.trim(), now)
            };

            let availability_check: Option<AvailabilityQuery> =
                check.slot_changed(&slot).then(|| AvailabilityQuery {
                    amenity_id: booking.amenity_id.clone(),
                    slot,
                });

            Ok(plan_update(&booking, slot, notes, new_status, actor, availability_check))
        }
        Command::ConfirmBooking { booking, note } => plan_decision(
            &booking,
            &note,
            NoteAction::Confirmation,
            BookingStatus::Confirmed,
            actor,
            now,
        ),
        Command::RejectBooking { booking, note } => plan_decision(
            &booking,
            &note,
            NoteAction::Rejection,
            BookingStatus::Rejected,
            actor,
            now,
        ),
        Command::AddNote { booking, note } => {
            if note.trim().is_empty() {
                return Err(CoreError::DomainViolation(DomainError::EmptyNote));
            }
            let notes: String = append_entry(&booking, actor, NoteAction::Note, note.trim(), now);
            Ok(plan_update(
                &booking,
                booking.slot(),
                notes,
                booking.status,
                actor,
                None,
            ))
        }
        Command::CancelBooking { booking } => {
            if !booking.status.is_cancellable() {
                return Err(CoreError::DomainViolation(
                    DomainError::BookingNotCancellable {
                        status: booking.status.as_str().to_string(),
                    },
                ));
            }
            let mut expected: Booking = booking.clone();
            expected.status = BookingStatus::Cancelled;
            expected.updated_by = Some(actor.user_id.clone());
            Ok(TransitionResult {
                mutation: BookingMutation::Cancel {
                    booking_id: booking.booking_id,
                },
                availability_check: None,
                expected: Some(expected),
            })
        }
    }
}

fn plan_create(
    amenity: &Amenity,
    slot: BookingSlot,
    notes: &str,
    on_behalf_of: Option<Resident>,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    ensure_bookable(amenity)?;
    validate_booking_slot(amenity, &slot, local_wall_clock(now), &SlotCheck::NewBooking)?;

    let (resident_id, unit_id): (Option<String>, Option<String>) = match on_behalf_of {
        Some(resident) if actor.is_staff => (Some(resident.resident_id), resident.unit_id),
        Some(_) => {
            return Err(CoreError::StaffOnly {
                action: "book on behalf of another resident",
            });
        }
        None => (Some(actor.user_id.clone()), actor.unit_id.clone()),
    };

    let notes: String = if notes.trim().is_empty() {
        String::new()
    } else {
        let entry: NoteEntry = NoteEntry::new(
            actor.author.clone(),
            NoteAction::Note,
            notes.trim().to_string(),
            now,
        );
        append_note("", &entry)
    };

    let new_booking: NewBooking = NewBooking {
        amenity_id: amenity.amenity_id.clone(),
        building_id: actor
            .building_id
            .clone()
            .or_else(|| amenity.building_id.clone()),
        resident_id,
        unit_id,
        booking_date: slot.date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        notes,
        status: BookingStatus::initial_for(amenity),
        created_by: actor.user_id.clone(),
        updated_by: actor.user_id.clone(),
    };

    Ok(TransitionResult {
        mutation: BookingMutation::Create(new_booking),
        availability_check: Some(AvailabilityQuery {
            amenity_id: amenity.amenity_id.clone(),
            slot,
        }),
        expected: None,
    })
}

fn plan_decision(
    booking: &Booking,
    note: &str,
    action: NoteAction,
    target: BookingStatus,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let (purpose, verb): (&'static str, &'static str) = match action {
        NoteAction::Rejection => ("rejection", "reject bookings"),
        NoteAction::Confirmation | NoteAction::Note => ("confirmation", "confirm bookings"),
    };

    if note.trim().is_empty() {
        return Err(CoreError::DomainViolation(DomainError::NoteRequired {
            purpose,
        }));
    }
    if !actor.is_staff {
        return Err(CoreError::StaffOnly { action: verb });
    }
    if !booking.status.is_awaiting_decision() {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: booking.status.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: "only pending bookings can be decided".to_string(),
            },
        ));
    }
    booking.status.validate_transition(target)?;

    let notes: String = append_entry(booking, actor, action, note.trim(), now);
    Ok(plan_update(
        booking,
        booking.slot(),
        notes,
        target,
        actor,
        None,
    ))
}

fn plan_update(
    booking: &Booking,
    slot: BookingSlot,
    notes: String,
    status: BookingStatus,
    actor: &Actor,
    availability_check: Option<AvailabilityQuery>,
) -> TransitionResult {
    let update: BookingUpdate = BookingUpdate {
        booking_id: booking.booking_id.clone(),
        amenity_id: booking.amenity_id.clone(),
        booking_date: slot.date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        notes,
        status,
        updated_by: actor.user_id.clone(),
    };

    let mut expected: Booking = booking.clone();
    expected.booking_date = update.booking_date;
    expected.start_time = update.start_time;
    expected.end_time = update.end_time;
    expected.status = update.status;
    expected.notes = Some(update.notes.clone()).filter(|n| !n.is_empty());
    expected.updated_by = Some(update.updated_by.clone());

    TransitionResult {
        mutation: BookingMutation::Update(update),
        availability_check,
        expected: Some(expected),
    }
}

fn append_entry(
    booking: &Booking,
    actor: &Actor,
    action: NoteAction,
    text: &str,
    now: OffsetDateTime,
) -> String {
    let entry: NoteEntry = NoteEntry::new(actor.author.clone(), action, text.to_string(), now);
    append_note(booking.notes_text(), &entry)
}

/// The wall-clock reading of `now` in its own offset.
#[must_use]
pub fn local_wall_clock(now: OffsetDateTime) -> PrimitiveDateTime {
    PrimitiveDateTime::new(now.date(), now.time())
}
