// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking writes.
//!
//! Every write follows the same path: read the session, apply the command
//! locally, ask the backend about availability when the slot is new, then
//! send the single mutation. Only one write runs at a time per workflow.

use crate::auth::AuthorizationService;
use crate::backend::Backend;
use crate::clock::Clock;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::handlers::form_errors;
use crate::session::{Session, SessionHandle};
use condo_core::{Actor, BookingMutation, Command, TransitionResult, apply};
use condo_domain::{
    Amenity, Booking, BookingField, BookingForm, BookingSlot, BookingStatus, DomainError,
    FieldErrors,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Holds the in-flight flag until dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ApiError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ApiError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Reads the slot out of a booking form.
///
/// Blank fields give the single "fill in all fields" message; malformed
/// ones are reported per field.
fn read_slot(form: &BookingForm) -> Result<BookingSlot, ApiError> {
    match form.slot() {
        Ok(slot) => Ok(slot),
        Err(DomainError::IncompleteSlot) => {
            Err(translate_domain_error(DomainError::IncompleteSlot))
        }
        Err(e) => {
            let errors: FieldErrors<BookingField> = form.validate();
            if errors.is_empty() {
                Err(translate_domain_error(e))
            } else {
                Err(form_errors(errors))
            }
        }
    }
}

/// Orchestrates booking writes against a backend.
pub struct BookingWorkflow {
    backend: Arc<dyn Backend>,
    session: SessionHandle,
    clock: Arc<dyn Clock>,
    in_flight: AtomicBool,
}

impl BookingWorkflow {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, session: SessionHandle, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            session,
            clock,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns true while a write is waiting on the backend.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Applies the staff gate a command needs, if any.
    fn authorize(command: &Command, session: &Session) -> Result<(), ApiError> {
        match command {
            Command::CreateBooking {
                on_behalf_of: Some(_),
                ..
            } => AuthorizationService::authorize_book_for_resident(session),
            Command::UpdateBooking {
                status: Some(_), ..
            } => AuthorizationService::authorize_set_status(session),
            Command::ConfirmBooking { .. } => {
                AuthorizationService::authorize_confirm_booking(session)
            }
            Command::RejectBooking { .. } => {
                AuthorizationService::authorize_reject_booking(session)
            }
            Command::UpdateBooking { .. }
            | Command::CreateBooking { .. }
            | Command::AddNote { .. }
            | Command::CancelBooking { .. } => Ok(()),
        }
    }

    fn plan(&self, command: Command, session: &Session) -> Result<TransitionResult, ApiError> {
        Self::authorize(&command, session)?;
        let actor: Actor = session.to_actor();
        let name: &'static str = command.name();
        apply(command, &actor, self.clock.now()).map_err(|e| {
            debug!(command = name, user_id = %actor.user_id, error = %e, "Command refused");
            translate_core_error(e)
        })
    }

    /// Runs the availability check, if planned, and sends the mutation.
    async fn execute(&self, result: TransitionResult) -> Result<Option<Booking>, ApiError> {
        if let Some(query) = &result.availability_check {
            let available: bool = self.backend.check_availability(query).await?;
            if !available {
                info!(amenity_id = %query.amenity_id, slot = %query.slot, "Slot unavailable");
                return Err(ApiError::SlotUnavailable);
            }
        }

        match result.mutation {
            BookingMutation::Create(booking) => {
                self.backend.create_booking(&booking.into()).await?;
            }
            BookingMutation::Update(update) => {
                self.backend.update_booking(&update.into()).await?;
            }
            BookingMutation::Cancel { booking_id } => {
                self.backend.cancel_booking(&booking_id).await?;
            }
        }
        Ok(result.expected)
    }

    /// Books `amenity` from the filled-in form.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nobody is signed in or another write is in flight
    /// - The form is incomplete or the slot breaks an amenity rule
    /// - A resident tries to book on behalf of someone else
    /// - The slot is taken or the backend refuses the booking
    pub async fn create_booking(
        &self,
        amenity: &Amenity,
        form: &BookingForm,
    ) -> Result<(), ApiError> {
        let session: Session = self.session.require()?;
        let _guard: InFlightGuard<'_> = InFlightGuard::acquire(&self.in_flight)?;
        let slot: BookingSlot = read_slot(form)?;

        let command: Command = Command::CreateBooking {
            amenity: amenity.clone(),
            slot,
            notes: form.notes.clone(),
            on_behalf_of: form.resident.clone(),
        };
        let result: TransitionResult = self.plan(command, &session)?;
        self.execute(result).await?;

        info!(
            amenity_id = %amenity.amenity_id,
            user_id = %session.user_id,
            slot = %slot,
            on_behalf_of = form.resident.is_some(),
            "Booking created"
        );
        Ok(())
    }

    /// Saves an edited booking.
    ///
    /// The form's note, if any, is appended to the log. Only staff may pick a
    /// status other than the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nobody is signed in or another write is in flight
    /// - The form is incomplete or the slot breaks an amenity rule
    /// - A resident picks a different status
    /// - The selected status is not offered or the booking is terminal
    /// - A changed slot is taken or the backend refuses the update
    pub async fn update_booking(
        &self,
        booking: &Booking,
        amenity: &Amenity,
        form: &BookingForm,
    ) -> Result<Booking, ApiError> {
        let session: Session = self.session.require()?;
        let _guard: InFlightGuard<'_> = InFlightGuard::acquire(&self.in_flight)?;
        let slot: BookingSlot = read_slot(form)?;

        let status: Option<BookingStatus> =
            form.status.filter(|selected| *selected != booking.status);
        let unannotated: Option<BookingStatus> =
            status.filter(|_| session.is_staff() && form.notes.trim().is_empty());

        let command: Command = Command::UpdateBooking {
            booking: booking.clone(),
            amenity: amenity.clone(),
            slot,
            notes: form.notes.clone(),
            status,
        };
        let result: TransitionResult = self.plan(command, &session)?;
        let updated: Booking = self.execute(result).await?.unwrap_or_else(|| booking.clone());

        if let Some(selected) = unannotated {
            warn!(
                booking_id = %booking.booking_id,
                from = %booking.status,
                to = %selected,
                user_id = %session.user_id,
                "Status changed from the selector without a note"
            );
        }
        info!(
            booking_id = %booking.booking_id,
            user_id = %session.user_id,
            status = %updated.status,
            "Booking updated"
        );
        Ok(updated)
    }

    /// Confirms a pending booking with a required note.
    ///
    /// # Errors
    ///
    /// Returns an error if the note is blank, the session is not staff, the
    /// booking is not pending, or the backend refuses the update.
    pub async fn confirm_booking(&self, booking: &Booking, note: &str) -> Result<Booking, ApiError> {
        self.decide(
            booking,
            Command::ConfirmBooking {
                booking: booking.clone(),
                note: note.to_string(),
            },
        )
        .await
    }

    /// Rejects a pending booking with a required reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the reason is blank, the session is not staff, the
    /// booking is not pending, or the backend refuses the update.
    pub async fn reject_booking(&self, booking: &Booking, note: &str) -> Result<Booking, ApiError> {
        self.decide(
            booking,
            Command::RejectBooking {
                booking: booking.clone(),
                note: note.to_string(),
            },
        )
        .await
    }

    /// Appends a note without touching the status.
    ///
    /// # Errors
    ///
    /// Returns an error if the note is blank or the backend refuses the update.
    pub async fn add_note(&self, booking: &Booking, note: &str) -> Result<Booking, ApiError> {
        self.decide(
            booking,
            Command::AddNote {
                booking: booking.clone(),
                note: note.to_string(),
            },
        )
        .await
    }

    /// Cancels a booking. There is no undo.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is already terminal or the backend
    /// refuses the cancellation.
    pub async fn cancel_booking(&self, booking: &Booking) -> Result<Booking, ApiError> {
        self.decide(
            booking,
            Command::CancelBooking {
                booking: booking.clone(),
            },
        )
        .await
    }

    async fn decide(&self, booking: &Booking, command: Command) -> Result<Booking, ApiError> {
        let session: Session = self.session.require()?;
        let _guard: InFlightGuard<'_> = InFlightGuard::acquire(&self.in_flight)?;
        let name: &'static str = command.name();

        let result: TransitionResult = self.plan(command, &session)?;
        let updated: Booking = self.execute(result).await?.unwrap_or_else(|| booking.clone());

        info!(
            command = name,
            booking_id = %booking.booking_id,
            user_id = %session.user_id,
            from = %booking.status,
            to = %updated.status,
            "Booking changed"
        );
        Ok(updated)
    }
}
