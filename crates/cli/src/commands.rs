// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommands and what they do against the backend.

use crate::render;
use clap::{Args as ClapArgs, Subcommand};
use condo_api::{
    ApiError, AuthenticationService, Backend, BookingDetails, BookingWindow, BookingWorkflow,
    CalendarEvent, ClientConfig, Debouncer, FileSessionStore, HttpBackend, SEARCH_DEBOUNCE,
    Session, SessionHandle, SystemClock, booking_details, bookings_in_range, building_calendar,
    create_amenity, get_amenity, get_booking, list_amenities, list_amenity_bookings,
    list_bookings, list_resident_bookings, list_residents, update_amenity,
};
use condo_domain::{
    Amenity, AmenityForm, Booking, BookingForm, BookingStatus, Resident, filter_amenities,
    parse_calendar_date,
};
use std::path::Path;
use std::sync::Arc;
use time::Date;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs to talk to the backend.
pub struct Client {
    backend: Arc<HttpBackend>,
    session: SessionHandle,
    workflow: BookingWorkflow,
}

impl Client {
    /// Restores the stored session and builds the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file is unreadable or the HTTP client
    /// cannot be built.
    pub fn connect(api_url: &str, session_file: &Path) -> Result<Self, ApiError> {
        let session: SessionHandle =
            SessionHandle::restore(Arc::new(FileSessionStore::new(session_file)))?;
        let backend: Arc<HttpBackend> = Arc::new(HttpBackend::new(
            ClientConfig::new(api_url),
            session.clone(),
        )?);
        let workflow: BookingWorkflow = BookingWorkflow::new(
            Arc::clone(&backend) as Arc<dyn Backend>,
            session.clone(),
            Arc::new(SystemClock),
        );
        Ok(Self {
            backend,
            session,
            workflow,
        })
    }

    fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and keep the session for later commands
    Login {
        username: String,
        #[arg(long, env = "CONDO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// List, search and manage amenities
    #[command(subcommand)]
    Amenities(AmenityCommand),

    /// Book an amenity
    Book {
        amenity_id: String,
        /// Date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// End time, HH:MM
        #[arg(long)]
        end: String,
        /// First note on the booking
        #[arg(long, default_value = "")]
        notes: String,
        /// Staff only: book for this resident id
        #[arg(long)]
        resident: Option<String>,
    },

    /// Move a booking, add a note to it, or (staff) set its status
    Edit {
        booking_id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Appended to the booking's notes
        #[arg(long, default_value = "")]
        notes: String,
        /// Staff only: CONFIRMED, PENDING_PAYMENT, CANCELLED or REJECTED
        #[arg(long)]
        status: Option<BookingStatus>,
    },

    /// List bookings: the building for staff, your unit otherwise
    Bookings {
        /// Include past bookings
        #[arg(long)]
        all: bool,
        /// Bookings of one amenity instead
        #[arg(long, conflicts_with = "resident")]
        amenity: Option<String>,
        /// Bookings of one resident instead
        #[arg(long)]
        resident: Option<String>,
    },

    /// Bookings of an amenity between two dates
    Range {
        amenity_id: String,
        /// First day, YYYY-MM-DD
        start: String,
        /// Last day, YYYY-MM-DD
        end: String,
    },

    /// The building calendar (staff)
    Calendar {
        /// Include past bookings
        #[arg(long)]
        all: bool,
    },

    /// Show a booking with its notes
    Details { booking_id: String },

    /// Confirm a pending booking (staff)
    Confirm { booking_id: String, note: String },

    /// Reject a pending booking (staff)
    Reject { booking_id: String, reason: String },

    /// Add a note to a booking
    Note { booking_id: String, text: String },

    /// Cancel a booking
    Cancel { booking_id: String },
}

#[derive(Debug, Subcommand)]
pub enum AmenityCommand {
    /// List the building's amenities
    List,

    /// Filter amenities by name; without a term, filter as you type lines
    Search { term: Option<String> },

    /// Show one amenity
    Show { amenity_id: String },

    /// Create an amenity (staff)
    Create(AmenityFields),

    /// Edit an amenity (staff); omitted fields keep their value
    Update {
        amenity_id: String,
        #[command(flatten)]
        fields: AmenityFields,
    },
}

#[derive(Debug, ClapArgs)]
pub struct AmenityFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// Opening time, HH:MM
    #[arg(long)]
    opens: Option<String>,
    /// Closing time, HH:MM
    #[arg(long)]
    closes: Option<String>,
    #[arg(long)]
    capacity: Option<String>,
    /// Minimum booking length in hours
    #[arg(long)]
    min_hours: Option<String>,
    /// Maximum booking length in hours
    #[arg(long)]
    max_hours: Option<String>,
    #[arg(long)]
    bookable: Option<bool>,
    #[arg(long)]
    active: Option<bool>,
    #[arg(long)]
    requires_approval: Option<bool>,
}

impl AmenityFields {
    fn apply_to(self, form: &mut AmenityForm) {
        let text_fields: [(Option<String>, &mut String); 8] = [
            (self.name, &mut form.amenity_name),
            (self.description, &mut form.description),
            (self.price, &mut form.price),
            (self.opens, &mut form.opening_time),
            (self.closes, &mut form.closing_time),
            (self.capacity, &mut form.max_capacity),
            (self.min_hours, &mut form.min_booking_duration),
            (self.max_hours, &mut form.max_booking_duration),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form.is_bookable = self.bookable.unwrap_or(form.is_bookable);
        form.is_active = self.active.unwrap_or(form.is_active);
        form.requires_approval = self.requires_approval.unwrap_or(form.requires_approval);
    }
}

const fn window(all: bool) -> BookingWindow {
    if all {
        BookingWindow::All
    } else {
        BookingWindow::Upcoming
    }
}

impl Command {
    pub async fn run(self, client: &Client) -> CliResult {
        let backend: &dyn Backend = client.backend();
        let session: &SessionHandle = &client.session;

        match self {
            Self::Login { username, password } => {
                let signed_in: Session =
                    AuthenticationService::login(backend, session, &username, &password).await?;
                println!(
                    "Signed in as {} ({})",
                    signed_in.display_name(),
                    signed_in.primary_role()
                );
            }
            Self::Logout => {
                AuthenticationService::logout(session);
                println!("Signed out");
            }
            Self::Whoami => render::session(&session.require()?),
            Self::Amenities(command) => command.run(client).await?,
            Self::Book {
                amenity_id,
                date,
                start,
                end,
                notes,
                resident,
            } => {
                let amenity: Amenity = get_amenity(backend, session, &amenity_id).await?;
                let resident: Option<Resident> = match resident {
                    Some(resident_id) => Some(find_resident(client, &resident_id).await?),
                    None => None,
                };
                let form: BookingForm = BookingForm {
                    booking_date: date,
                    start_time: start,
                    end_time: end,
                    notes,
                    status: None,
                    resident,
                };
                client.workflow.create_booking(&amenity, &form).await?;
                println!("Booked {}", amenity.amenity_name);
            }
            Self::Edit {
                booking_id,
                date,
                start,
                end,
                notes,
                status,
            } => {
                let booking: Booking = get_booking(backend, session, &booking_id).await?;
                let amenity: Amenity = get_amenity(backend, session, &booking.amenity_id).await?;
                let current: BookingForm = BookingForm::from_booking(&booking);
                let form: BookingForm = BookingForm {
                    booking_date: date.unwrap_or(current.booking_date),
                    start_time: start.unwrap_or(current.start_time),
                    end_time: end.unwrap_or(current.end_time),
                    notes,
                    status: status.or(current.status),
                    resident: None,
                };
                let updated: Booking = client
                    .workflow
                    .update_booking(&booking, &amenity, &form)
                    .await?;
                render::booking_line(&updated);
            }
            Self::Bookings {
                all,
                amenity,
                resident,
            } => {
                let bookings: Vec<Booking> = match (amenity, resident) {
                    (Some(amenity_id), _) => {
                        list_amenity_bookings(backend, session, &amenity_id, window(all)).await?
                    }
                    (None, Some(resident_id)) => {
                        list_resident_bookings(backend, session, &resident_id, window(all))
                            .await?
                    }
                    (None, None) => list_bookings(backend, session, window(all)).await?,
                };
                render::bookings(&bookings);
            }
            Self::Range {
                amenity_id,
                start,
                end,
            } => {
                let start: Date = parse_calendar_date(&start)?;
                let end: Date = parse_calendar_date(&end)?;
                let bookings: Vec<Booking> =
                    bookings_in_range(backend, session, &amenity_id, start, end).await?;
                render::bookings(&bookings);
            }
            Self::Calendar { all } => {
                let events: Vec<CalendarEvent> =
                    building_calendar(backend, session, window(all)).await?;
                render::calendar(&events);
            }
            Self::Details { booking_id } => {
                let details: BookingDetails =
                    booking_details(backend, session, &booking_id).await?;
                render::details(&details);
            }
            Self::Confirm { booking_id, note } => {
                let booking: Booking = get_booking(backend, session, &booking_id).await?;
                let updated: Booking = client.workflow.confirm_booking(&booking, &note).await?;
                render::booking_line(&updated);
            }
            Self::Reject { booking_id, reason } => {
                let booking: Booking = get_booking(backend, session, &booking_id).await?;
                let updated: Booking = client.workflow.reject_booking(&booking, &reason).await?;
                render::booking_line(&updated);
            }
            Self::Note { booking_id, text } => {
                let booking: Booking = get_booking(backend, session, &booking_id).await?;
                client.workflow.add_note(&booking, &text).await?;
                println!("Note added to booking {booking_id}");
            }
            Self::Cancel { booking_id } => {
                let booking: Booking = get_booking(backend, session, &booking_id).await?;
                let updated: Booking = client.workflow.cancel_booking(&booking).await?;
                render::booking_line(&updated);
            }
        }
        Ok(())
    }
}

impl AmenityCommand {
    async fn run(self, client: &Client) -> CliResult {
        let backend: &dyn Backend = client.backend();
        let session: &SessionHandle = &client.session;

        match self {
            Self::List => render::amenities(&list_amenities(backend, session).await?),
            Self::Search { term: Some(term) } => {
                let amenities: Vec<Amenity> = list_amenities(backend, session).await?;
                render::amenity_refs(&filter_amenities(&amenities, &term));
            }
            Self::Search { term: None } => {
                let amenities: Arc<Vec<Amenity>> =
                    Arc::new(list_amenities(backend, session).await?);
                search_as_you_type(amenities).await?;
            }
            Self::Show { amenity_id } => {
                render::amenity(&get_amenity(backend, session, &amenity_id).await?);
            }
            Self::Create(fields) => {
                let mut form: AmenityForm = AmenityForm {
                    is_bookable: true,
                    ..AmenityForm::new()
                };
                fields.apply_to(&mut form);
                create_amenity(backend, session, &form).await?;
                println!("Created {}", form.amenity_name.trim());
            }
            Self::Update { amenity_id, fields } => {
                let amenity: Amenity = get_amenity(backend, session, &amenity_id).await?;
                let mut form: AmenityForm = AmenityForm::from_amenity(&amenity);
                fields.apply_to(&mut form);
                update_amenity(backend, session, &amenity, &form).await?;
                println!("Updated {}", form.amenity_name.trim());
            }
        }
        Ok(())
    }
}

async fn find_resident(client: &Client, resident_id: &str) -> Result<Resident, ApiError> {
    list_residents(client.backend(), &client.session)
        .await?
        .into_iter()
        .find(|r| r.resident_id == resident_id)
        .ok_or_else(|| ApiError::Validation {
            rule: String::from("known_resident"),
            message: format!("No resident with id {resident_id} in this building"),
        })
}

/// Reads search terms from stdin and prints matches once typing pauses.
async fn search_as_you_type(amenities: Arc<Vec<Amenity>>) -> std::io::Result<()> {
    let debouncer: Debouncer<String> = Debouncer::new(SEARCH_DEBOUNCE, move |term: String| {
        info!(term = %term, "Searching amenities");
        render::amenity_refs(&filter_amenities(&amenities, &term));
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debouncer.call(line);
    }
    // let the last term through before exiting
    tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;
    Ok(())
}

