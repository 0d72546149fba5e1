// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Amenities and the amenity management form.

use crate::wire::{flexible_id, flexible_id_option, parse_wall_clock, wall_clock_option};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Time;

/// Field-level validation messages keyed by the offending field.
///
/// An empty map means the form is valid.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// A bookable shared facility of a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub amenity_id: String,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub building_id: Option<String>,
    pub amenity_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default, with = "wall_clock_option")]
    pub opening_time: Option<Time>,
    #[serde(default, with = "wall_clock_option")]
    pub closing_time: Option<Time>,
    #[serde(default)]
    pub is_bookable: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    /// Hours. Zero or absent means no minimum.
    #[serde(default)]
    pub min_booking_duration: Option<f64>,
    /// Hours. Zero or absent means no maximum.
    #[serde(default)]
    pub max_booking_duration: Option<f64>,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default, deserialize_with = "flexible_id_option::deserialize")]
    pub created_by: Option<String>,
}

impl Amenity {
    /// Returns true if bookings against this amenity must be paid for.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.price > 0.0
    }

    /// The minimum booking duration in hours, if one is configured.
    #[must_use]
    pub fn min_duration_hours(&self) -> Option<f64> {
        self.min_booking_duration.filter(|hours| *hours > 0.0)
    }

    /// The maximum booking duration in hours, if one is configured.
    #[must_use]
    pub fn max_duration_hours(&self) -> Option<f64> {
        self.max_booking_duration.filter(|hours| *hours > 0.0)
    }

    /// The `(opening, closing)` window. Only defined when both ends are set.
    #[must_use]
    pub const fn operating_window(&self) -> Option<(Time, Time)> {
        match (self.opening_time, self.closing_time) {
            (Some(opening), Some(closing)) => Some((opening, closing)),
            _ => None,
        }
    }
}

/// Filters amenities by a case-insensitive substring of their name.
///
/// A blank search term keeps every amenity.
#[must_use]
pub fn filter_amenities<'a>(amenities: &'a [Amenity], term: &str) -> Vec<&'a Amenity> {
    let needle: String = term.trim().to_lowercase();
    if needle.is_empty() {
        return amenities.iter().collect();
    }
    amenities
        .iter()
        .filter(|a| a.amenity_name.to_lowercase().contains(&needle))
        .collect()
}

/// Fields of the amenity management form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AmenityField {
    AmenityName,
    Description,
    Price,
    OpeningTime,
    ClosingTime,
    MaxCapacity,
    MinBookingDuration,
    MaxBookingDuration,
}

impl AmenityField {
    /// The wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AmenityName => "amenityName",
            Self::Description => "description",
            Self::Price => "price",
            Self::OpeningTime => "openingTime",
            Self::ClosingTime => "closingTime",
            Self::MaxCapacity => "maxCapacity",
            Self::MinBookingDuration => "minBookingDuration",
            Self::MaxBookingDuration => "maxBookingDuration",
        }
    }
}

impl std::fmt::Display for AmenityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controlled state of the amenity create/edit form.
///
/// Text inputs are held exactly as typed; [`AmenityForm::validate`] is the
/// single place they are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmenityForm {
    pub amenity_name: String,
    pub description: String,
    pub price: String,
    pub opening_time: String,
    pub closing_time: String,
    pub max_capacity: String,
    pub min_booking_duration: String,
    pub max_booking_duration: String,
    pub is_bookable: bool,
    pub is_active: bool,
    pub requires_approval: bool,
}

/// A validated amenity ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AmenityDraft {
    pub amenity_name: String,
    pub description: String,
    pub price: f64,
    pub opening_time: Time,
    pub closing_time: Time,
    pub max_capacity: Option<u32>,
    pub min_booking_duration: f64,
    pub max_booking_duration: f64,
    pub is_bookable: bool,
    pub is_active: bool,
    pub requires_approval: bool,
}

fn parse_optional_hours(raw: &str) -> Option<Result<f64, ()>> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(()),
    )
}

impl AmenityForm {
    /// A blank form for a new amenity. New amenities start active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Self::default()
        }
    }

    /// Pre-fills the form from an existing amenity.
    #[must_use]
    pub fn from_amenity(amenity: &Amenity) -> Self {
        let hours = |value: Option<f64>| value.filter(|h| *h > 0.0).map(|h| h.to_string());
        Self {
            amenity_name: amenity.amenity_name.clone(),
            description: amenity.description.clone().unwrap_or_default(),
            price: amenity.price.to_string(),
            opening_time: amenity
                .opening_time
                .map(crate::wire::format_wall_clock)
                .unwrap_or_default(),
            closing_time: amenity
                .closing_time
                .map(crate::wire::format_wall_clock)
                .unwrap_or_default(),
            max_capacity: amenity
                .max_capacity
                .map(|c| c.to_string())
                .unwrap_or_default(),
            min_booking_duration: hours(amenity.min_booking_duration).unwrap_or_default(),
            max_booking_duration: hours(amenity.max_booking_duration).unwrap_or_default(),
            is_bookable: amenity.is_bookable,
            is_active: amenity.is_active,
            requires_approval: amenity.requires_approval,
        }
    }

    /// Validates every field and returns the complete error map.
    #[must_use]
    pub fn validate(&self) -> FieldErrors<AmenityField> {
        let mut errors: FieldErrors<AmenityField> = FieldErrors::new();

        if self.amenity_name.trim().is_empty() {
            errors.insert(AmenityField::AmenityName, "Amenity name is required".into());
        }
        if self.description.trim().is_empty() {
            errors.insert(AmenityField::Description, "Description is required".into());
        }

        match self.price.trim().parse::<f64>() {
            Ok(price) if !price.is_finite() => {
                errors.insert(AmenityField::Price, "Price is required".into());
            }
            Ok(price) if price < 0.0 => {
                errors.insert(AmenityField::Price, "Price must be positive".into());
            }
            Ok(_) => {}
            Err(_) => {
                errors.insert(AmenityField::Price, "Price is required".into());
            }
        }

        let opening: Option<Time> = Self::check_time(
            &self.opening_time,
            AmenityField::OpeningTime,
            "Opening time required",
            &mut errors,
        );
        let closing: Option<Time> = Self::check_time(
            &self.closing_time,
            AmenityField::ClosingTime,
            "Closing time required",
            &mut errors,
        );
        if let (Some(opening), Some(closing)) = (opening, closing) {
            if opening >= closing {
                errors.insert(
                    AmenityField::ClosingTime,
                    "Closing time must be after opening time".into(),
                );
            }
        }

        let capacity: &str = self.max_capacity.trim();
        if !capacity.is_empty() && !matches!(capacity.parse::<u32>(), Ok(c) if c >= 1) {
            errors.insert(
                AmenityField::MaxCapacity,
                "Capacity must be a positive number".into(),
            );
        }

        let min: Option<Result<f64, ()>> = parse_optional_hours(&self.min_booking_duration);
        let max: Option<Result<f64, ()>> = parse_optional_hours(&self.max_booking_duration);
        if matches!(min, Some(Err(()))) || matches!(min, Some(Ok(m)) if m < 0.0) {
            errors.insert(
                AmenityField::MinBookingDuration,
                "Min duration must be positive".into(),
            );
        }
        if matches!(max, Some(Err(()))) || matches!(max, Some(Ok(m)) if m < 0.0) {
            errors.insert(
                AmenityField::MaxBookingDuration,
                "Max duration must be positive".into(),
            );
        }
        if let (Some(Ok(min)), Some(Ok(max))) = (min, max) {
            if max < min {
                errors.insert(
                    AmenityField::MaxBookingDuration,
                    "Max duration must be greater than min duration".into(),
                );
            }
        }

        errors
    }

    fn check_time(
        raw: &str,
        field: AmenityField,
        required: &str,
        errors: &mut FieldErrors<AmenityField>,
    ) -> Option<Time> {
        if raw.trim().is_empty() {
            errors.insert(field, required.to_string());
            return None;
        }
        match parse_wall_clock(raw) {
            Ok(time) => Some(time),
            Err(e) => {
                errors.insert(field, e.to_string());
                None
            }
        }
    }

    /// Validates the form and converts it into a typed draft.
    ///
    /// Blank durations become `0` (no constraint) and a blank capacity
    /// becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns the full field error map if any field is invalid.
    pub fn to_draft(&self) -> Result<AmenityDraft, FieldErrors<AmenityField>> {
        let errors: FieldErrors<AmenityField> = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate() has already proven every parse below succeeds
        let price: f64 = self.price.trim().parse().unwrap_or_default();
        let opening_time: Time = parse_wall_clock(&self.opening_time).unwrap_or(Time::MIDNIGHT);
        let closing_time: Time = parse_wall_clock(&self.closing_time).unwrap_or(Time::MIDNIGHT);
        let hours = |raw: &str| match parse_optional_hours(raw) {
            Some(Ok(h)) => h,
            _ => 0.0,
        };

        Ok(AmenityDraft {
            amenity_name: self.amenity_name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            opening_time,
            closing_time,
            max_capacity: self.max_capacity.trim().parse().ok(),
            min_booking_duration: hours(&self.min_booking_duration),
            max_booking_duration: hours(&self.max_booking_duration),
            is_bookable: self.is_bookable,
            is_active: self.is_active,
            requires_approval: self.requires_approval,
        })
    }
}
