// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! The attributed note trail carried on every booking.
//!
//! A booking's `notes` field is an append-only log. Each entry is written as
//!
//! ```text
//! First Last [3/7/2026, 2:05:09 PM]: body
//! ```
//!
//! and entries are separated by a blank line. Existing entries are never
//! edited or removed; new entries are only ever appended.

use condo_domain::BookingStatus;
use time::OffsetDateTime;
use time::macros::format_description;

/// Separator placed between consecutive entries.
pub const ENTRY_SEPARATOR: &str = "\n\n";

/// Shown in place of an empty note log.
pub const NO_NOTES_PLACEHOLDER: &str = "No notes available.";

/// The person an entry is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteAuthor {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl NoteAuthor {
    /// Creates a new `NoteAuthor`.
    #[must_use]
    pub const fn new(first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            last_name,
        }
    }

    /// `First Last`, as it appears in the entry header.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// What prompted an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    /// A plain note; the status is unchanged.
    Note,
    /// A staff confirmation. The text is the confirmation note.
    Confirmation,
    /// A staff rejection. The text is the reason.
    Rejection,
}

impl NoteAction {
    /// Builds the entry body for the given free text.
    #[must_use]
    pub fn body(&self, text: &str) -> String {
        match self {
            Self::Note => text.to_string(),
            Self::Confirmation => format!(
                "Status changed to {}. Note: {text}",
                BookingStatus::Confirmed.as_str()
            ),
            Self::Rejection => format!(
                "Status changed to {}. Reason: {text}",
                BookingStatus::Rejected.as_str()
            ),
        }
    }
}

/// Formats an instant as `M/D/YYYY, h:mm:ss AM/PM`.
#[must_use]
pub fn format_note_timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
    ))
    .unwrap_or_else(|_| at.to_string())
}

/// A single attributed entry, not yet written into a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// Who wrote the entry.
    pub author: NoteAuthor,
    /// Why the entry was written.
    pub action: NoteAction,
    /// The free text typed by the author.
    pub text: String,
    /// When the entry was written, in the author's local offset.
    pub written_at: OffsetDateTime,
}

impl NoteEntry {
    /// Creates a new `NoteEntry`.
    #[must_use]
    pub const fn new(
        author: NoteAuthor,
        action: NoteAction,
        text: String,
        written_at: OffsetDateTime,
    ) -> Self {
        Self {
            author,
            action,
            text,
            written_at,
        }
    }

    /// Renders the entry exactly as it is stored in the log.
    ///
    /// Blank lines inside the text are dropped so the entry never contains
    /// [`ENTRY_SEPARATOR`] and reads back as a single entry.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} [{}]: {}",
            self.author.display_name(),
            format_note_timestamp(self.written_at),
            self.action.body(&without_blank_lines(&self.text))
        )
    }
}

fn without_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Appends `entry` to an existing log and returns the new log.
///
/// The existing text is kept byte-for-byte as a prefix of the result.
#[must_use]
pub fn append_note(existing: &str, entry: &NoteEntry) -> String {
    let rendered: String = entry.render();
    if existing.is_empty() {
        rendered
    } else {
        format!("{existing}{ENTRY_SEPARATOR}{rendered}")
    }
}

/// One displayable entry of a note log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLine {
    /// An entry with a recognisable `Name [timestamp]: ` header.
    Attributed {
        /// The header, including the trailing `": "`.
        header: String,
        /// Everything after the header.
        body: String,
    },
    /// Free text that does not follow the entry format.
    Plain(String),
}

impl std::fmt::Display for NoteLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attributed { header, body } => write!(f, "{header}{body}"),
            Self::Plain(text) => f.write_str(text),
        }
    }
}

/// Splits a note log into its entries for display.
///
/// Returns an empty list for a blank log; callers show
/// [`NO_NOTES_PLACEHOLDER`] in that case.
#[must_use]
pub fn render_notes(log: &str) -> Vec<NoteLine> {
    log.split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> NoteLine {
    split_header(entry).map_or_else(
        || NoteLine::Plain(entry.to_string()),
        |(header, body)| NoteLine::Attributed {
            header: header.to_string(),
            body: body.to_string(),
        },
    )
}

/// Finds the earliest `Name [M/D/YYYY, time]: ` prefix followed by a
/// non-empty body. The header must sit on the entry's first line.
fn split_header(entry: &str) -> Option<(&str, &str)> {
    let first_line_end: usize = entry.find('\n').unwrap_or(entry.len());

    for (open, _) in entry[..first_line_end].match_indices(" [") {
        if open == 0 {
            continue;
        }
        let after_open: &str = &entry[open + 2..first_line_end];
        let Some(rest) = skip_date(after_open) else {
            continue;
        };
        // The time part must be at least one character.
        let Some(close) = rest.get(1..).and_then(|r| r.find("]: ")) else {
            continue;
        };
        let header_len: usize = first_line_end - rest.len() + 1 + close + 3;
        let body: &str = &entry[header_len..];
        if body.is_empty() {
            continue;
        }
        return Some((&entry[..header_len], body));
    }
    None
}

/// Consumes `M/D/YYYY, ` and returns what follows.
fn skip_date(input: &str) -> Option<&str> {
    let rest: &str = skip_digits(input, 1, 2)?.strip_prefix('/')?;
    let rest: &str = skip_digits(rest, 1, 2)?.strip_prefix('/')?;
    skip_digits(rest, 4, 4)?.strip_prefix(", ")
}

fn skip_digits(input: &str, min: usize, max: usize) -> Option<&str> {
    let count: usize = input
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    if count < min {
        return None;
    }
    Some(&input[count..])
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use time::macros::datetime;

    fn create_test_author() -> NoteAuthor {
        NoteAuthor::new(String::from("Jane"), String::from("Doe"))
    }

    fn create_test_entry(action: NoteAction, text: &str) -> NoteEntry {
        NoteEntry::new(
            create_test_author(),
            action,
            String::from(text),
            datetime!(2026-03-07 14:05:09 UTC),
        )
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(
            format_note_timestamp(datetime!(2026-03-07 14:05:09 UTC)),
            "3/7/2026, 2:05:09 PM"
        );
        assert_eq!(
            format_note_timestamp(datetime!(2026-12-25 00:00:01 UTC)),
            "12/25/2026, 12:00:01 AM"
        );
    }

    #[test]
    fn test_entry_render() {
        let entry: NoteEntry = create_test_entry(NoteAction::Note, "Bring chairs");
        assert_eq!(
            entry.render(),
            "Jane Doe [3/7/2026, 2:05:09 PM]: Bring chairs"
        );
    }

    #[test]
    fn test_confirmation_and_rejection_bodies() {
        assert_eq!(
            NoteAction::Confirmation.body("Enjoy"),
            "Status changed to CONFIRMED. Note: Enjoy"
        );
        assert_eq!(
            NoteAction::Rejection.body("Double booked"),
            "Status changed to REJECTED. Reason: Double booked"
        );
    }

    #[test]
    fn test_append_to_empty_log_has_no_separator() {
        let entry: NoteEntry = create_test_entry(NoteAction::Note, "First");
        assert_eq!(append_note("", &entry), entry.render());
    }

    #[test]
    fn test_append_preserves_existing_prefix() {
        let existing: &str = "Legacy note without header";
        let entry: NoteEntry = create_test_entry(NoteAction::Confirmation, "ok");
        let log: String = append_note(existing, &entry);

        assert!(log.starts_with(existing));
        assert_eq!(
            log,
            format!("{existing}\n\nJane Doe [3/7/2026, 2:05:09 PM]: Status changed to CONFIRMED. Note: ok")
        );
    }

    #[test]
    fn test_render_splits_attributed_and_plain_entries() {
        let first: NoteEntry = create_test_entry(NoteAction::Note, "Bring chairs");
        let log: String = append_note("Legacy text", &first);
        let lines: Vec<NoteLine> = render_notes(&log);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], NoteLine::Plain(String::from("Legacy text")));
        assert_eq!(
            lines[1],
            NoteLine::Attributed {
                header: String::from("Jane Doe [3/7/2026, 2:05:09 PM]: "),
                body: String::from("Bring chairs"),
            }
        );
        assert_eq!(lines[1].to_string(), first.render());
    }

    #[test]
    fn test_render_empty_log() {
        assert!(render_notes("").is_empty());
    }

    #[test]
    fn test_header_requires_body_and_date_shape() {
        assert!(matches!(
            parse_entry("Jane Doe [3/7/2026, 2:05:09 PM]: "),
            NoteLine::Plain(_)
        ));
        assert!(matches!(
            parse_entry("Jane Doe [March 7, 2:05 PM]: hi"),
            NoteLine::Plain(_)
        ));
        assert!(matches!(
            parse_entry("[3/7/2026, 2:05:09 PM]: hi"),
            NoteLine::Plain(_)
        ));
    }

    #[test]
    fn test_header_with_bracket_in_name() {
        let line: NoteLine = parse_entry("Jo [Ops] Doe [10/12/2026, 9:00:00 AM]: done");
        assert_eq!(
            line,
            NoteLine::Attributed {
                header: String::from("Jo [Ops] Doe [10/12/2026, 9:00:00 AM]: "),
                body: String::from("done"),
            }
        );
    }

    #[test]
    fn test_blank_lines_in_text_stay_in_one_entry() {
        let entry: NoteEntry =
            create_test_entry(NoteAction::Note, "Bring chairs\n\n\nand a projector");
        let log: String = append_note("A", &entry);
        let lines: Vec<NoteLine> = render_notes(&log);

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            NoteLine::Attributed {
                header: String::from("Jane Doe [3/7/2026, 2:05:09 PM]: "),
                body: String::from("Bring chairs\nand a projector"),
            }
        );
    }

    #[test]
    fn test_multi_line_body_keeps_header() {
        let line: NoteLine = parse_entry("Jane Doe [3/7/2026, 2:05:09 PM]: line one\nline two");
        assert!(
            matches!(line, NoteLine::Attributed { ref body, .. } if body == "line one\nline two")
        );
    }
}
