//! # Raw Record Parser
//!
//! Turns the flat text that the note application exports into [`NoteRecord`]s.
//!
//! ## Export Format
//!
//! ```text
//! name:Trip Notes, body:• Pack #bag, attachments:/tmp/a.png|/tmp/b.jpg
//! name:Groceries, body:☐ milk, attachments:
//! ```
//!
//! Each record starts with the boundary token `name:`. Inside a record the
//! first `body:` and the first `attachments:` after it split the fragment into
//! title, body and attachment list. Attachment paths are separated by `|`.
//! A field followed by another marker loses one trailing `,` (the separator
//! the export writes); any other commas are the note's own text.
//!
//! A marker only counts when it starts the blob or follows whitespace, `,` or
//! `{`, so `username:` inside a body does not open a new record. Bodies that
//! contain a literal ` name:` still break the format; sources that can emit
//! structured data should use [`crate::source::JsonSource`] instead.
//!
//! ## Malformed Fragments
//!
//! Parsing never fails. A fragment with a missing marker becomes a partial
//! record (the missing fields are empty) and a log line. The orchestrator later
//! drops records without a title or body.
//!
//! ## Timestamps
//!
//! The export carries no modification date, so every record is stamped with
//! the fallback time handed to [`parse_records`] (normally the fetch time).

use crate::model::NoteRecord;
use chrono::NaiveDateTime;
use tracing::{debug, warn};

pub const RECORD_BOUNDARY: &str = "name:";
pub const BODY_MARKER: &str = "body:";
pub const ATTACHMENTS_MARKER: &str = "attachments:";
pub const ATTACHMENT_SEPARATOR: char = '|';

/// Lazily parses an export blob. Single pass: the parser owns the blob and
/// cannot be restarted.
pub struct RecordParser {
    blob: String,
    cursor: usize,
    fallback_time: NaiveDateTime,
    fragments_seen: usize,
}

pub fn parse_records(blob: String, fallback_time: NaiveDateTime) -> RecordParser {
    RecordParser::new(blob, fallback_time)
}

impl RecordParser {
    pub fn new(blob: String, fallback_time: NaiveDateTime) -> Self {
        let cursor = match find_marker(&blob, RECORD_BOUNDARY, 0) {
            Some(start) => {
                if !blob[..start].trim().is_empty() {
                    debug!(bytes = start, "ignoring text before the first record");
                }
                start
            }
            None => {
                if !blob.trim().is_empty() {
                    warn!("export contains text but no `{}` record marker", RECORD_BOUNDARY);
                }
                blob.len()
            }
        };

        Self {
            blob,
            cursor,
            fallback_time,
            fragments_seen: 0,
        }
    }
}

impl Iterator for RecordParser {
    type Item = NoteRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.blob.len() {
            return None;
        }

        let start = self.cursor + RECORD_BOUNDARY.len();
        let end = find_marker(&self.blob, RECORD_BOUNDARY, start).unwrap_or(self.blob.len());
        self.cursor = end;
        self.fragments_seen += 1;

        Some(parse_fragment(
            &self.blob[start..end],
            self.fragments_seen,
            self.fallback_time,
        ))
    }
}

/// Carves one fragment (the text after a boundary token) into a record.
fn parse_fragment(fragment: &str, position: usize, modified_at: NaiveDateTime) -> NoteRecord {
    let body_at = find_marker(fragment, BODY_MARKER, 0);
    let search_from = body_at.map(|at| at + BODY_MARKER.len()).unwrap_or(0);
    let attachments_at = find_marker(fragment, ATTACHMENTS_MARKER, search_from);

    // A field followed by another marker ends in the export's `,` separator.
    let (title, body, attachments) = match (body_at, attachments_at) {
        (Some(b), Some(a)) => (
            before_marker(&fragment[..b]),
            before_marker(&fragment[b + BODY_MARKER.len()..a]),
            &fragment[a + ATTACHMENTS_MARKER.len()..],
        ),
        (Some(b), None) => {
            debug!(position, "record has no attachment list");
            (
                before_marker(&fragment[..b]),
                fragment[b + BODY_MARKER.len()..].trim(),
                "",
            )
        }
        (None, Some(a)) => {
            warn!(position, "record is missing its body marker");
            (
                before_marker(&fragment[..a]),
                "",
                &fragment[a + ATTACHMENTS_MARKER.len()..],
            )
        }
        (None, None) => {
            warn!(position, "record is missing its body and attachment markers");
            (fragment.trim(), "", "")
        }
    };

    NoteRecord {
        title: title.to_string(),
        body: body.to_string(),
        attachments: split_attachments(attachments),
        modified_at,
    }
}

pub fn split_attachments(list: &str) -> Vec<String> {
    list.split(ATTACHMENT_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Trims a field that precedes a marker, dropping at most one `,` separator.
fn before_marker(field: &str) -> &str {
    let field = field.trim();
    field.strip_suffix(',').unwrap_or(field).trim_end()
}

/// Finds `marker` at or after `from`, accepting only occurrences at a field
/// boundary (start of text, or after whitespace, `,` or `{`).
fn find_marker(haystack: &str, marker: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    while offset <= haystack.len() {
        let at = offset + haystack[offset..].find(marker)?;
        let at_boundary = haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == ',' || c == '{');
        if at_boundary {
            return Some(at);
        }
        offset = at + marker.len();
    }
    None
}
