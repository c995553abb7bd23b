//! # Note Sources
//!
//! Where note records come from. A source hands the orchestrator a lazy
//! sequence of [`NoteRecord`]s; everything about talking to the note
//! application stays behind the [`NoteSource`] trait.
//!
//! - [`AppleNotesSource`]: asks Notes.app for recently modified notes through
//!   `osascript` and parses the raw export.
//! - [`ExportFileSource`]: the same raw export, read from a file (or stdin).
//! - [`JsonSource`]: a JSON array of records. Field boundaries are explicit,
//!   so bodies may contain anything, including the raw export's markers.
//!
//! A failing fetch is a [`crate::error::NotepressError::Source`] (or a process
//! error/timeout). The API turns it into an empty run rather than a failure.

mod apple_notes;
mod export;
mod json;

pub use apple_notes::AppleNotesSource;
pub use export::ExportFileSource;
pub use json::JsonSource;

use crate::error::Result;
use crate::model::NoteRecord;
use chrono::{Local, NaiveDateTime};

pub type Records = Box<dyn Iterator<Item = NoteRecord>>;

pub trait NoteSource {
    /// Short human-readable name, used in log lines and messages.
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Records>;
}

/// Wall-clock time used to stamp records whose source has no dates.
pub(crate) fn fetch_time() -> NaiveDateTime {
    Local::now().naive_local()
}
