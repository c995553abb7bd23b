use super::{fetch_time, NoteSource, Records};
use crate::error::{NotepressError, Result};
use crate::parser::parse_records;
use chrono::NaiveDateTime;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Reads a raw `name:` / `body:` / `attachments:` export. A path of `-` reads
/// standard input.
pub struct ExportFileSource {
    path: PathBuf,
    fetched_at: Option<NaiveDateTime>,
}

impl ExportFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            fetched_at: None,
        }
    }

    /// Stamps records with `at` instead of the current time.
    pub fn with_timestamp(mut self, at: NaiveDateTime) -> Self {
        self.fetched_at = Some(at);
        self
    }

    fn read_blob(&self) -> Result<String> {
        if self.path.as_os_str() == "-" {
            let mut blob = String::new();
            std::io::stdin()
                .read_to_string(&mut blob)
                .map_err(NotepressError::Io)?;
            return Ok(blob);
        }
        if !self.path.is_file() {
            return Err(NotepressError::Source(format!(
                "export file not found: {}",
                self.path.display()
            )));
        }
        fs::read_to_string(&self.path).map_err(NotepressError::Io)
    }
}

impl NoteSource for ExportFileSource {
    fn name(&self) -> &str {
        "export file"
    }

    fn fetch(&self) -> Result<Records> {
        let blob = self.read_blob()?;
        let at = self.fetched_at.unwrap_or_else(fetch_time);
        Ok(Box::new(parse_records(blob, at)))
    }
}
