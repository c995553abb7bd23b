use super::{NoteSource, Records};
use crate::error::{NotepressError, Result};
use crate::model::NoteRecord;
use std::fs;
use std::path::PathBuf;

/// Reads a JSON array of records:
///
/// ```json
/// [{"title": "Trip", "body": "• Pack", "attachments": [], "modified_at": "2024-03-05T09:30:00"}]
/// ```
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl NoteSource for JsonSource {
    fn name(&self) -> &str {
        "json"
    }

    fn fetch(&self) -> Result<Records> {
        if !self.path.is_file() {
            return Err(NotepressError::Source(format!(
                "json file not found: {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path).map_err(NotepressError::Io)?;
        let records: Vec<NoteRecord> =
            serde_json::from_str(&content).map_err(NotepressError::Serialization)?;
        Ok(Box::new(records.into_iter()))
    }
}
