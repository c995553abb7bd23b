//! # Domain Model
//!
//! The data that flows through a publish run, in pipeline order:
//!
//! ```text
//! NoteRecord ──transform──▶ TransformedNote ──assemble──▶ PostDocument
//!                 │
//!                 └── attachments ──materialize──▶ PublishedAsset
//! ```
//!
//! ## Ownership
//!
//! - A [`NoteRecord`] is produced by a source (the raw export parser or a
//!   structured source) and is never mutated afterwards. The orchestrator
//!   consumes each record exactly once.
//! - A [`TransformedNote`] only lives for the duration of one record's trip
//!   through the pipeline.
//! - A [`PostDocument`] is written once per run. There is no update-in-place:
//!   a rerun simply overwrites a file with the same name.
//!
//! ## Content Addressing
//!
//! A [`PublishedAsset`] is keyed by the SHA-256 of its bytes. Two attachments
//! with identical content always resolve to the same destination path, so the
//! asset directory never holds duplicates.
//!
//! ## Filename Collisions
//!
//! The post filename is a pure function of the modification date and the
//! slugified title. Two notes with the same title on the same day map to the
//! same file and the later one wins. See [`crate::post`] for the opt-in
//! tiebreaker.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single note as exported by the note application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub title: String,
    pub body: String,
    /// Attachment paths in the order the note references them.
    #[serde(default)]
    pub attachments: Vec<String>,
    pub modified_at: NaiveDateTime,
}

impl NoteRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>, modified_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            attachments: Vec::new(),
            modified_at,
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Both a title and a body are required for a record to become a post.
    pub fn is_publishable(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

/// Link between an attachment as referenced by the note and where it ended up
/// on the published site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub original_path: String,
    pub published_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformedNote {
    pub title: String,
    pub markup_body: String,
    /// Tags in order of first appearance, without duplicates.
    pub tags: Vec<String>,
    pub image_refs: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedAsset {
    /// Hex-encoded SHA-256 of the file bytes.
    pub content_hash: String,
    /// Lowercased extension, without the leading dot.
    pub extension: String,
    /// Where the bytes live on disk.
    pub destination_path: PathBuf,
    /// Root-relative URL used in the post body.
    pub published_path: String,
}

impl PublishedAsset {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.content_hash, self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub layout: String,
    pub title: String,
    pub date: NaiveDateTime,
    pub tags: Vec<String>,
    // Only rendered when non-empty
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDocument {
    /// `YYYY-MM-DD-<slug>.md`
    pub filename: String,
    pub front_matter: FrontMatter,
    pub body: String,
}
