//! # API Facade
//!
//! The single entry point for UI clients. The facade:
//! - **Dispatches** to the command layer
//! - **Absorbs collaborator failures**: a failed fetch becomes an empty run,
//!   a failed commit becomes a [`CommitOutcome::Failed`]
//! - **Returns structured types** ([`CmdResult`]), never strings
//!
//! ## Generic Over PostStore
//!
//! `NotepressApi<S: PostStore>` is generic over where posts are written:
//! - Production: `NotepressApi<FsPostStore>`
//! - Testing: `NotepressApi<MemPostStore>`

use crate::assets::ImageMaterializer;
use crate::commands::{self, CmdMessage, CmdResult, PostPreview};
use crate::error::NotepressError;
use crate::model::NoteRecord;
use crate::post::PostOptions;
use crate::source::NoteSource;
use crate::store::memory::MemPostStore;
use crate::store::PostStore;
use crate::transform::NoImages;
use crate::vcs::{commit_message, CommitOutcome, VersionControl};
use chrono::NaiveDateTime;
use tracing::{info, warn};

pub struct NotepressApi<S: PostStore> {
    store: S,
    images: ImageMaterializer,
    options: PostOptions,
}

impl<S: PostStore> NotepressApi<S> {
    pub fn new(store: S, images: ImageMaterializer, options: PostOptions) -> Self {
        Self {
            store,
            images,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &PostOptions {
        &self.options
    }

    pub fn publish_records<R>(&mut self, records: R) -> CmdResult
    where
        R: IntoIterator<Item = NoteRecord>,
    {
        let result =
            commands::publish::run(records, &self.images, &mut self.store, &self.options);
        info!(
            written = result.written_count(),
            skipped = result.skipped,
            failed = result.failed,
            "publish run finished"
        );
        result
    }

    /// Fetches from `source` and publishes. A failed fetch yields an empty
    /// result carrying an error message.
    pub fn publish(&mut self, source: &dyn NoteSource) -> CmdResult {
        match source.fetch() {
            Ok(records) => self.publish_records(records),
            Err(e) => fetch_failed(source, e),
        }
    }

    /// Commits the site if the run wrote anything. The outcome is recorded on
    /// `result`; it never turns into an error.
    pub fn commit(&self, vcs: &dyn VersionControl, result: &mut CmdResult, at: NaiveDateTime) {
        if result.written_count() == 0 {
            result.add_message(CmdMessage::info("No posts written, skipping commit"));
            return;
        }

        let outcome = match vcs.commit_all(&commit_message(at)) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "commit failed");
                CommitOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let message = match &outcome {
            CommitOutcome::Committed { pushed: true, .. } => {
                CmdMessage::success("Committed and pushed changes")
            }
            CommitOutcome::Committed { pushed: false, .. } => {
                CmdMessage::success("Committed changes")
            }
            CommitOutcome::NothingToCommit => CmdMessage::info("Nothing to commit"),
            CommitOutcome::Failed { reason } => {
                CmdMessage::warning(format!("Commit failed: {}", reason))
            }
        };
        result.add_message(message);
        result.commit = Some(outcome);
    }

    /// Renders what `publish` would write, without writing posts or images.
    pub fn preview(&self, source: &dyn NoteSource) -> CmdResult {
        preview(source, &self.options)
    }
}

/// Renders posts for `source` into memory. Needs no site: images are not
/// copied and nothing is written.
pub fn preview(source: &dyn NoteSource, options: &PostOptions) -> CmdResult {
    let records = match source.fetch() {
        Ok(records) => records,
        Err(e) => return fetch_failed(source, e),
    };

    let mut store = MemPostStore::new();
    let run = commands::publish::run(records, &NoImages, &mut store, options);

    let mut result = CmdResult {
        skipped: run.skipped,
        ..Default::default()
    };
    result.previews = store
        .posts()
        .map(|(filename, content)| PostPreview {
            filename: filename.clone(),
            content: content.clone(),
        })
        .collect();
    result.add_message(CmdMessage::info(format!(
        "Previewed {} post(s)",
        result.previews.len()
    )));
    result
}

fn fetch_failed(source: &dyn NoteSource, error: NotepressError) -> CmdResult {
    warn!(source = source.name(), error = %error, "fetching notes failed");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::error(format!(
        "Could not fetch notes from {}: {}",
        source.name(),
        error
    )));
    result
}
