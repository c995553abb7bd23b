//! # Publish Orchestrator
//!
//! Runs every record through the pipeline:
//!
//! ```text
//! record ─▶ filter ─▶ transform (+ images) ─▶ assemble ─▶ PostStore::write_post
//! ```
//!
//! Records without a title or a body are skipped. A failed write is logged and
//! counted, and the run moves on to the next record: one bad post never costs
//! the others. Nothing here returns an error; the outcome is entirely in the
//! returned [`CmdResult`].
//!
//! Records are pulled from the iterator one at a time, so a lazily parsed
//! export is never held in memory as a whole.

use crate::commands::{CmdMessage, CmdResult};
use crate::model::NoteRecord;
use crate::post::{self, PostOptions};
use crate::store::PostStore;
use crate::transform::{transform_note, ImageSink};
use tracing::{debug, info, warn};

pub fn run<R, I, S>(records: R, images: &I, store: &mut S, options: &PostOptions) -> CmdResult
where
    R: IntoIterator<Item = NoteRecord>,
    I: ImageSink + ?Sized,
    S: PostStore + ?Sized,
{
    let mut result = CmdResult::default();

    for record in records {
        if !record.is_publishable() {
            debug!(title = %record.title, "skipping note without title or body");
            result.skipped += 1;
            continue;
        }

        let note = transform_note(&record, images);
        let doc = post::assemble(note, record.modified_at, options);

        match store.write_post(&doc) {
            Ok(path) => {
                info!(file = %doc.filename, "created post");
                result.add_message(CmdMessage::info(format!("Created post: {}", doc.filename)));
                result.written_posts.push(path);
            }
            Err(e) => {
                warn!(file = %doc.filename, error = %e, "failed to write post");
                result.failed += 1;
                result.add_message(CmdMessage::warning(format!(
                    "Failed to write {}: {}",
                    doc.filename, e
                )));
            }
        }
    }

    if result.skipped > 0 {
        result.add_message(CmdMessage::info(format!(
            "Skipped {} note(s) without a title or body",
            result.skipped
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Published {} post(s)",
        result.written_count()
    )));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NotepressError, Result};
    use crate::model::{PostDocument, PublishedAsset};
    use crate::parser::parse_records;
    use crate::store::memory::MemPostStore;
    use crate::test_utils::TestSite;
    use crate::transform::NoImages;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::path::PathBuf;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    /// Fails to write any post whose filename contains "fail".
    struct FlakyStore {
        inner: MemPostStore,
    }

    impl PostStore for FlakyStore {
        fn write_post(&mut self, post: &PostDocument) -> Result<PathBuf> {
            if post.filename.contains("fail") {
                return Err(NotepressError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.inner.write_post(post)
        }

        fn read_post(&self, filename: &str) -> Result<Option<String>> {
            self.inner.read_post(filename)
        }

        fn list_posts(&self) -> Result<Vec<String>> {
            self.inner.list_posts()
        }
    }

    struct AlwaysPublish;

    impl ImageSink for AlwaysPublish {
        fn publish(&self, _source: &str) -> Option<PublishedAsset> {
            Some(PublishedAsset {
                content_hash: "h".to_string(),
                extension: "png".to_string(),
                destination_path: PathBuf::from("/site/assets/images/h.png"),
                published_path: "/assets/images/h.png".to_string(),
            })
        }
    }

    #[test]
    fn test_two_fragment_scenario() {
        let blob = "name:Trip Notes, body:• Pack #bag, attachments:\nname:Broken, attachments:\n";
        let mut store = MemPostStore::new();

        let result = run(
            parse_records(blob.to_string(), at()),
            &NoImages,
            &mut store,
            &PostOptions::default(),
        );

        assert_eq!(result.written_count(), 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(store.list_posts().unwrap(), vec!["2024-03-05-trip-notes.md"]);

        let content = store.read_post("2024-03-05-trip-notes.md").unwrap().unwrap();
        assert!(content.contains("title: \"Trip Notes\"\n"));
        assert!(content.contains("tags: [bag]\n"));
        assert!(content.contains("* Pack bag"));
    }

    #[test]
    fn test_records_without_title_or_body_never_publish() {
        let records = vec![
            NoteRecord::new("", "body", at()),
            NoteRecord::new("title", "", at()),
            NoteRecord::new("  ", "  ", at()),
        ];
        let mut store = MemPostStore::new();

        let result = run(records, &NoImages, &mut store, &PostOptions::default());

        assert_eq!(result.written_count(), 0);
        assert_eq!(result.skipped, 3);
        assert!(store.list_posts().unwrap().is_empty());
    }

    #[test]
    fn test_write_failure_does_not_stop_the_run() {
        let records = vec![
            NoteRecord::new("Will fail", "a", at()),
            NoteRecord::new("Fine", "b", at()),
        ];
        let mut store = FlakyStore {
            inner: MemPostStore::new(),
        };

        let result = run(records, &NoImages, &mut store, &PostOptions::default());

        assert_eq!(result.failed, 1);
        assert_eq!(result.written_count(), 1);
        assert_eq!(store.list_posts().unwrap(), vec!["2024-03-05-fine.md"]);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("Failed to write 2024-03-05-will-fail.md")));
    }

    #[test]
    fn test_same_title_same_day_last_write_wins() {
        let records = vec![
            NoteRecord::new("Same", "first", at()),
            NoteRecord::new("Same", "second", at()),
        ];
        let mut store = MemPostStore::new();

        let result = run(records, &NoImages, &mut store, &PostOptions::default());

        assert_eq!(result.written_count(), 2);
        let content = store.read_post("2024-03-05-same.md").unwrap().unwrap();
        assert!(content.ends_with("second\n"));
    }

    #[test]
    fn test_images_flow_into_the_post_body() {
        let records =
            vec![NoteRecord::new("Pics", "look", at()).with_attachments(vec!["/x.png".into()])];
        let mut store = MemPostStore::new();

        run(records, &AlwaysPublish, &mut store, &PostOptions::default());

        let content = store.read_post("2024-03-05-pics.md").unwrap().unwrap();
        assert!(content.ends_with("look\n\n![image](/assets/images/h.png)\n"));
    }

    #[test]
    fn test_summary_message() {
        let mut store = MemPostStore::new();
        let result = run(
            vec![NoteRecord::new("A", "b", at())],
            &NoImages,
            &mut store,
            &PostOptions::default(),
        );
        let last = result.messages.last().unwrap();
        assert_eq!(last.content, "Published 1 post(s)");
    }

    #[test]
    fn test_identical_attachments_publish_one_file() {
        let mut site = TestSite::new();
        let first = site.attachment("first.png", b"same pixels");
        let second = site.attachment("second.png", b"same pixels");
        let records = vec![
            NoteRecord::new("One", "a", at()).with_attachments(vec![first]),
            NoteRecord::new("Two", "b", at()).with_attachments(vec![second]),
        ];

        let result = site.ctx.api.publish_records(records);

        assert_eq!(result.written_count(), 2);
        assert_eq!(site.asset_files().len(), 1);
        let one = site.ctx.api.store().read_post("2024-03-05-one.md").unwrap().unwrap();
        let two = site.ctx.api.store().read_post("2024-03-05-two.md").unwrap().unwrap();
        let image_line = one.lines().last().unwrap();
        assert!(image_line.starts_with("![image](/assets/images/"));
        assert_eq!(image_line, two.lines().last().unwrap());
    }
}
