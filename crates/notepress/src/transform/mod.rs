//! # Content Transformer
//!
//! Turns a note body into the markdown dialect the site generator expects and
//! pulls out its tags. The steps run in a fixed order because their rules
//! overlap:
//!
//! 1. **Tags** are extracted from the untouched body ([`tags::extract_tags`]).
//! 2. **Tag marks** are stripped from standalone tags, keeping the word
//!    ([`tags::strip_tag_marks`]).
//! 3. **Line prefixes** (bullets, ordinals, checkboxes) and **emphasis** are
//!    rewritten in one pass per line ([`markup::to_markdown`]).
//! 4. **Images**: every attachment is handed to an [`ImageSink`]. Published
//!    images are appended as `![image](..)` blocks in attachment order;
//!    attachments that fail to publish are left out.
//!
//! Steps 1–3 are pure. Step 4 only touches the outside world through the
//! sink, which never returns an error.

pub mod markup;
pub mod tags;

use crate::model::{ImageRef, NoteRecord, PublishedAsset, TransformedNote};
use tracing::debug;

/// Where attachments get published. Implementations swallow their own
/// failures and return `None`.
pub trait ImageSink {
    fn publish(&self, source: &str) -> Option<PublishedAsset>;
}

/// An [`ImageSink`] that publishes nothing. Useful for previews and tests.
pub struct NoImages;

impl ImageSink for NoImages {
    fn publish(&self, _source: &str) -> Option<PublishedAsset> {
        None
    }
}

/// Body rewrite without images: returns the markup and the tags.
pub fn transform_body(body: &str) -> (String, Vec<String>) {
    let tags = tags::extract_tags(body);
    let stripped = tags::strip_tag_marks(body);
    (markup::to_markdown(&stripped), tags)
}

pub fn transform_note<I: ImageSink + ?Sized>(record: &NoteRecord, images: &I) -> TransformedNote {
    let (mut markup_body, tags) = transform_body(&record.body);

    let mut image_refs = Vec::new();
    for source in &record.attachments {
        match images.publish(source) {
            Some(asset) => image_refs.push(ImageRef {
                original_path: source.clone(),
                published_path: asset.published_path,
            }),
            None => debug!(title = %record.title, source = %source, "image left out of post"),
        }
    }

    for image in &image_refs {
        markup_body.push_str("\n\n");
        markup_body.push_str(&format!("![image]({})", image.published_path));
    }

    TransformedNote {
        title: record.title.clone(),
        markup_body,
        tags,
        image_refs,
    }
}
