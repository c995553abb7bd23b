//! # Image Materializer
//!
//! Copies note attachments into the site's asset directory under a
//! content-addressed name: `<sha256-of-bytes>.<ext>`.
//!
//! ## Guarantees
//!
//! - **Deduplication**: identical bytes always land on the same file, no matter
//!   how many notes reference them or how many runs happen. The hash has no
//!   time component. The extension is part of the name, so the same bytes
//!   saved as `a.png` and `a.jpg` become two files (one per extension).
//! - **Idempotence**: if the destination already exists the copy is skipped.
//! - **Atomicity**: bytes are written to a temp file and renamed into place,
//!   so an interrupted run never leaves a truncated image behind.
//! - **No errors past this boundary**: a missing, empty or unreadable source,
//!   or a failed write, is logged and reported as `None`. The post simply goes
//!   out without that image.
//!
//! Sources may be plain paths or `file://` URLs (percent-encoded, as the note
//! application emits them).

use crate::error::{NotepressError, Result};
use crate::model::PublishedAsset;
use crate::store::fs::write_atomically;
use crate::transform::ImageSink;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const FILE_SCHEME: &str = "file://";

pub struct ImageMaterializer {
    dest_dir: PathBuf,
    url_prefix: String,
    default_ext: String,
}

impl ImageMaterializer {
    /// `dest_dir` is where files are written; `url_prefix` is the root-relative
    /// URL under which the site serves that directory.
    pub fn new(dest_dir: PathBuf, url_prefix: &str) -> Self {
        Self {
            dest_dir,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            default_ext: "png".to_string(),
        }
    }

    pub fn with_default_ext(mut self, ext: &str) -> Self {
        self.default_ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Publishes `source`, returning `None` if anything goes wrong.
    pub fn materialize(&self, source: &str) -> Option<PublishedAsset> {
        match self.try_materialize(source) {
            Ok(asset) => Some(asset),
            Err(e) => {
                warn!(source = %source, error = %e, "image materialization failed");
                None
            }
        }
    }

    fn try_materialize(&self, source: &str) -> Result<PublishedAsset> {
        let path = source_path(source);
        if !path.is_file() {
            return Err(NotepressError::PathNotFound(path));
        }

        let bytes = fs::read(&path)?;
        if bytes.is_empty() {
            return Err(NotepressError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is empty", path.display()),
            )));
        }

        let content_hash = content_hash(&bytes);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| self.default_ext.clone());

        let file_name = format!("{}.{}", content_hash, extension);
        let destination_path = self.dest_dir.join(&file_name);
        let published_path = format!("{}/{}", self.url_prefix, file_name);

        if destination_path.exists() {
            debug!(file = %file_name, "image already published");
        } else {
            self.copy_into_place(&path, &bytes, &destination_path)?;
            debug!(file = %file_name, source = %path.display(), "image published");
        }

        Ok(PublishedAsset {
            content_hash,
            extension,
            destination_path,
            published_path,
        })
    }

    fn copy_into_place(&self, source: &Path, bytes: &[u8], target: &Path) -> Result<()> {
        if !self.dest_dir.exists() {
            fs::create_dir_all(&self.dest_dir)?;
        }

        let tmp_path = self.dest_dir.join(format!(".img-{}.tmp", Uuid::new_v4()));
        let source_meta = fs::metadata(source).ok();
        write_atomically(&tmp_path, target, |file| {
            file.write_all(bytes)?;
            // Carry over mtime and permissions where the platform lets us.
            if let Some(meta) = &source_meta {
                if let Ok(modified) = meta.modified() {
                    let _ = file.set_modified(modified);
                }
                let _ = file.set_permissions(meta.permissions());
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl ImageSink for ImageMaterializer {
    fn publish(&self, source: &str) -> Option<PublishedAsset> {
        self.materialize(source)
    }
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Turns an attachment reference into a filesystem path, stripping a
/// `file://` scheme and decoding percent escapes.
pub fn source_path(source: &str) -> PathBuf {
    let source = source.trim();
    match source.strip_prefix(FILE_SCHEME) {
        Some(rest) => match urlencoding::decode(rest) {
            Ok(decoded) => PathBuf::from(decoded.into_owned()),
            Err(_) => PathBuf::from(rest),
        },
        None => PathBuf::from(source),
    }
}
