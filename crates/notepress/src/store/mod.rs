//! # Post Storage
//!
//! Where rendered posts end up. The orchestrator only knows the [`PostStore`]
//! trait; the backends decide the "how":
//!
//! - [`fs::FsPostStore`]: production, one file per post inside the site's
//!   posts directory, written atomically.
//! - [`memory::MemPostStore`]: keeps rendered posts in a map. Used by
//!   `preview` and by tests that should not touch the filesystem.
//!
//! Both have create-or-overwrite semantics: writing a post whose filename
//! already exists replaces it.

pub mod fs;
pub mod memory;

use crate::error::Result;
use crate::model::PostDocument;
use std::path::PathBuf;

pub trait PostStore {
    /// Writes (or overwrites) `post` and returns where it went.
    fn write_post(&mut self, post: &PostDocument) -> Result<PathBuf>;

    /// Reads back a post by filename. `Ok(None)` if it does not exist.
    fn read_post(&self, filename: &str) -> Result<Option<String>>;

    /// Filenames of all stored posts, sorted.
    fn list_posts(&self) -> Result<Vec<String>>;
}
