//! # Configuration
//!
//! Notepress configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `NOTEPRESS__POSTS_DIR`, `NOTEPRESS__PUSH`, etc.
//! 2. **Site Config**: `<site>/notepress.toml`, next to the Jekyll `_config.yml`.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `posts_dir` | `_posts` | Where posts are written, relative to the site root |
//! | `assets_dir` | `assets/images` | Where images are copied, relative to the site root |
//! | `assets_url_prefix` | `/assets/images` | URL the site serves `assets_dir` under |
//! | `layout` | `post` | Front matter `layout` |
//! | `categories` | none | Front matter `categories`, omitted when unset |
//! | `default_image_ext` | `png` | Extension for attachments that have none |
//! | `unique_filenames` | `false` | Add a hash tiebreaker to post filenames |
//! | `lookback_days` | `7` | How far back to fetch modified notes |
//! | `fetch_timeout_secs` | `30` | Bound on the note fetch |
//! | `git_timeout_secs` | `60` | Bound on each git invocation |
//! | `commit` | `true` | Commit the site after publishing |
//! | `push` | `true` | Push after committing |

use crate::post::PostOptions;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "notepress.toml";

/// Configuration for notepress, stored in `notepress.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotepressConfig {
    /// Directory for generated posts, relative to the site root.
    #[config(default = "_posts")]
    pub posts_dir: String,

    /// Directory for published images, relative to the site root.
    #[config(default = "assets/images")]
    pub assets_dir: String,

    /// Root-relative URL under which `assets_dir` is served.
    #[config(default = "/assets/images")]
    pub assets_url_prefix: String,

    /// Front matter layout.
    #[config(default = "post")]
    pub layout: String,

    /// Front matter categories. Omitted from posts when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Extension used for attachments without one.
    #[config(default = "png")]
    pub default_image_ext: String,

    /// Append a short hash to post filenames so same-day title collisions
    /// do not overwrite each other.
    #[config(default = false)]
    pub unique_filenames: bool,

    /// Only notes modified within this many days are fetched.
    #[config(default = 7)]
    pub lookback_days: u32,

    /// Seconds to wait for the note application.
    #[config(default = 30)]
    pub fetch_timeout_secs: u64,

    /// Seconds to wait for each git command.
    #[config(default = 60)]
    pub git_timeout_secs: u64,

    /// Commit the site repository after publishing.
    #[config(default = true)]
    pub commit: bool,

    /// Push after committing.
    #[config(default = true)]
    pub push: bool,
}

impl Default for NotepressConfig {
    fn default() -> Self {
        Self {
            posts_dir: "_posts".to_string(),
            assets_dir: "assets/images".to_string(),
            assets_url_prefix: "/assets/images".to_string(),
            layout: "post".to_string(),
            categories: None,
            default_image_ext: "png".to_string(),
            unique_filenames: false,
            lookback_days: 7,
            fetch_timeout_secs: 30,
            git_timeout_secs: 60,
            commit: true,
            push: true,
        }
    }
}

impl NotepressConfig {
    pub fn posts_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.posts_dir)
    }

    pub fn assets_path(&self, site_root: &Path) -> PathBuf {
        site_root.join(&self.assets_dir)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn post_options(&self) -> PostOptions {
        PostOptions {
            layout: self.layout.clone(),
            categories: self.categories.clone().unwrap_or_default(),
            unique_filenames: self.unique_filenames,
        }
    }
}
