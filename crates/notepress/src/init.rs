//! # Initialization
//!
//! Wires a site directory into a ready-to-use [`NotepressContext`]:
//!
//! 1. Load configuration (global config dir, then `<site>/notepress.toml`,
//!    then `NOTEPRESS__*` environment variables).
//! 2. Make sure the posts and assets directories exist.
//! 3. Build the filesystem post store, the image materializer and the API.
//!
//! Everything is derived from the site root passed in; the process working
//! directory is never changed.
//!
//! ## Environment Variables
//!
//! * `NOTEPRESS_CONFIG_HOME` - If set, replaces the OS config directory as the
//!   global config location. Primarily used for testing to isolate global state.

use crate::api::NotepressApi;
use crate::assets::ImageMaterializer;
use crate::config::{NotepressConfig, CONFIG_FILE};
use crate::error::{NotepressError, Result};
use crate::store::fs::FsPostStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct NotepressContext {
    pub api: NotepressApi<FsPostStore>,
    pub config: NotepressConfig,
    pub site_root: PathBuf,
}

/// The global config directory, if one can be determined.
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var("NOTEPRESS_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "notepress", "notepress")
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
}

/// Config search paths: global first, the site overrides it.
pub fn config_search_paths(site_root: &Path) -> Vec<SearchPath> {
    let mut paths = Vec::new();
    if let Some(global) = global_config_dir() {
        paths.push(SearchPath::Path(global));
    }
    paths.push(SearchPath::Path(site_root.to_path_buf()));
    paths
}

/// Loads the layered configuration for `site_root`. Falls back to defaults
/// (with a warning) if a config file cannot be read.
pub fn load_config(site_root: &Path) -> NotepressConfig {
    let loaded: std::result::Result<NotepressConfig, _> = Clapfig::builder()
        .app_name("notepress")
        .file_name(CONFIG_FILE)
        .search_paths(config_search_paths(site_root))
        .search_mode(SearchMode::Merge)
        .load();

    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "could not load configuration, using defaults");
            NotepressConfig::default()
        }
    }
}

/// Creates the posts and assets directories under `site_root`.
pub fn ensure_site_dirs(site_root: &Path, config: &NotepressConfig) -> Result<()> {
    if !site_root.is_dir() {
        return Err(NotepressError::PathNotFound(site_root.to_path_buf()));
    }
    for dir in [config.posts_path(site_root), config.assets_path(site_root)] {
        if !dir.exists() {
            debug!(dir = %dir.display(), "creating directory");
            fs::create_dir_all(&dir).map_err(NotepressError::Io)?;
        }
    }
    Ok(())
}

/// Loads configuration for `site_root` and builds the context.
pub fn initialize(site_root: &Path) -> Result<NotepressContext> {
    let config = load_config(site_root);
    initialize_with(site_root, config)
}

/// Builds the context from an already-resolved configuration.
pub fn initialize_with(site_root: &Path, config: NotepressConfig) -> Result<NotepressContext> {
    ensure_site_dirs(site_root, &config)?;

    let store = FsPostStore::new(config.posts_path(site_root));
    let images = ImageMaterializer::new(config.assets_path(site_root), &config.assets_url_prefix)
        .with_default_ext(&config.default_image_ext);
    let api = NotepressApi::new(store, images, config.post_options());

    Ok(NotepressContext {
        api,
        config,
        site_root: site_root.to_path_buf(),
    })
}
