use crate::config::NotepressConfig;
use crate::init::{initialize_with, NotepressContext};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway site directory with an initialized context.
pub struct TestSite {
    // Keep the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub ctx: NotepressContext,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    pub fn new() -> Self {
        Self::with_config(NotepressConfig::default())
    }

    pub fn with_config(config: NotepressConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let ctx = initialize_with(&root, config).expect("failed to initialize site");
        Self {
            _temp_dir: temp_dir,
            root,
            ctx,
        }
    }

    /// Writes an attachment outside the site and returns its path.
    pub fn attachment(&self, name: &str, bytes: &[u8]) -> String {
        let dir = self.root.join("attachments");
        fs::create_dir_all(&dir).expect("failed to create attachment dir");
        let path = dir.join(name);
        fs::write(&path, bytes).expect("failed to write attachment");
        path.to_string_lossy().into_owned()
    }

    pub fn asset_files(&self) -> Vec<String> {
        let dir = self.ctx.config.assets_path(&self.root);
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("assets dir missing")
            .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
