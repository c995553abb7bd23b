use super::PostStore;
use crate::error::{NotepressError, Result};
use crate::model::PostDocument;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const POST_EXT: &str = "md";

pub struct FsPostStore {
    posts_dir: PathBuf,
}

impl FsPostStore {
    pub fn new(posts_dir: PathBuf) -> Self {
        Self { posts_dir }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.posts_dir.exists() {
            fs::create_dir_all(&self.posts_dir).map_err(NotepressError::Io)?;
        }
        Ok(())
    }
}

impl PostStore for FsPostStore {
    fn write_post(&mut self, post: &PostDocument) -> Result<PathBuf> {
        self.ensure_dir()?;

        let target_path = self.posts_dir.join(&post.filename);

        let tmp_path = self
            .posts_dir
            .join(format!(".post-{}.tmp", Uuid::new_v4()));
        let content = post.render();
        write_atomically(&tmp_path, &target_path, |file| file.write_all(content.as_bytes()))
            .map_err(NotepressError::Io)?;

        Ok(target_path)
    }

    fn read_post(&self, filename: &str) -> Result<Option<String>> {
        let path = self.posts_dir.join(filename);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(NotepressError::Io)?;
        Ok(Some(content))
    }

    fn list_posts(&self) -> Result<Vec<String>> {
        if !self.posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.posts_dir).map_err(NotepressError::Io)? {
            let path = entry.map_err(NotepressError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(POST_EXT) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Fills `tmp_path` through `fill` and renames it onto `target`. The temp file
/// is removed if any step fails, so a target is either complete or untouched.
pub(crate) fn write_atomically<F>(tmp_path: &Path, target: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let result = fs::File::create(tmp_path)
        .and_then(|mut file| fill(&mut file))
        .and_then(|()| fs::rename(tmp_path, target));
    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}
