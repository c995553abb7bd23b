use super::PostStore;
use crate::error::Result;
use crate::model::PostDocument;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory post store. Paths it returns are virtual (`mem://<filename>`).
#[derive(Debug, Default)]
pub struct MemPostStore {
    posts: BTreeMap<String, String>,
}

impl MemPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered posts in filename order.
    pub fn posts(&self) -> impl Iterator<Item = (&String, &String)> {
        self.posts.iter()
    }
}

impl PostStore for MemPostStore {
    fn write_post(&mut self, post: &PostDocument) -> Result<PathBuf> {
        self.posts.insert(post.filename.clone(), post.render());
        Ok(PathBuf::from(format!("mem://{}", post.filename)))
    }

    fn read_post(&self, filename: &str) -> Result<Option<String>> {
        Ok(self.posts.get(filename).cloned())
    }

    fn list_posts(&self) -> Result<Vec<String>> {
        Ok(self.posts.keys().cloned().collect())
    }
}
