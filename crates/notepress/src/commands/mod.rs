//! # Command Layer
//!
//! The business logic of a publish run. Commands operate on domain types and
//! return a structured [`CmdResult`]; they never print, never exit and never
//! prompt. The UI (the CLI crate, or anything else) decides how to present the
//! result.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `written_posts`: where each post went, in write order
//! - `skipped` / `failed`: records dropped by filtering or by a write error
//! - `previews`: rendered posts (for `preview`, which writes nothing)
//! - `commit`: the outcome of the version-control step, when one ran
//! - `messages`: leveled messages for the user
//!
//! ## Command Modules
//!
//! - [`publish`]: the orchestrator (filter → transform → assemble → write)

use crate::vcs::CommitOutcome;
use serde::Serialize;
use std::path::PathBuf;

pub mod publish;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A rendered post that was not written anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct PostPreview {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CmdResult {
    pub written_posts: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
    pub previews: Vec<PostPreview>,
    pub commit: Option<CommitOutcome>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// Number of post documents written.
    pub fn written_count(&self) -> usize {
        self.written_posts.len()
    }
}
