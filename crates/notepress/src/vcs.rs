//! # Version Control
//!
//! After the posts are written the site repository can be committed and
//! pushed. The publish result never depends on this step: the API records the
//! [`CommitOutcome`] and moves on.
//!
//! [`GitPublisher`] runs `git add -A`, `git commit` and (optionally)
//! `git push` inside the site root, each with a bounded wait. It sets the
//! child's working directory and never changes the process-wide one.

use crate::error::{NotepressError, Result};
use crate::post::TIMESTAMP_FORMAT;
use crate::process::{run_with_timeout, ProcessOutput};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommitOutcome {
    Committed { message: String, pushed: bool },
    NothingToCommit,
    Failed { reason: String },
}

pub trait VersionControl {
    /// Stages everything, commits with `message` and publishes the commit.
    fn commit_all(&self, message: &str) -> Result<CommitOutcome>;
}

pub fn commit_message(at: NaiveDateTime) -> String {
    format!("Update notes {}", at.format(TIMESTAMP_FORMAT))
}

pub struct GitPublisher {
    repo: PathBuf,
    timeout: Duration,
    push: bool,
}

impl GitPublisher {
    pub fn new(repo: PathBuf, timeout: Duration) -> Self {
        Self {
            repo,
            timeout,
            push: true,
        }
    }

    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    fn git(&self, args: &[&str]) -> Result<ProcessOutput> {
        debug!(args = %args.join(" "), "running git");
        let output = run_with_timeout(
            Command::new("git").current_dir(&self.repo).args(args),
            self.timeout,
        )?;
        if !output.success() {
            return Err(NotepressError::Vcs(format!(
                "git {} failed: {}",
                args.join(" "),
                output.stderr.trim()
            )));
        }
        Ok(output)
    }
}

impl VersionControl for GitPublisher {
    fn commit_all(&self, message: &str) -> Result<CommitOutcome> {
        self.git(&["add", "-A"])?;

        let status = self.git(&["status", "--porcelain"])?;
        if status.stdout.trim().is_empty() {
            info!("nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.git(&["commit", "-m", message])?;
        if self.push {
            self.git(&["push"])?;
        }

        info!(pushed = self.push, "committed site changes");
        Ok(CommitOutcome::Committed {
            message: message.to_string(),
            pushed: self.push,
        })
    }
}
