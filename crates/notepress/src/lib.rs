//! # Notepress Architecture
//!
//! Notepress turns notes from a note-taking app into posts for a static blog:
//! front matter, markdown body, tags pulled from hashtags, and images copied
//! into the site under content-addressed names.
//!
//! Everything user-facing lives in the CLI crate. This crate takes Rust values
//! and returns Rust values.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (notepress-cli)                                        │
//! │  - Arguments, logging setup, printing, exit codes           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, init.rs)                                │
//! │  - Builds the context from a site root + config             │
//! │  - Absorbs collaborator failures into structured results    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/publish.rs)                        │
//! │  - Filter → transform → assemble → write, per record        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Pipeline stages                                            │
//! │  parser.rs · transform/ · assets.rs · post.rs               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collaborators sit behind traits at the edges: [`source::NoteSource`]
//! (where notes come from), [`store::PostStore`] (where posts go) and
//! [`vcs::VersionControl`] (what happens after). External programs are
//! always run through [`process::run_with_timeout`].
//!
//! ## Failure Model
//!
//! A run favors partial success. A malformed record becomes a partial record,
//! a broken attachment is dropped from its post, a failed write skips that
//! post, and a failed fetch or commit is reported in the result. None of them
//! abort the run.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`init`]: Site context setup
//! - [`commands`]: The publish orchestrator and result types
//! - [`parser`]: Raw export parsing
//! - [`transform`]: Markdown conversion and tag extraction
//! - [`assets`]: Content-addressed image publishing
//! - [`post`]: Slugs, filenames and front matter
//! - [`store`]: Post storage backends
//! - [`source`]: Note sources
//! - [`vcs`]: Committing the site
//! - [`process`]: Bounded external process execution
//! - [`config`]: Configuration
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod api;
pub mod assets;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod parser;
pub mod post;
pub mod process;
pub mod source;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod transform;
pub mod vcs;
