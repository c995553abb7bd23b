//! # Notepress CLI
//!
//! The binary is intentionally thin: argument parsing, logging setup,
//! context wiring and printing live in `src/cli/`, and this file only invokes
//! `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/notepress/` : Core library, UI-agnostic pipeline and collaborators
//! - `crates/notepress-cli/` : This CLI tool, depends on the `notepress` library
//!
//! ## Exit Codes
//!
//! A publish run that fetched nothing, dropped images or failed to commit
//! still exits 0; the outcome is in the printed messages. Only CLI-level
//! problems (bad arguments, a missing site directory) exit 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
