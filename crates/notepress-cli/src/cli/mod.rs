//! # CLI Layer
//!
//! The only place that knows about the terminal:
//!
//! 1. **Argument Parsing**: clap derive types in [`setup`]
//! 2. **Logging**: `tracing-subscriber` on stderr, filtered by `NOTEPRESS_LOG`
//! 3. **Context Setup**: site root, configuration and CLI overrides
//! 4. **Dispatch**: one handler per subcommand in [`commands`]
//! 5. **Output Formatting**: [`render`] prints results and previews

mod commands;
mod render;
mod setup;

pub use commands::run;
