use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepress", bin_name = "notepress", version)]
#[command(about = "Publish your notes as blog posts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site root (defaults to the current directory)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub site: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch notes, write posts and images, then commit the site
    Publish(PublishArgs),

    /// Render the posts that `publish` would write, without writing anything
    Preview(SourceArgs),

    /// Show the resolved configuration
    Config,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Ask Notes.app via osascript
    AppleNotes,
    /// Raw `name:` / `body:` / `attachments:` export (`-` for stdin)
    Export,
    /// JSON array of records
    Json,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Where notes come from
    #[arg(long = "from", value_enum, default_value = "apple-notes")]
    pub from: SourceKind,

    /// Input file for `export` and `json` sources
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Only fetch notes modified within this many days (apple-notes)
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Do not commit the site afterwards
    #[arg(long)]
    pub no_commit: bool,

    /// Commit but do not push
    #[arg(long)]
    pub no_push: bool,
}
