use super::render::{print_previews, print_result};
use super::setup::{Cli, Commands, PublishArgs, SourceArgs, SourceKind};
use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::Parser;
use notepress::api;
use notepress::config::NotepressConfig;
use notepress::init::{initialize_with, load_config};
use notepress::source::{AppleNotesSource, ExportFileSource, JsonSource, NoteSource};
use notepress::vcs::GitPublisher;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "NOTEPRESS_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let site_root = resolve_site(cli.site.as_deref())?;
    debug!(site = %site_root.display(), "resolved site root");

    match cli.command {
        Commands::Publish(args) => handle_publish(&site_root, args),
        Commands::Preview(args) => handle_preview(&site_root, args),
        Commands::Config => handle_config(&site_root),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "notepress=debug" } else { "notepress=info" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests driving `run` twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_site(site: Option<&Path>) -> Result<PathBuf> {
    let root = match site {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    if !root.is_dir() {
        bail!("site directory not found: {}", root.display());
    }
    Ok(root)
}

fn handle_publish(site_root: &Path, args: PublishArgs) -> Result<()> {
    let mut config = load_config(site_root);
    apply_source_overrides(&mut config, &args.source);
    if args.no_commit {
        config.commit = false;
    }
    if args.no_push {
        config.push = false;
    }

    let source = build_source(&args.source, &config)?;
    let mut ctx = initialize_with(site_root, config)?;

    let mut result = ctx.api.publish(source.as_ref());
    if ctx.config.commit {
        let git = GitPublisher::new(ctx.site_root.clone(), ctx.config.git_timeout())
            .with_push(ctx.config.push);
        ctx.api.commit(&git, &mut result, Local::now().naive_local());
    }

    print_result(&result);
    Ok(())
}

fn handle_preview(site_root: &Path, args: SourceArgs) -> Result<()> {
    let mut config = load_config(site_root);
    apply_source_overrides(&mut config, &args);
    let source = build_source(&args, &config)?;

    let result = api::preview(source.as_ref(), &config.post_options());
    print_previews(&result.previews);
    print_result(&result);
    Ok(())
}

fn handle_config(site_root: &Path) -> Result<()> {
    let config = load_config(site_root);
    let table = toml::Value::try_from(&config).map_err(|e| anyhow!(e.to_string()))?;
    if let toml::Value::Table(t) = table {
        for (k, v) in &t {
            println!("{} = {}", k, format_toml_value(v));
        }
    }
    Ok(())
}

fn apply_source_overrides(config: &mut NotepressConfig, args: &SourceArgs) {
    if let Some(days) = args.days {
        config.lookback_days = days;
    }
}

fn build_source(args: &SourceArgs, config: &NotepressConfig) -> Result<Box<dyn NoteSource>> {
    let source: Box<dyn NoteSource> = match args.from {
        SourceKind::AppleNotes => Box::new(AppleNotesSource::new(
            config.lookback_days,
            config.fetch_timeout(),
        )),
        SourceKind::Export => Box::new(ExportFileSource::new(required_input(args)?)),
        SourceKind::Json => Box::new(JsonSource::new(required_input(args)?)),
    };
    Ok(source)
}

fn required_input(args: &SourceArgs) -> Result<PathBuf> {
    args.input
        .clone()
        .ok_or_else(|| anyhow!("--input is required when reading from an export or JSON file"))
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("\"{}\"", s),
        toml::Value::Array(a) => toml::to_string(a).unwrap_or_else(|_| format!("{a:?}")),
        other => other.to_string(),
    }
}
