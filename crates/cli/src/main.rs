//! Command-line entry point for skelly.
//!
//! Scaffolds directories and files from a YAML manifest. The manifest (and
//! the tree it describes) is resolved one directory above the working
//! directory: skelly is meant to run from a tooling subdirectory of the
//! project it scaffolds.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use skelly_lib::apply::{ApplyOptions, apply};
use skelly_lib::manifest::Manifest;

mod output;

/// Scaffold directories and files from a YAML manifest
#[derive(Parser)]
#[command(name = "skelly")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Manifest file name, resolved one directory above the working directory
  #[arg(short, long, default_value = "structure.yml")]
  manifest: PathBuf,

  /// Log actions without touching the filesystem
  #[arg(long)]
  dry_run: bool,

  /// Overwrite existing files with manifest content
  #[arg(long)]
  force: bool,
}

fn main() -> Result<()> {
  // Diagnostics go to stderr; stdout carries only the action log
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  let cwd = env::current_dir().context("Failed to resolve working directory")?;
  let anchor = cwd.parent().unwrap_or(&cwd).to_path_buf();

  let manifest_path = anchor.join(&cli.manifest);
  if !manifest_path.exists() {
    output::print_error(&format!("Manifest not found: {}", manifest_path.display()));
    std::process::exit(1);
  }

  let manifest = Manifest::load(&manifest_path)
    .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;

  let base_dir = manifest.base_dir(&anchor);
  debug!(
    manifest = %manifest_path.display(),
    base_dir = %base_dir.display(),
    "resolved paths"
  );

  let options = ApplyOptions {
    force: cli.force,
    dry_run: cli.dry_run,
  };
  let actions = apply(&manifest, &base_dir, &options).context("Apply failed")?;

  for action in &actions {
    output::print_action(action);
  }

  Ok(())
}
