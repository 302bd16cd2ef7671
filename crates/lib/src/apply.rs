//! Idempotent filesystem materialization.
//!
//! Walks manifest entries in order, expands each path pattern, and creates
//! the resulting directories and files under a base directory. Existing paths
//! are skipped rather than treated as errors, so repeated runs are safe
//! no-ops. Every action taken or skipped is recorded as an [`Action`] and the
//! ordered log is returned to the caller for rendering.

use std::fmt;
use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::expand::expand;
use crate::manifest::{Entry, Manifest};

/// Errors that abort materialization.
#[derive(Debug, Error)]
pub enum ApplyError {
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },
}

/// Errors from parsing or applying a permission mode.
///
/// These never abort a run; the orchestrator records them as
/// [`Action::ChmodFailed`] and continues.
#[derive(Debug, Error)]
pub enum ModeError {
  #[error("invalid octal mode {mode:?}: {source}")]
  Parse { mode: String, source: ParseIntError },

  #[error(transparent)]
  Chmod(#[from] std::io::Error),
}

/// One line of the run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// A directory was created (or would be, under dry-run).
  DirCreated(PathBuf),
  /// The directory already existed; nothing was done.
  DirExists(PathBuf),
  /// A file was written (or would be, under dry-run).
  FileCreated(PathBuf),
  /// The file already existed and force was off; nothing was done.
  FileExists(PathBuf),
  /// A permission mode could not be parsed or applied.
  ChmodFailed { path: PathBuf, detail: String },
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Action::DirCreated(path) => write!(f, "+ created 📁 {}", path.display()),
      Action::DirExists(path) => write!(f, "= exists  📁 {}", path.display()),
      Action::FileCreated(path) => write!(f, "+ created 📄 {}", path.display()),
      Action::FileExists(path) => write!(f, "= exists  📄 {}", path.display()),
      Action::ChmodFailed { path, detail } => {
        write!(f, "! chmod failed for {}: {detail}", path.display())
      }
    }
  }
}

/// Options for [`apply`].
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
  /// Overwrite existing files instead of skipping them.
  pub force: bool,
  /// Log actions without touching the filesystem.
  pub dry_run: bool,
}

/// Ensure a directory exists, creating missing ancestors as needed.
///
/// An existing path of any type is reported as skipped, never an error.
/// Under dry-run the returned action previews what would happen.
pub fn ensure_dir(path: &Path, options: &ApplyOptions) -> Result<Action, ApplyError> {
  if path.exists() {
    return Ok(Action::DirExists(path.to_path_buf()));
  }

  if !options.dry_run {
    fs::create_dir_all(path).map_err(|e| ApplyError::CreateDir {
      path: path.to_path_buf(),
      source: e,
    })?;
  }

  Ok(Action::DirCreated(path.to_path_buf()))
}

/// Write a file, creating missing ancestor directories as needed.
///
/// An existing file is skipped unless `force` is set; a forced write replaces
/// the whole contents. Under dry-run the returned action previews what would
/// happen.
pub fn write_file(path: &Path, content: &str, options: &ApplyOptions) -> Result<Action, ApplyError> {
  if path.exists() && !options.force {
    return Ok(Action::FileExists(path.to_path_buf()));
  }

  if !options.dry_run {
    if let Some(parent) = path.parent() {
      if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| ApplyError::CreateDir {
          path: parent.to_path_buf(),
          source: e,
        })?;
      }
    }

    fs::write(path, content).map_err(|e| ApplyError::WriteFile {
      path: path.to_path_buf(),
      source: e,
    })?;
  }

  Ok(Action::FileCreated(path.to_path_buf()))
}

/// Parse an octal mode string like `"644"` into permission bits.
pub fn parse_mode(mode: &str) -> Result<u32, ModeError> {
  u32::from_str_radix(mode, 8).map_err(|e| ModeError::Parse {
    mode: mode.to_string(),
    source: e,
  })
}

/// Apply a permission mode string to a path.
pub fn apply_mode(path: &Path, mode: &str) -> Result<(), ModeError> {
  let bits = parse_mode(mode)?;
  set_permissions(path, bits)?;
  Ok(())
}

#[cfg(unix)]
fn set_permissions(path: &Path, mode: u32) -> Result<(), std::io::Error> {
  use std::os::unix::fs::PermissionsExt;
  let permissions = fs::Permissions::from_mode(mode);
  fs::set_permissions(path, permissions)
}

#[cfg(windows)]
fn set_permissions(_path: &Path, _mode: u32) -> Result<(), std::io::Error> {
  // Windows doesn't use Unix permission bits
  Ok(())
}

/// Materialize every entry of `manifest` under `base_dir`.
///
/// Returns the ordered action log: entries in manifest order, each pattern's
/// expansions in sorted order. A file entry's content and mode are shared by
/// every path its pattern expands to. The mode is applied even when the file
/// write was skipped, and a chmod failure is recorded in the log rather than
/// aborting the run.
pub fn apply(
  manifest: &Manifest,
  base_dir: &Path,
  options: &ApplyOptions,
) -> Result<Vec<Action>, ApplyError> {
  info!(
    base_dir = %base_dir.display(),
    entries = manifest.entries.len(),
    dry_run = options.dry_run,
    force = options.force,
    "starting materialization"
  );

  let mut actions = Vec::new();

  for entry in &manifest.entries {
    match entry {
      Entry::Dir { dir } => {
        for expanded in expand(dir) {
          let path = base_dir.join(expanded);
          debug!(path = %path.display(), "ensuring directory");
          actions.push(ensure_dir(&path, options)?);
        }
      }
      Entry::File { file, content, mode } => {
        let content = content.as_deref().unwrap_or("");
        for expanded in expand(file) {
          let path = base_dir.join(expanded);
          debug!(path = %path.display(), "writing file");
          actions.push(write_file(&path, content, options)?);

          if let Some(mode) = mode {
            // An empty mode string is treated as absent
            if !mode.is_empty() && !options.dry_run {
              if let Err(e) = apply_mode(&path, mode) {
                warn!(path = %path.display(), error = %e, "failed to apply mode");
                actions.push(Action::ChmodFailed {
                  path,
                  detail: e.to_string(),
                });
              }
            }
          }
        }
      }
    }
  }

  info!(actions = actions.len(), "materialization complete");
  Ok(actions)
}
