//! Manifest loading and validation.
//!
//! The manifest is a YAML document naming the directories and files to
//! materialize. Parsing happens in two phases: the document is read into a
//! generic value so top-level shape problems get precise errors, then each
//! entry is deserialized into the [`Entry`] sum type. All validation happens
//! here, at load time, so a malformed entry can never abort a run halfway
//! through the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// The `project_root` sentinel meaning "directly under the base directory".
pub const DEFAULT_PROJECT_ROOT: &str = ".";

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid YAML: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("manifest must be a mapping with an `entries` list")]
  NotAMapping,

  #[error("manifest is missing the `entries` list")]
  MissingEntries,

  #[error("`entries` must be a list")]
  EntriesNotAList,

  #[error("`project_root` must be a string")]
  ProjectRootNotAString,

  #[error("entry {index} must be a mapping with a `dir` or `file` key")]
  MalformedEntry { index: usize },
}

/// One manifest entry: a directory pattern or a file pattern.
///
/// Deserialization is driven by key presence. An entry carrying both `dir`
/// and `file` keys resolves to the directory variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
  /// A directory pattern, e.g. `data/{raw,processed}`.
  Dir { dir: String },

  /// A file pattern with optional literal content and permission mode.
  File {
    file: String,
    content: Option<String>,
    mode: Option<String>,
  },
}

/// A loaded and validated manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
  /// Directory all entry paths resolve under, relative to the anchor.
  pub project_root: String,
  /// Entries in document order.
  pub entries: Vec<Entry>,
}

impl Manifest {
  /// Load and validate a manifest from a file.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let text = fs::read_to_string(path).map_err(|e| ManifestError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let manifest = Self::parse(&text)?;
    debug!(path = %path.display(), entries = manifest.entries.len(), "manifest loaded");
    Ok(manifest)
  }

  /// Parse and validate a manifest from YAML text.
  pub fn parse(text: &str) -> Result<Self, ManifestError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    if !doc.is_mapping() {
      return Err(ManifestError::NotAMapping);
    }

    let project_root = match doc.get("project_root") {
      None => DEFAULT_PROJECT_ROOT.to_string(),
      Some(value) => value
        .as_str()
        .ok_or(ManifestError::ProjectRootNotAString)?
        .to_string(),
    };

    let entries = doc.get("entries").ok_or(ManifestError::MissingEntries)?;
    let entries = entries.as_sequence().ok_or(ManifestError::EntriesNotAList)?;

    let entries = entries
      .iter()
      .enumerate()
      .map(|(index, value)| {
        serde_yaml::from_value(value.clone()).map_err(|_| ManifestError::MalformedEntry { index })
      })
      .collect::<Result<Vec<Entry>, _>>()?;

    Ok(Self { project_root, entries })
  }

  /// Resolve the base directory all entries materialize under.
  ///
  /// The default `project_root` keeps the anchor itself; anything else is
  /// joined onto it.
  pub fn base_dir(&self, anchor: &Path) -> PathBuf {
    if self.project_root == DEFAULT_PROJECT_ROOT {
      anchor.to_path_buf()
    } else {
      anchor.join(&self.project_root)
    }
  }
}
