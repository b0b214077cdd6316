//! Revision manifest (`rev-manifest.json`).
//!
//! A flat JSON object mapping logical asset names to deployed, content-hashed
//! file names:
//!
//! ```json
//! {
//!   "main.css": "main.a1b2c3d4.css",
//!   "prism.css": "prism.0f1e2d3c.css"
//! }
//! ```
//!
//! The set of keys is open-ended; bundles come and go between builds.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Default manifest file name inside each category directory.
pub const MANIFEST_FILE: &str = "rev-manifest.json";

/// Errors raised while reading or writing a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("manifest `{}` is not a flat JSON object of strings", .0.display())]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("cannot write manifest `{}`", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
}

/// Logical name → deployed name, ordered by logical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevManifest {
    entries: BTreeMap<String, String>,
}

impl RevManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from JSON text.
    ///
    /// Anything other than an object whose values are all strings is rejected.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|err| ManifestError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content).map_err(|err| ManifestError::Parse(path.to_path_buf(), err))
    }

    /// Write the manifest as pretty-printed JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let write_err = |err| ManifestError::Write(path.to_path_buf(), err);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_json_pretty()).map_err(write_err)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> String {
        // A string map always serializes.
        let mut json = serde_json::to_string_pretty(&self.entries).unwrap_or_default();
        json.push('\n');
        json
    }

    #[inline]
    pub fn get(&self, logical: &str) -> Option<&str> {
        self.entries.get(logical).map(String::as_str)
    }

    #[inline]
    pub fn contains(&self, logical: &str) -> bool {
        self.entries.contains_key(logical)
    }

    pub fn insert(&mut self, logical: impl Into<String>, deployed: impl Into<String>) {
        self.entries.insert(logical.into(), deployed.into());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(logical, deployed)` pairs sorted by logical name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Deployed names, in logical-name order.
    pub fn deployed(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for RevManifest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
