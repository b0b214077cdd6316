//! `[assets.<category>]` sections.
//!
//! One table per asset category. A category is also the directory name under
//! the output root and the first segment of the public URL.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[assets.<category>]` section in siterev.toml.
///
/// # Example
/// ```toml
/// [assets.css]
/// source = "build/css"                 # Compiled, un-hashed stylesheets
/// refs = ["main.css", "prism.css"]     # Names templates refer to
///
/// [assets.js]
/// manifest = "build/js-manifest.json"  # Manifest outside the output tree
/// refs = ["main.js"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    /// Directory of compiled files to revision with `siterev rev`.
    pub source: Option<PathBuf>,

    /// Explicit manifest path, replacing `<output>/<category>/<manifest>`.
    pub manifest: Option<PathBuf>,

    /// Logical names the site's templates reference; verified by `siterev check`
    /// and resolved into the template context.
    pub refs: Vec<String>,
}
