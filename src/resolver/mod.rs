//! Logical asset name → content-hashed public URL.
//!
//! # Lookup
//!
//! ```text
//! resolve("css", "main.css")
//!     │
//!     ├── manifest_path("css")  → public/css/rev-manifest.json
//!     │                           (or the path injected for "css")
//!     ├── RevManifest::load()   → {"main.css": "main.a1b2c3d4.css"}
//!     └── url_for_asset()       → /css/main.a1b2c3d4.css
//! ```
//!
//! The manifest is read on every call. It is immutable for the duration of a
//! build and only a handful of references exist per site, so there is nothing
//! to cache and no way for a stale entry to leak between calls.

mod error;

pub use error::ResolveError;

use crate::config::{SiteConfig, paths::PathResolver};
use crate::manifest::{MANIFEST_FILE, RevManifest};
use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
};

/// Resolves `(category, logical name)` pairs against per-category manifests.
///
/// The category → manifest path mapping is explicit: the conventional
/// `<output>/<prefix>/<category>/<manifest_name>` unless a path was injected
/// for that category with [`AssetResolver::with_manifest`].
#[derive(Debug, Clone)]
pub struct AssetResolver {
    output: PathBuf,
    prefix: PathBuf,
    manifest_name: String,
    overrides: HashMap<String, PathBuf>,
}

impl AssetResolver {
    /// Resolver over the conventional layout rooted at `output`.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            prefix: PathBuf::new(),
            manifest_name: MANIFEST_FILE.into(),
            overrides: HashMap::new(),
        }
    }

    /// Build a resolver from the site configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        let overrides = config
            .assets
            .iter()
            .filter_map(|(category, asset)| {
                asset
                    .manifest
                    .as_ref()
                    .map(|path| (category.clone(), path.clone()))
            })
            .collect();

        Self {
            output: config.build.output.clone(),
            prefix: config.build.path_prefix.clone(),
            manifest_name: config.build.manifest.clone(),
            overrides,
        }
    }

    /// Deploy under a URL/output subdirectory (e.g. `blog` → `/blog/css/...`).
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Use a different manifest file name in every category directory.
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    /// Read `category`'s manifest from an explicit path.
    pub fn with_manifest(mut self, category: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(category.into(), path.into());
        self
    }

    #[inline]
    fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(&self.output, &self.prefix)
    }

    /// Manifest file consulted for `category`.
    pub fn manifest_path(&self, category: &str) -> Result<PathBuf, ResolveError> {
        check_category(category)?;
        Ok(match self.overrides.get(category) {
            Some(path) => path.clone(),
            None => self.paths().manifest_path(category, &self.manifest_name),
        })
    }

    /// Directory the deployed files of `category` live in.
    pub fn category_dir(&self, category: &str) -> Result<PathBuf, ResolveError> {
        check_category(category)?;
        Ok(self.paths().category_dir(category))
    }

    /// Read the whole manifest for `category`.
    pub fn load(&self, category: &str) -> Result<RevManifest, ResolveError> {
        self.read_manifest(category, None)
    }

    /// Resolve a logical asset name to its public, content-hashed URL path.
    ///
    /// Fails if the manifest cannot be read or does not list `name`; never
    /// falls back to the un-hashed name.
    pub fn resolve(&self, category: &str, name: &str) -> Result<String, ResolveError> {
        let manifest = self.read_manifest(category, Some(name))?;
        let deployed = manifest
            .get(name)
            .ok_or_else(|| ResolveError::UnknownLogicalName {
                category: category.to_owned(),
                name: name.to_owned(),
            })?;

        Ok(self.paths().url_for_asset(category, deployed))
    }

    /// Every entry of `category`'s manifest as `(logical, public URL)`,
    /// sorted by logical name.
    pub fn resolve_all(&self, category: &str) -> Result<Vec<(String, String)>, ResolveError> {
        let manifest = self.load(category)?;
        let paths = self.paths();

        Ok(manifest
            .iter()
            .map(|(logical, deployed)| (logical.to_owned(), paths.url_for_asset(category, deployed)))
            .collect())
    }

    fn read_manifest(&self, category: &str, name: Option<&str>) -> Result<RevManifest, ResolveError> {
        let path = self.manifest_path(category)?;
        RevManifest::load(&path).map_err(|source| ResolveError::ManifestUnreadable {
            category: category.to_owned(),
            name: name.map(str::to_owned),
            source,
        })
    }
}

/// A category names exactly one directory under the output root.
fn check_category(category: &str) -> Result<(), ResolveError> {
    let mut components = Path::new(category).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ResolveError::InvalidCategory(category.to_owned())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    /// Write `json` as the manifest of `category` under a fresh output dir.
    fn site_with(manifests: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (category, json) in manifests {
            let category_dir = dir.path().join(category);
            fs::create_dir_all(&category_dir).unwrap();
            fs::write(category_dir.join(MANIFEST_FILE), json).unwrap();
        }
        dir
    }

    #[test]
    fn test_resolve_stylesheet() {
        let site = site_with(&[("css", r#"{"main.css": "main.a1b2c3.css"}"#)]);
        let resolver = AssetResolver::new(site.path());

        assert_eq!(
            resolver.resolve("css", "main.css").unwrap(),
            "/css/main.a1b2c3.css"
        );
    }

    #[test]
    fn test_resolve_script() {
        let site = site_with(&[("js", r#"{"main.js": "main.9f8e7d.js"}"#)]);
        let resolver = AssetResolver::new(site.path());

        assert_eq!(
            resolver.resolve("js", "main.js").unwrap(),
            "/js/main.9f8e7d.js"
        );
    }

    #[test]
    fn test_resolve_unknown_name() {
        let site = site_with(&[("css", r#"{"main.css": "main.a1b2c3.css"}"#)]);
        let resolver = AssetResolver::new(site.path());

        let err = resolver.resolve("css", "prism.css").unwrap_err();
        assert!(matches!(err, ResolveError::UnknownLogicalName { .. }));

        let message = err.to_string();
        assert!(message.contains("css"));
        assert!(message.contains("prism.css"));
    }

    #[test]
    fn test_resolve_missing_manifest() {
        let site = tempdir().unwrap();
        let resolver = AssetResolver::new(site.path());

        let err = resolver.resolve("css", "main.css").unwrap_err();
        match &err {
            ResolveError::ManifestUnreadable { category, name, .. } => {
                assert_eq!(category, "css");
                assert_eq!(name.as_deref(), Some("main.css"));
            }
            other => panic!("expected ManifestUnreadable, got {other:?}"),
        }
        assert!(err.to_string().contains("main.css"));
    }

    #[test]
    fn test_resolve_malformed_manifest() {
        let site = site_with(&[("css", r#"{"main.css": ["main.a1b2c3.css"]}"#)]);
        let resolver = AssetResolver::new(site.path());

        let err = resolver.resolve("css", "main.css").unwrap_err();
        assert!(matches!(err, ResolveError::ManifestUnreadable { .. }));
    }

    #[test]
    fn test_resolve_every_key() {
        let site = site_with(&[(
            "css",
            r#"{"main.css": "main.a1.css", "prism.css": "prism.b2.css", "vendor/reset.css": "vendor/reset.c3.css"}"#,
        )]);
        let resolver = AssetResolver::new(site.path());
        let manifest = resolver.load("css").unwrap();

        for (logical, deployed) in manifest.iter() {
            assert_eq!(
                resolver.resolve("css", logical).unwrap(),
                format!("/css/{deployed}")
            );
        }
    }

    #[test]
    fn test_resolve_leading_slash_and_backslash() {
        let site = site_with(&[("css", r#"{"a.css": "/a.1.css", "b.css": "b\\1.css"}"#)]);
        let resolver = AssetResolver::new(site.path());

        assert_eq!(resolver.resolve("css", "a.css").unwrap(), "/css//a.1.css");
        assert_eq!(resolver.resolve("css", "b.css").unwrap(), "/css/b\\1.css");
    }

    #[test]
    fn test_resolve_returns_manifest_value_verbatim() {
        let values = [
            "main.a1b2c3.css",
            "/a.1.css",
            "b\\1.css",
            "",
            "./x",
            "../up.css",
            "vendor/prism.ff.css",
            "ünïcode.ß.css",
            "with space.css",
        ];

        let mut manifest = RevManifest::new();
        for (i, value) in values.iter().enumerate() {
            manifest.insert(format!("asset{i}.css"), *value);
        }
        let site = tempdir().unwrap();
        manifest
            .write(&site.path().join("css").join(MANIFEST_FILE))
            .unwrap();

        let resolver = AssetResolver::new(site.path());
        for (i, value) in values.iter().enumerate() {
            assert_eq!(
                resolver.resolve("css", &format!("asset{i}.css")).unwrap(),
                format!("/css/{value}"),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn test_resolve_is_repeatable_and_rereads() {
        let site = site_with(&[("css", r#"{"main.css": "main.a1b2c3.css"}"#)]);
        let resolver = AssetResolver::new(site.path());

        let first = resolver.resolve("css", "main.css").unwrap();
        let second = resolver.resolve("css", "main.css").unwrap();
        assert_eq!(first, second);

        // A rebuilt manifest is picked up by the next lookup.
        fs::write(
            site.path().join("css").join(MANIFEST_FILE),
            r#"{"main.css": "main.d4e5f6.css"}"#,
        )
        .unwrap();
        assert_eq!(
            resolver.resolve("css", "main.css").unwrap(),
            "/css/main.d4e5f6.css"
        );
    }

    #[test]
    fn test_categories_are_independent() {
        let site = site_with(&[
            ("css", r#"{"main.css": "main.a1b2c3.css"}"#),
            ("js", r#"{"main.js": "main.9f8e7d.js"}"#),
        ]);
        let resolver = AssetResolver::new(site.path());

        assert!(resolver.resolve("js", "main.css").is_err());
        assert!(resolver.resolve("css", "main.js").is_err());
        assert_eq!(resolver.resolve("js", "main.js").unwrap(), "/js/main.9f8e7d.js");
    }

    #[test]
    fn test_resolve_with_prefix() {
        let site = tempdir().unwrap();
        let category_dir = site.path().join("blog").join("css");
        fs::create_dir_all(&category_dir).unwrap();
        fs::write(
            category_dir.join(MANIFEST_FILE),
            r#"{"main.css": "main.a1b2c3.css"}"#,
        )
        .unwrap();

        let resolver = AssetResolver::new(site.path()).with_prefix("blog");
        assert_eq!(
            resolver.resolve("css", "main.css").unwrap(),
            "/blog/css/main.a1b2c3.css"
        );
    }

    #[test]
    fn test_resolve_with_injected_manifest() {
        let fixtures = tempdir().unwrap();
        let fixture = fixtures.path().join("styles.json");
        fs::write(&fixture, r#"{"main.css": "main.0000.css"}"#).unwrap();

        let resolver = AssetResolver::new("/nonexistent/public").with_manifest("css", &fixture);

        assert_eq!(resolver.manifest_path("css").unwrap(), fixture);
        assert_eq!(resolver.resolve("css", "main.css").unwrap(), "/css/main.0000.css");
        // Other categories still use the conventional layout
        assert_eq!(
            resolver.manifest_path("js").unwrap(),
            PathBuf::from("/nonexistent/public/js").join(MANIFEST_FILE)
        );
    }

    #[test]
    fn test_custom_manifest_name() {
        let site = tempdir().unwrap();
        fs::create_dir_all(site.path().join("css")).unwrap();
        fs::write(
            site.path().join("css").join("manifest.json"),
            r#"{"main.css": "main.77.css"}"#,
        )
        .unwrap();

        let resolver = AssetResolver::new(site.path()).with_manifest_name("manifest.json");
        assert_eq!(resolver.resolve("css", "main.css").unwrap(), "/css/main.77.css");
    }

    #[test]
    fn test_invalid_category() {
        let resolver = AssetResolver::new("public");

        for category in ["", "..", "css/vendor", "/etc", "."] {
            let err = resolver.resolve(category, "main.css").unwrap_err();
            assert!(
                matches!(err, ResolveError::InvalidCategory(_)),
                "{category:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_all_sorted() {
        let site = site_with(&[(
            "js",
            r#"{"search.js": "search.22.js", "main.js": "main.11.js"}"#,
        )]);
        let resolver = AssetResolver::new(site.path());

        assert_eq!(
            resolver.resolve_all("js").unwrap(),
            vec![
                ("main.js".to_string(), "/js/main.11.js".to_string()),
                ("search.js".to_string(), "/js/search.22.js".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_does_not_touch_manifest() {
        let json = r#"{"main.css": "main.a1b2c3.css"}"#;
        let site = site_with(&[("css", json)]);
        let resolver = AssetResolver::new(site.path());

        let _ = resolver.resolve("css", "main.css");
        let _ = resolver.resolve("css", "missing.css");

        let after = fs::read_to_string(site.path().join("css").join(MANIFEST_FILE)).unwrap();
        assert_eq!(after, json);
    }
}
