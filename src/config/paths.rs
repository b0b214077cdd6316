//! Centralized path resolution for asset categories and their public URLs.
//!
//! This module is the single place where `path_prefix` is applied, both to
//! on-disk locations and to URLs.
//!
//! # Architecture
//!
//! ```text
//! PathResolver
//!     │
//!     ├── output_dir()                → /abs/path/public/prefix
//!     ├── category_dir("css")         → /abs/path/public/prefix/css
//!     ├── manifest_path("css", name)  → /abs/path/public/prefix/css/rev-manifest.json
//!     └── url_for_asset("css", file)  → /prefix/css/file  (file copied verbatim)
//! ```

use std::path::{Component, Path, PathBuf};

/// Path resolver for one output root and prefix.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    /// Output root directory (without path_prefix)
    output: &'a Path,
    /// Path prefix for subdirectory deployment
    prefix: &'a Path,
}

impl<'a> PathResolver<'a> {
    #[inline]
    pub const fn new(output: &'a Path, prefix: &'a Path) -> Self {
        Self { output, prefix }
    }

    /// Output directory with path_prefix applied.
    #[inline]
    pub fn output_dir(&self) -> PathBuf {
        self.output.join(self.prefix)
    }

    /// Directory holding a category's deployed files.
    #[inline]
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.output_dir().join(category)
    }

    /// Conventional manifest location for a category.
    #[inline]
    pub fn manifest_path(&self, category: &str, manifest_name: &str) -> PathBuf {
        self.category_dir(category).join(manifest_name)
    }

    /// Public URL path of a deployed file in a category.
    ///
    /// `deployed` is a manifest value and is copied verbatim; it is never
    /// interpreted as a filesystem path.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Without prefix:
    /// paths.url_for_asset("css", "main.a1b2.css") → "/css/main.a1b2.css"
    ///
    /// // With prefix "blog":
    /// paths.url_for_asset("css", "main.a1b2.css") → "/blog/css/main.a1b2.css"
    /// ```
    pub fn url_for_asset(&self, category: &str, deployed: &str) -> String {
        let prefix = self.url_prefix();
        if prefix.is_empty() {
            format!("/{category}/{deployed}")
        } else {
            format!("/{prefix}/{category}/{deployed}")
        }
    }

    /// Prefix as `/`-joined URL segments (`sites/blog`).
    fn url_prefix(&self) -> String {
        self.prefix
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_with_prefix() {
        let paths = PathResolver::new(Path::new("/public"), Path::new("blog"));
        assert_eq!(paths.output_dir(), PathBuf::from("/public/blog"));
    }

    #[test]
    fn test_output_dir_without_prefix() {
        let paths = PathResolver::new(Path::new("/public"), Path::new(""));
        assert_eq!(paths.output_dir(), PathBuf::from("/public"));
    }

    #[test]
    fn test_url_prefix_segments() {
        let paths = PathResolver::new(Path::new("/public"), Path::new("sites/blog/"));
        assert_eq!(paths.url_prefix(), "sites/blog");

        let paths = PathResolver::new(Path::new("/public"), Path::new("./"));
        assert_eq!(paths.url_prefix(), "");
        assert_eq!(paths.url_for_asset("css", "main.1.css"), "/css/main.1.css");
    }

    #[test]
    fn test_manifest_path() {
        let paths = PathResolver::new(Path::new("/public"), Path::new(""));
        assert_eq!(
            paths.manifest_path("css", "rev-manifest.json"),
            PathBuf::from("/public/css/rev-manifest.json")
        );

        let paths = PathResolver::new(Path::new("/public"), Path::new("blog"));
        assert_eq!(
            paths.manifest_path("js", "rev-manifest.json"),
            PathBuf::from("/public/blog/js/rev-manifest.json")
        );
    }

    #[test]
    fn test_url_for_asset_without_prefix() {
        let paths = PathResolver::new(Path::new("/public"), Path::new(""));
        assert_eq!(paths.url_for_asset("css", "main.a1b2c3.css"), "/css/main.a1b2c3.css");
    }

    #[test]
    fn test_url_for_asset_with_prefix() {
        let paths = PathResolver::new(Path::new("/public"), Path::new("blog"));
        assert_eq!(
            paths.url_for_asset("js", "main.9f8e7d.js"),
            "/blog/js/main.9f8e7d.js"
        );
    }

    #[test]
    fn test_url_for_asset_nested_file() {
        let paths = PathResolver::new(Path::new("/public"), Path::new(""));
        assert_eq!(
            paths.url_for_asset("css", "vendor/prism.0f1e.css"),
            "/css/vendor/prism.0f1e.css"
        );
    }

    #[test]
    fn test_url_for_asset_nested_prefix() {
        let paths = PathResolver::new(Path::new("/public"), Path::new("sites/blog"));
        assert_eq!(
            paths.url_for_asset("img", "logo.3c.png"),
            "/sites/blog/img/logo.3c.png"
        );
    }

    #[test]
    fn test_url_for_asset_keeps_value_verbatim() {
        let paths = PathResolver::new(Path::new("/public"), Path::new(""));
        assert_eq!(paths.url_for_asset("css", "/a.1.css"), "/css//a.1.css");
        assert_eq!(paths.url_for_asset("css", "b\\1.css"), "/css/b\\1.css");

        let paths = PathResolver::new(Path::new("/public"), Path::new("blog"));
        assert_eq!(paths.url_for_asset("css", "/a.1.css"), "/blog/css//a.1.css");
    }
}
