//! siterev - content-hashed asset resolution for static sites.
//!
//! Templates refer to assets by a stable logical name (`main.css`); the build
//! pipeline writes content-hashed copies (`main.a1b2c3d4.css`) plus a
//! `rev-manifest.json` per category. [`AssetResolver`] joins the two:
//!
//! ```text
//! public/
//! ├── css/
//! │   ├── main.a1b2c3d4.css
//! │   └── rev-manifest.json    {"main.css": "main.a1b2c3d4.css"}
//! └── js/
//!     ├── main.9f8e7d6c.js
//!     └── rev-manifest.json    {"main.js": "main.9f8e7d6c.js"}
//!
//! resolve("css", "main.css") → "/css/main.a1b2c3d4.css"
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let resolver = AssetResolver::new("public");
//! let href = resolver.resolve("css", "main.css")?;
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod context;
pub mod logger;
pub mod manifest;
pub mod resolver;
pub mod revision;

pub use config::SiteConfig;
pub use manifest::{ManifestError, RevManifest};
pub use resolver::{AssetResolver, ResolveError};
