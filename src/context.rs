//! Template context file.
//!
//! External templates read one JSON document instead of shelling out per
//! asset:
//!
//! ```json
//! {
//!   "site": { "title": "...", "url": "...", "analytics_id": "...", "contact": {} },
//!   "assets": {
//!     "css": { "main.css": "/css/main.a1b2c3d4.css" },
//!     "js":  { "main.js": "/js/main.9f8e7d6c.js" }
//!   }
//! }
//! ```
//!
//! Categories with `refs` expose exactly those names; categories without
//! expose their whole manifest. Any resolution failure aborts: a context
//! with a hole in it would publish a page with a broken asset link.

use crate::config::{BaseConfig, SiteConfig};
use crate::resolver::{AssetResolver, ResolveError};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::PathBuf};

/// Category → logical name → public URL.
pub type AssetUrls = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Serialize)]
pub struct TemplateContext<'a> {
    pub site: &'a BaseConfig,
    pub assets: AssetUrls,
}

/// Resolve every configured asset into a context for `config`.
pub fn build_context<'a>(
    config: &'a SiteConfig,
    resolver: &AssetResolver,
) -> Result<TemplateContext<'a>, ResolveError> {
    let mut assets = AssetUrls::new();

    for (category, asset) in &config.assets {
        let urls: BTreeMap<String, String> = if asset.refs.is_empty() {
            resolver.resolve_all(category)?.into_iter().collect()
        } else {
            asset
                .refs
                .iter()
                .map(|name| Ok((name.clone(), resolver.resolve(category, name)?)))
                .collect::<Result<_, ResolveError>>()?
        };
        assets.insert(category.clone(), urls);
    }

    Ok(TemplateContext {
        site: &config.base,
        assets,
    })
}

/// Pretty JSON for the resolved context.
pub fn render_context(config: &SiteConfig, resolver: &AssetResolver) -> Result<String> {
    let context = build_context(config, resolver)?;
    let mut json = serde_json::to_string_pretty(&context)?;
    json.push('\n');
    Ok(json)
}

/// Write the context to [`SiteConfig::context_path`] and return that path.
pub fn write_context(config: &SiteConfig, resolver: &AssetResolver) -> Result<PathBuf> {
    let json = render_context(config, resolver)?;
    let path = config.context_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }
    fs::write(&path, json)
        .with_context(|| format!("Failed to write template context: {}", path.display()))?;

    Ok(path)
}
