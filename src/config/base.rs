//! `[base]` section configuration.
//!
//! Site-wide settings the templates need alongside resolved assets: title,
//! canonical URL, analytics and contact links. Values can be overridden once
//! at startup from `SITEREV_*` environment variables.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "SITEREV_";

/// `[base]` section in siterev.toml - site metadata for templates.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Site"
/// url = "https://example.com"
/// analytics_id = "G-XXXXXXX"
///
/// [base.contact]
/// email = "mailto:me@example.com"
/// github = "https://github.com/me"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title.
    pub title: String,

    /// Canonical base URL.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// Analytics property ID; templates omit the snippet when unset.
    #[serde(default = "defaults::site::analytics_id")]
    #[educe(Default = defaults::site::analytics_id())]
    pub analytics_id: Option<String>,

    /// Contact links keyed by name (`email`, `github`, ...).
    pub contact: BTreeMap<String, String>,
}

impl BaseConfig {
    /// Apply `SITEREV_*` overrides from `vars`.
    ///
    /// | Variable                  | Field              |
    /// |---------------------------|--------------------|
    /// | `SITEREV_TITLE`           | `title`            |
    /// | `SITEREV_URL`             | `url`              |
    /// | `SITEREV_ANALYTICS_ID`    | `analytics_id`     |
    /// | `SITEREV_CONTACT_<NAME>`  | `contact.<name>`   |
    ///
    /// Empty values are ignored. Returns the number of overrides applied.
    pub fn update_with_env<I>(&mut self, vars: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut applied = 0;

        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            match name {
                "TITLE" => self.title = value,
                "URL" => self.url = Some(value),
                "ANALYTICS_ID" => self.analytics_id = Some(value),
                _ => match name.strip_prefix("CONTACT_") {
                    Some(contact) if !contact.is_empty() => {
                        self.contact.insert(contact.to_ascii_lowercase(), value);
                    }
                    _ => continue,
                },
            }
            applied += 1;
        }

        applied
    }
}
