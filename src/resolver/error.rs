//! Asset resolution error types.

use crate::manifest::ManifestError;
use thiserror::Error;

/// Resolution failures. Every variant is fatal for the build.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve `{}` in category `{category}`: manifest unreadable", .name.as_deref().unwrap_or("*"))]
    ManifestUnreadable {
        category: String,
        /// Logical name being resolved, `None` when loading the whole manifest
        name: Option<String>,
        #[source]
        source: ManifestError,
    },

    #[error("unknown asset `{name}` in category `{category}`: not listed in its manifest")]
    UnknownLogicalName { category: String, name: String },

    #[error("invalid asset category `{0}`: must be a single directory name")]
    InvalidCategory(String),
}
