//! Site-wide asset verification.
//!
//! Walks every configured category and reports, all at once, each reference
//! that does not resolve and each manifest entry whose deployed file is
//! missing from the output tree. A non-empty report fails the build.

use crate::config::SiteConfig;
use crate::resolver::{AssetResolver, ResolveError};
use std::path::PathBuf;
use thiserror::Error;

/// One problem found by [`check_site`].
#[derive(Debug, Error)]
pub enum CheckProblem {
    #[error(transparent)]
    Unresolved(#[from] ResolveError),

    #[error("`{logical}` in category `{category}` maps to missing file `{}`", .path.display())]
    MissingFile {
        category: String,
        logical: String,
        path: PathBuf,
    },
}

/// Result of a verification pass.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// References resolved successfully
    pub resolved: usize,
    /// Manifest entries whose deployed file was found
    pub files: usize,
    pub problems: Vec<CheckProblem>,
}

impl CheckReport {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    /// One problem per line, for error output.
    pub fn summary(&self) -> String {
        self.problems
            .iter()
            .map(|problem| format!("  - {problem}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Verify every `[assets.<category>]` against its manifest and the output tree.
pub fn check_site(config: &SiteConfig, resolver: &AssetResolver) -> CheckReport {
    let mut report = CheckReport::default();

    for (category, asset) in &config.assets {
        for name in &asset.refs {
            match resolver.resolve(category, name) {
                Ok(_) => report.resolved += 1,
                Err(err) => report.problems.push(err.into()),
            }
        }

        let manifest = match resolver.load(category) {
            Ok(manifest) => manifest,
            Err(err) => {
                // Already reported once per ref above.
                if asset.refs.is_empty() {
                    report.problems.push(err.into());
                }
                continue;
            }
        };
        let Ok(dir) = resolver.category_dir(category) else {
            continue;
        };

        for (logical, deployed) in manifest.iter() {
            let path = dir.join(deployed);
            if path.is_file() {
                report.files += 1;
            } else {
                report.problems.push(CheckProblem::MissingFile {
                    category: category.clone(),
                    logical: logical.to_owned(),
                    path,
                });
            }
        }
    }

    report
}
