//! Content-hash revisioning of a compiled asset directory.
//!
//! Produces the other side of the manifest contract: every file under the
//! source directory is copied to the category directory under a name that
//! embeds a hash of its contents, and the mapping is written as the
//! category's manifest.
//!
//! ```text
//! build/css/main.css          → public/css/main.1a2b3c4d.css
//! build/css/vendor/prism.css  → public/css/vendor/prism.5e6f7a8b.css
//!                               public/css/rev-manifest.json
//! ```
//!
//! Files named by the previous manifest that the new one no longer references
//! are deleted, so the category directory does not accumulate old revisions.

use crate::manifest::{ManifestError, RevManifest};
use rayon::prelude::*;
use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Number of hash bytes kept in a revised file name (8 hex chars).
const FINGERPRINT_BYTES: usize = 4;

#[derive(Debug, Error)]
pub enum RevisionError {
    #[error("source directory `{}` does not exist", .0.display())]
    MissingSource(PathBuf),

    #[error("destination `{}` lies inside source `{}`", .dest.display(), .source_dir.display())]
    DestinationInSource { dest: PathBuf, source_dir: PathBuf },

    #[error("non UTF-8 file name under `{}`", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("cannot walk source directory")]
    Walk(#[from] walkdir::Error),

    #[error("IO error on `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Outcome of one [`revise`] run.
#[derive(Debug)]
pub struct RevisionReport {
    /// The manifest that was written
    pub manifest: RevManifest,
    /// Where it was written
    pub manifest_path: PathBuf,
    /// Stale deployed files removed from the destination, relative to it
    pub removed: Vec<String>,
}

/// Short content hash used in revised names.
pub fn fingerprint(content: &[u8]) -> String {
    let hash = blake3::hash(content);
    hex::encode(&hash.as_bytes()[..FINGERPRINT_BYTES])
}

/// Insert `hash` before the extension of the file part of `rel_path`.
///
/// ```ignore
/// revised_name("main.css", "1a2b3c4d")          // "main.1a2b3c4d.css"
/// revised_name("vendor/prism.min.js", "ab")     // "vendor/prism.min.ab.js"
/// revised_name("LICENSE", "ab")                 // "LICENSE.ab"
/// revised_name(".well-known", "ab")             // ".well-known.ab"
/// ```
pub fn revised_name(rel_path: &str, hash: &str) -> String {
    let (dir, file) = match rel_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, rel_path),
    };

    let file = match file.rfind('.') {
        Some(dot) if dot > 0 => format!("{}.{hash}{}", &file[..dot], &file[dot..]),
        _ => format!("{file}.{hash}"),
    };

    match dir {
        Some(dir) => format!("{dir}/{file}"),
        None => file,
    }
}

/// Revision every file under `source` into `dest` and write
/// `dest/<manifest_name>`.
///
/// Hashing runs in parallel; copies, the manifest write and stale cleanup run
/// sequentially afterwards. The manifest is written only after every copy
/// succeeded, so a failed run never publishes a manifest pointing at missing
/// files.
pub fn revise(
    source: &Path,
    dest: &Path,
    manifest_name: &str,
) -> Result<RevisionReport, RevisionError> {
    if !source.is_dir() {
        return Err(RevisionError::MissingSource(source.to_path_buf()));
    }
    // A destination under the source would be walked, and revised again, on
    // the next run.
    let source_dir = absolute(source);
    let dest_dir = absolute(dest);
    if dest_dir.starts_with(&source_dir) {
        return Err(RevisionError::DestinationInSource {
            dest: dest_dir,
            source_dir,
        });
    }

    let files = collect_files(source, manifest_name)?;

    let revised: Vec<(String, String, PathBuf)> = files
        .into_par_iter()
        .map(|(path, rel)| {
            let content = fs::read(&path).map_err(|err| RevisionError::Io(path.clone(), err))?;
            let deployed = revised_name(&rel, &fingerprint(&content));
            Ok((rel, deployed, path))
        })
        .collect::<Result<_, RevisionError>>()?;

    for (_, deployed, path) in &revised {
        let target = dest.join(deployed);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| RevisionError::Io(parent.to_path_buf(), err))?;
        }
        fs::copy(path, &target).map_err(|err| RevisionError::Io(target.clone(), err))?;
    }

    let manifest_path = dest.join(manifest_name);
    // An unreadable previous manifest only means nothing can be cleaned up.
    let previous = RevManifest::load(&manifest_path).ok();

    let manifest: RevManifest = revised
        .into_iter()
        .map(|(rel, deployed, _)| (rel, deployed))
        .collect();
    manifest.write(&manifest_path)?;

    let removed = match previous {
        Some(previous) => remove_stale(dest, &previous, &manifest)?,
        None => Vec::new(),
    };

    Ok(RevisionReport {
        manifest,
        manifest_path,
        removed,
    })
}

/// Canonical form of `path`, resolving its deepest existing ancestor when
/// the path itself does not exist yet.
fn absolute(path: &Path) -> PathBuf {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    for ancestor in path.ancestors() {
        if let Ok(base) = ancestor.canonicalize() {
            let rest = path.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return base.join(rest);
        }
    }
    path
}

/// Files under `source` as `(absolute path, `/`-separated relative path)`,
/// sorted, skipping a manifest at the top level.
fn collect_files(source: &Path, manifest_name: &str) -> Result<Vec<(PathBuf, String)>, RevisionError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let rel = path
            .strip_prefix(source)
            .ok()
            .and_then(relative_key)
            .ok_or_else(|| RevisionError::NonUtf8Path(path.clone()))?;

        if rel == manifest_name {
            continue;
        }
        files.push((path, rel));
    }

    Ok(files)
}

/// Join the normal components of `rel` with `/`.
fn relative_key(rel: &Path) -> Option<String> {
    let parts = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

/// Delete files the previous manifest deployed that `current` no longer does.
fn remove_stale(
    dest: &Path,
    previous: &RevManifest,
    current: &RevManifest,
) -> Result<Vec<String>, RevisionError> {
    let live: HashSet<&str> = current.deployed().collect();
    let mut removed = Vec::new();

    for deployed in previous.deployed() {
        // Never follow a manifest entry outside the destination directory.
        if live.contains(deployed) || relative_key(Path::new(deployed)).is_none() {
            continue;
        }

        let path = dest.join(deployed);
        if path.is_file() {
            fs::remove_file(&path).map_err(|err| RevisionError::Io(path.clone(), err))?;
            removed.push(deployed.to_owned());
        }
    }

    Ok(removed)
}
