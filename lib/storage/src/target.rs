//! Target path resolution
//!
//! A caller names a dataset by path. When filename stamping is on, a new
//! dataset is created as `<stem>_<YYYYMMDDTHHMMSSZ><ext>` next to the
//! requested path, and later calls with the same requested path continue the
//! newest such file.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rowgate_core::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

static STAMP_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(_\d{8}T\d{6}Z)+$").unwrap());

/// Compact UTC timestamp safe for file names (no ':'), e.g. `20260107T121314Z`
pub fn filename_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Where a call will read from and write to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    /// A non-empty dataset file is already present at `path`
    pub exists: bool,
}

pub fn resolve_target(
    requested: &Path,
    stamp_on_create: bool,
    now: DateTime<Utc>,
) -> Result<ResolvedTarget> {
    if is_non_empty_file(requested)? {
        return Ok(ResolvedTarget {
            path: requested.to_path_buf(),
            exists: true,
        });
    }

    if !stamp_on_create {
        return Ok(ResolvedTarget {
            path: requested.to_path_buf(),
            exists: false,
        });
    }

    if let Some(latest) = latest_stamped_sibling(requested)? {
        return Ok(ResolvedTarget {
            path: latest,
            exists: true,
        });
    }

    Ok(ResolvedTarget {
        path: stamped_path(requested, now)?,
        exists: false,
    })
}

/// `data.csv` -> `data_20260107T121314Z.csv`; a missing extension becomes `.csv`
pub fn stamped_path(requested: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    let (stem, ext) = stem_and_extension(requested)?;
    Ok(requested.with_file_name(format!("{}_{}{}", stem, filename_timestamp(now), ext)))
}

fn stem_and_extension(path: &Path) -> Result<(&str, String)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidConfig(format!("target {:?} has no usable file name", path)))?;
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(".{}", ext),
        None => ".csv".to_string(),
    };
    Ok((stem, ext))
}

fn latest_stamped_sibling(requested: &Path) -> Result<Option<PathBuf>> {
    let (stem, ext) = stem_and_extension(requested)?;
    let pattern = Regex::new(&format!(
        r"^{}_\d{{8}}T\d{{6}}Z{}$",
        regex::escape(stem),
        regex::escape(&ext)
    ))
    .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    let dir = match requested.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    // Stamps sort lexicographically in time order.
    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !pattern.is_match(&name) || !is_non_empty_file(&entry.path())? {
            continue;
        }
        if latest.as_ref().map_or(true, |best| name > *best) {
            latest = Some(name);
        }
    }

    Ok(latest.map(|name| requested.with_file_name(name)))
}

fn is_non_empty_file(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// The path every member of a stamped dataset family maps to
///
/// `data.csv`, `data` and `data_20260107T121314Z.csv` all resolve to the same
/// files, so they share one family: `<dir>/<stem without stamp><ext>`, with a
/// missing extension read as `.csv`.
pub fn dataset_family(path: &Path) -> PathBuf {
    let normalized = normalize_lexically(path);
    let Some((stem, ext)) = stem_and_extension(&normalized)
        .ok()
        .map(|(stem, ext)| (STAMP_SUFFIX_RE.replace(stem, "").into_owned(), ext))
    else {
        return normalized;
    };
    if stem.is_empty() {
        return normalized;
    }
    normalized.with_file_name(format!("{}{}", stem, ext))
}

/// Resolve `.` and `..` without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Keep `path` inside `root`
///
/// Relative paths are taken relative to `root`. Symlinks below the root are
/// not followed.
pub fn confine(path: &Path, root: &Path) -> Result<PathBuf> {
    let root = root
        .canonicalize()
        .map_err(|e| Error::InvalidConfig(format!("allowed root {:?}: {}", root, e)))?;
    let candidate = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let normalized = normalize_lexically(&candidate);
    if normalized.starts_with(&root) && normalized != root {
        Ok(normalized)
    } else {
        Err(Error::PathOutsideRoot {
            path: path.to_path_buf(),
            root,
        })
    }
}
