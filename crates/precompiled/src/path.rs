//! Absolute path handling for the virtual filesystem.
//!
//! A path names a table: `/apps/demo` is stored as the table `/apps/demo`,
//! and listed as the row `demo` inside the table `/apps`. Only the root has
//! no parent.

use crate::error::PrecompiledError;
use crate::global::Config;

const SEPARATOR: char = '/';

/// A single path component: `[A-Za-z0-9_-]+`.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.len() <= Config::FS_PATH_MAX_LENGTH
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Splits an absolute path into its components, root first.
///
/// The root yields an empty list. A single trailing separator is tolerated;
/// empty components, `.`/`..`, over-long paths and paths deeper than
/// `Config::FS_PATH_MAX_LEVEL` are rejected.
pub fn path_segments(path: &str) -> Result<Vec<&str>, PrecompiledError> {
    let invalid = || PrecompiledError::InvalidPath(path.to_string());

    if path.len() > Config::FS_PATH_MAX_LENGTH {
        return Err(invalid());
    }
    let body = path.strip_prefix(SEPARATOR).ok_or_else(invalid)?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let body = body.strip_suffix(SEPARATOR).unwrap_or(body);

    let segments: Vec<&str> = body.split(SEPARATOR).collect();
    if segments.len() > Config::FS_PATH_MAX_LEVEL || !segments.iter().all(|s| is_valid_segment(s)) {
        return Err(invalid());
    }
    Ok(segments)
}

pub fn is_path_valid(path: &str) -> bool {
    path_segments(path).is_ok()
}

/// Canonical spelling of a valid path (no trailing separator).
pub fn normalize(path: &str) -> Result<String, PrecompiledError> {
    let segments = path_segments(path)?;
    Ok(format!("{}{}", SEPARATOR, segments.join("/")))
}

/// `/usr/local/bin` becomes `("/usr/local", "bin")`; `/usr` becomes
/// `("/", "usr")`. The root has no parent.
pub fn split_parent_and_base(path: &str) -> Result<(String, String), PrecompiledError> {
    let segments = path_segments(path)?;
    let (base, parents) = segments
        .split_last()
        .ok_or_else(|| PrecompiledError::InvalidPath(path.to_string()))?;
    Ok((format!("{}{}", SEPARATOR, parents.join("/")), base.to_string()))
}

pub fn join_path(parent: &str, name: &str) -> String {
    if parent == Config::FS_ROOT {
        format!("{}{}", SEPARATOR, name)
    } else {
        format!("{}{}{}", parent, SEPARATOR, name)
    }
}
