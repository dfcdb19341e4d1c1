//! User input to URI conversion
//!
//! Blacklist entries are matched against URIs exactly as the recent record
//! stores them, so local paths typed on the command line must become
//! `file://` URLs first. Anything that does not look like a local path is
//! taken verbatim.

use std::env;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use tracing::warn;
use url::Url;

/// Convert a path or URL typed by the user into the URI to blacklist
///
/// Input is treated as a local path when it is absolute, exists, or its
/// parent directory exists (for partial names such as
/// `/media/photos/trip-` meant to match only some children).
pub fn any_to_url(input: &str) -> String {
    let path = Path::new(input);

    let is_abs = input.starts_with(MAIN_SEPARATOR) || (cfg!(windows) && input.starts_with('/'));
    let exists = path.exists();
    let parent_exists = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .is_some_and(Path::exists);

    if !(is_abs || exists || parent_exists) {
        return input.to_string();
    }

    match absolutize(path) {
        Ok(absolute) => path_to_file_url(&absolute).unwrap_or_else(|| input.to_string()),
        Err(e) => {
            warn!("Could not resolve the current directory: {}", e);
            input.to_string()
        }
    }
}

/// `file://` URL for an absolute path, percent-encoded
pub fn path_to_file_url(path: &Path) -> Option<String> {
    Url::from_file_path(path).ok().map(String::from)
}

/// Absolute, lexically normalized form of `path`
///
/// `.` and `..` are folded without touching the filesystem and trailing
/// separators are dropped.
fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    Ok(normalized)
}
