use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;

/// A request target mapped onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Path relative to the document root, as derived from the target.
    /// Used for the content-type lookup.
    pub relative: String,
    /// `relative` joined onto the document root.
    pub full: PathBuf,
}

/// Maps a request target to a file under the document root.
///
/// `/` becomes the index document; any other target has one leading `/`
/// stripped. Query strings and fragments are left in place. Returns `None`
/// when there is nothing to open, or when containment is on and the target
/// climbs out of the root.
pub fn resolve_target(target: &str, cfg: &StaticFilesConfig) -> Option<ResolvedPath> {
    let relative = if target == "/" {
        cfg.index.clone()
    } else {
        target.strip_prefix('/').unwrap_or(target).to_string()
    };

    if relative.is_empty() {
        return None;
    }

    if cfg.confine_to_root && escapes_root(&relative) {
        return None;
    }

    Some(ResolvedPath {
        full: cfg.root.join(&relative),
        relative,
    })
}

// Absolute paths replace the root on join, `..` walks above it.
fn escapes_root(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}
