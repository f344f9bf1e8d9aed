//! Project context detection: framework identity from the workspace
//! manifest and path aliases from the TypeScript/JavaScript config. Both
//! detectors recover from every read or parse failure by falling back to
//! defaults, so classification always has a context to work with.

mod aliases;
mod framework;

pub use aliases::{default_aliases, detect_aliases};
pub use framework::detect_framework;

use crate::models::ProjectContext;
use std::path::{Path, PathBuf};

/// Build the project context for a workspace root. Recomputed per run; the
/// result does not depend on any cached state.
pub fn discover_context(workspace_root: &Path) -> ProjectContext {
    ProjectContext {
        framework: detect_framework(workspace_root),
        aliases: detect_aliases(workspace_root),
        workspace_root: workspace_root.to_path_buf(),
    }
}

/// Find the workspace root for a target file or directory: the nearest
/// ancestor holding a manifest or module config, falling back to the
/// target's own directory. `None` only when no containing directory exists.
pub fn resolve_workspace_root(target: &Path) -> Option<PathBuf> {
    const MARKERS: &[&str] = &["package.json", "tsconfig.json", "jsconfig.json"];

    let start = if target.is_file() {
        target.parent()?
    } else {
        target
    };

    for dir in start.ancestors() {
        if MARKERS.iter().any(|marker| dir.join(marker).is_file()) {
            return Some(dir.to_path_buf());
        }
    }

    Some(start.to_path_buf())
}
