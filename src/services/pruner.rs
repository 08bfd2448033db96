//! Removing plugin folders left behind by packages that were disabled.
//!
//! Exclusions stop the BepInEx mirror from copying a disabled plugin, but they
//! also stop it from deleting a copy that is already in the game directory.
//! This step removes those copies after a non-fatal sync.

use crate::models::{BEPINEX_DIR, PLUGINS_DIR, PruneFailure};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

/// Directories removed and directories that could not be removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: Vec<Utf8PathBuf>,
    pub failed: Vec<PruneFailure>,
}

/// `<dest_root>/BepInEx/plugins`
pub fn plugins_dir(dest_root: &Utf8Path) -> Utf8PathBuf {
    dest_root.join(BEPINEX_DIR).join(PLUGINS_DIR)
}

/// Delete `<dest_root>/BepInEx/plugins/<name>` for each disabled package name.
///
/// Missing directories (including a missing `dest_root`) are skipped silently.
/// Each name is attempted independently: a failed delete is recorded and the
/// loop moves on.
pub fn prune(dest_root: &Utf8Path, package_names: &[String]) -> PruneReport {
    prune_with(dest_root, package_names, |path| fs::remove_dir_all(path))
}

/// [`prune`] with the directory removal supplied by the caller.
pub fn prune_with<F>(dest_root: &Utf8Path, package_names: &[String], mut remove: F) -> PruneReport
where
    F: FnMut(&Utf8Path) -> io::Result<()>,
{
    let mut report = PruneReport::default();

    if !dest_root.is_dir() {
        tracing::warn!("Destination {} missing at prune time, nothing to prune", dest_root);
        return report;
    }

    let plugins = plugins_dir(dest_root);

    for name in package_names {
        let path = plugins.join(name);
        if !path.is_dir() {
            continue;
        }

        tracing::info!("Removing disabled plugin {}", path);
        match remove(&path) {
            Ok(()) => report.removed.push(path),
            Err(e) => {
                tracing::warn!("Failed to remove {}: {}", path, e);
                report.failed.push(PruneFailure {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
