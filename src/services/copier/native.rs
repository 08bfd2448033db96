use super::{
    CopyRequest, STATUS_COPIED, STATUS_EXTRAS, STATUS_FAILED, STATUS_FATAL, STATUS_MISMATCH,
    TreeCopier,
};
use crate::models::SyncMode;
use anyhow::Result;
use filetime::FileTime;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counters gathered while syncing one tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub extras: usize,
    pub mismatched: usize,
    pub failed: usize,
}

impl CopyStats {
    /// Fold the counters into a status code.
    pub fn status_code(&self) -> i32 {
        let mut code = 0;
        if self.copied > 0 {
            code |= STATUS_COPIED;
        }
        if self.extras > 0 {
            code |= STATUS_EXTRAS;
        }
        if self.mismatched > 0 {
            code |= STATUS_MISMATCH;
        }
        if self.failed > 0 {
            code |= STATUS_FAILED;
        }
        code
    }
}

/// Pure-Rust tree copier built on two `walkdir` passes.
///
/// 1. The destination walk finds entries the source lacks (extras) and entries
///    whose kind differs (mismatches). In mirror mode both are removed.
/// 2. The source walk creates missing directories and copies files that are
///    missing or differ in length or modification time. Copied files get the
///    source modification time so an unchanged tree copies nothing next time.
///
/// Excluded names are pruned from both walks, so they are neither copied,
/// counted nor deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCopier;

impl NativeCopier {
    pub fn new() -> Self {
        Self
    }

    /// Run both walks and return the raw counters.
    pub fn sync(&self, request: &CopyRequest) -> CopyStats {
        let mut stats = CopyStats::default();

        if let Err(e) = fs::create_dir_all(&request.dest) {
            tracing::warn!("Failed to create destination {}: {}", request.dest, e);
            stats.failed += 1;
            return stats;
        }

        self.scan_destination(request, &mut stats);
        self.copy_from_source(request, &mut stats);

        tracing::debug!(
            "{} {} -> {}: {} copied, {} extra, {} mismatched, {} failed",
            request.mode,
            request.source,
            request.dest,
            stats.copied,
            stats.extras,
            stats.mismatched,
            stats.failed
        );

        stats
    }

    fn scan_destination(&self, request: &CopyRequest, stats: &mut CopyStats) {
        let source = request.source.as_std_path();
        let dest = request.dest.as_std_path();
        let mut removals: Vec<(PathBuf, bool)> = Vec::new();

        let mut entries = walker(dest, request.recursive)
            .into_iter()
            .filter_entry(|e| !request.is_excluded(e.file_name()));

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read destination entry: {}", e);
                    stats.failed += 1;
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(dest) else {
                continue;
            };
            let is_dir = entry.file_type().is_dir();

            let conflict = match fs::metadata(source.join(relative)) {
                Err(_) => {
                    stats.extras += 1;
                    true
                }
                Ok(meta) if meta.is_dir() != is_dir => {
                    stats.mismatched += 1;
                    true
                }
                Ok(_) => false,
            };

            if conflict {
                if is_dir {
                    entries.skip_current_dir();
                }
                if request.mode == SyncMode::Mirror {
                    removals.push((entry.into_path(), is_dir));
                }
            }
        }

        for (path, is_dir) in removals {
            let result = if is_dir {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };

            match result {
                Ok(()) => tracing::debug!("Purged {}", path.display()),
                Err(e) => {
                    tracing::warn!("Failed to purge {}: {}", path.display(), e);
                    stats.failed += 1;
                }
            }
        }
    }

    fn copy_from_source(&self, request: &CopyRequest, stats: &mut CopyStats) {
        let source = request.source.as_std_path();
        let dest = request.dest.as_std_path();

        let mut entries = walker(source, request.recursive)
            .into_iter()
            .filter_entry(|e| !request.is_excluded(e.file_name()));

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read source entry: {}", e);
                    stats.failed += 1;
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(source) else {
                continue;
            };
            let target = dest.join(relative);
            let target_meta = fs::symlink_metadata(&target).ok();

            if entry.file_type().is_dir() {
                if !request.recursive {
                    continue;
                }
                match target_meta {
                    Some(meta) if meta.is_dir() => {}
                    // Mismatch left in place by merge mode, already counted.
                    Some(_) => entries.skip_current_dir(),
                    None => {
                        if let Err(e) = fs::create_dir(&target) {
                            tracing::warn!("Failed to create {}: {}", target.display(), e);
                            stats.failed += 1;
                            entries.skip_current_dir();
                        }
                    }
                }
                continue;
            }

            let source_meta = match fs::metadata(entry.path()) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::warn!("Failed to stat {}: {}", entry.path().display(), e);
                    stats.failed += 1;
                    continue;
                }
            };

            match &target_meta {
                Some(meta) if meta.is_dir() => continue,
                Some(meta) if !differs(&source_meta, meta) => continue,
                _ => {}
            }

            match copy_file(entry.path(), &target, &source_meta, target_meta.as_ref()) {
                Ok(()) => {
                    tracing::debug!("Copied {}", relative.display());
                    stats.copied += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to copy {}: {}", entry.path().display(), e);
                    stats.failed += 1;
                }
            }
        }
    }
}

impl TreeCopier for NativeCopier {
    fn copy_tree(&self, request: &CopyRequest) -> Result<i32> {
        if !request.source.is_dir() {
            tracing::error!("Source directory does not exist: {}", request.source);
            return Ok(STATUS_FATAL);
        }

        Ok(self.sync(request).status_code())
    }
}

fn walker(root: &Path, recursive: bool) -> WalkDir {
    let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if recursive { walker } else { walker.max_depth(1) }
}

fn differs(source: &Metadata, target: &Metadata) -> bool {
    source.len() != target.len() || source.modified().ok() != target.modified().ok()
}

fn copy_file(
    source: &Path,
    target: &Path,
    source_meta: &Metadata,
    existing: Option<&Metadata>,
) -> io::Result<()> {
    // fs::copy carries the read-only bit over, so an earlier copy can refuse the write.
    if existing.is_some_and(|meta| meta.permissions().readonly()) {
        fs::remove_file(target)?;
    }

    fs::copy(source, target)?;

    // Stamped by path so read-only copies still get the source time.
    let modified = FileTime::from_last_modification_time(source_meta);
    if let Err(e) = filetime::set_file_mtime(target, modified) {
        tracing::warn!("Could not set modification time on {}: {}", target.display(), e);
    }

    Ok(())
}
