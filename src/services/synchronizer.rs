//! Running the ordered sync passes and aggregating their outcomes.

use super::copier::{CopyRequest, TreeCopier};
use super::outcome::{classify, describe};
use crate::models::{ImportSummary, OperationResult, Severity, SyncPass};
use camino::{Utf8Path, Utf8PathBuf};

/// Results of the pass sequence, before pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub results: Vec<OperationResult>,
    pub fatal: bool,
    /// Highest non-fatal code across the component passes (root excluded).
    pub max_code: i32,
}

impl SyncReport {
    /// Final informational message, `None` for a fatal run.
    pub fn summary(&self) -> Option<ImportSummary> {
        if self.fatal {
            return None;
        }
        Some(match self.max_code {
            0 => ImportSummary::AlreadyUpToDate,
            1 => ImportSummary::Imported,
            _ => ImportSummary::CompletedWithWarnings,
        })
    }
}

/// Applies [`SyncPass`]es from a profile directory to a game directory.
///
/// The copy itself is delegated to a [`TreeCopier`]; this type owns path
/// construction, the copy arguments, classification and the stop-on-fatal
/// sequencing.
pub struct TreeSynchronizer<'a, C: TreeCopier + ?Sized> {
    copier: &'a C,
    source_root: &'a Utf8Path,
    dest_root: &'a Utf8Path,
}

impl<'a, C: TreeCopier + ?Sized> TreeSynchronizer<'a, C> {
    pub fn new(copier: &'a C, source_root: &'a Utf8Path, dest_root: &'a Utf8Path) -> Self {
        Self {
            copier,
            source_root,
            dest_root,
        }
    }

    /// Build the copy arguments for a pass.
    pub fn copy_request(&self, pass: &SyncPass) -> CopyRequest {
        CopyRequest {
            source: join_subpath(self.source_root, &pass.source_subpath),
            dest: join_subpath(self.dest_root, &pass.dest_subpath),
            mode: pass.mode,
            exclusions: pass.exclusions.clone(),
            recursive: pass.copy_subdirectories,
        }
    }

    /// Run one pass and classify its status code.
    pub fn run_pass(&self, pass: &SyncPass) -> OperationResult {
        let request = self.copy_request(pass);

        tracing::info!(
            "Sync pass {}: {} {} -> {} (excluding {:?})",
            pass.kind,
            pass.mode,
            request.source,
            request.dest,
            request.exclusions
        );

        let raw_code = match self.copier.copy_tree(&request) {
            Ok(code) => code,
            Err(e) => {
                tracing::error!("Copier failed for {}: {:#}", pass.kind, e);
                -1
            }
        };

        let (category, severity) = classify(raw_code, pass);
        let result = OperationResult {
            pass: pass.clone(),
            raw_code,
            category,
            severity,
            dest: request.dest,
        };

        match severity {
            Severity::Info => tracing::info!("{} ({}): {}", pass.kind, raw_code, describe(&result)),
            Severity::Warning => tracing::warn!("{} ({}): {}", pass.kind, raw_code, describe(&result)),
            Severity::Fatal => tracing::error!("{} ({}): {}", pass.kind, raw_code, describe(&result)),
        }

        result
    }

    /// Run passes in order, stopping after the first fatal result.
    pub fn run_passes(&self, passes: &[SyncPass]) -> SyncReport {
        let mut results = Vec::with_capacity(passes.len());
        let mut max_code = 0;

        for pass in passes {
            let result = self.run_pass(pass);

            if result.is_fatal() {
                tracing::error!("Aborting import after fatal result on {}", pass.kind);
                results.push(result);
                return SyncReport {
                    results,
                    fatal: true,
                    max_code,
                };
            }

            if !pass.is_root() {
                max_code = max_code.max(result.raw_code);
            }
            results.push(result);
        }

        SyncReport {
            results,
            fatal: false,
            max_code,
        }
    }
}

fn join_subpath(root: &Utf8Path, subpath: &str) -> Utf8PathBuf {
    if subpath.is_empty() {
        root.to_path_buf()
    } else {
        root.join(subpath)
    }
}
