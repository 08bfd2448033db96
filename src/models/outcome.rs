use camino::Utf8PathBuf;

use super::sync_pass::SyncPass;

/// What a copier status code says happened during one pass.
///
/// The numbering follows the robocopy exit-code convention, which both copier
/// backends speak: bit 1 = files copied, bit 2 = extra destination entries,
/// bit 4 = mismatched entries, bit 8 = copy failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeCategory {
    NoChangeNeeded,
    CopiedSuccessfully,
    ExtraFilesPresentNoCopy,
    PartialCopyExtraFiles,
    PartialCopyMismatch,
    NoCopyConflicts,
    MixedCopyAndMismatch,
    CopyFailures,
    UnknownFailure,
}

impl OutcomeCategory {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::NoChangeNeeded,
            1 => Self::CopiedSuccessfully,
            2 => Self::ExtraFilesPresentNoCopy,
            3 => Self::PartialCopyExtraFiles,
            5 => Self::PartialCopyMismatch,
            6 => Self::NoCopyConflicts,
            7 => Self::MixedCopyAndMismatch,
            8 => Self::CopyFailures,
            _ => Self::UnknownFailure,
        }
    }

    /// Severity of this category on any pass other than the root pass.
    pub fn default_severity(self) -> Severity {
        match self {
            Self::NoChangeNeeded | Self::CopiedSuccessfully => Severity::Info,
            Self::ExtraFilesPresentNoCopy
            | Self::PartialCopyExtraFiles
            | Self::PartialCopyMismatch
            | Self::NoCopyConflicts => Severity::Warning,
            Self::MixedCopyAndMismatch | Self::CopyFailures | Self::UnknownFailure => {
                Severity::Fatal
            }
        }
    }
}

/// Ordered so that the worst outcome of a run is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Fatal,
}

/// Classified result of a single [`SyncPass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub pass: SyncPass,
    pub raw_code: i32,
    pub category: OutcomeCategory,
    pub severity: Severity,
    /// Absolute destination of the pass, used in user-facing messages.
    pub dest: Utf8PathBuf,
}

impl OperationResult {
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

/// Final informational message of a non-fatal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSummary {
    /// Every component pass reported code 0.
    AlreadyUpToDate,
    /// At least one component pass copied files and none reported worse.
    Imported,
    /// Warnings were reported; they already carry their own messages.
    CompletedWithWarnings,
}

/// A stale plugin directory that could not be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneFailure {
    pub path: Utf8PathBuf,
    pub reason: String,
}

/// Aggregate of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub results: Vec<OperationResult>,
    pub pruned_paths: Vec<Utf8PathBuf>,
    pub prune_failures: Vec<PruneFailure>,
    pub fatal: bool,
    /// `None` when the run aborted on a fatal pass.
    pub summary: Option<ImportSummary>,
}

impl RunOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.fatal { 1 } else { 0 }
    }

    /// Highest severity across every pass that ran.
    pub fn max_severity(&self) -> Severity {
        self.results
            .iter()
            .map(|r| r.severity)
            .max()
            .unwrap_or(Severity::Info)
    }
}
