//! Mapping copier status codes to categories, severities and messages.

use crate::models::{OperationResult, OutcomeCategory, Severity, SyncPass};
use camino::Utf8Path;

/// Classify a status code returned for `pass`.
///
/// Code 2 on the root pass is informational: the profile never contains the
/// game's own executable and data folders, so the game root always has
/// extras. No other code or pass gets special treatment.
pub fn classify(code: i32, pass: &SyncPass) -> (OutcomeCategory, Severity) {
    let category = OutcomeCategory::from_code(code);

    let severity = if pass.is_root() && category == OutcomeCategory::ExtraFilesPresentNoCopy {
        Severity::Info
    } else {
        category.default_severity()
    };

    (category, severity)
}

/// One descriptive line for a pass result.
pub fn describe(result: &OperationResult) -> String {
    describe_category(result.category, Some(&result.dest))
}

/// Message for a category, naming `dest` when known.
pub fn describe_category(category: OutcomeCategory, dest: Option<&Utf8Path>) -> String {
    let path = match dest {
        Some(dest) if !dest.as_str().is_empty() => format!("\"{}\"", dest),
        _ => "the destination directory".to_string(),
    };

    match category {
        OutcomeCategory::NoChangeNeeded => {
            format!("The files already exist in {}, the copy operation was skipped.", path)
        }
        OutcomeCategory::CopiedSuccessfully => {
            format!("All files were copied successfully to {}.", path)
        }
        OutcomeCategory::ExtraFilesPresentNoCopy => format!(
            "There are some additional files in {} that aren't present in the source directory. No files were copied.",
            path
        ),
        OutcomeCategory::PartialCopyExtraFiles => format!(
            "Some files were copied. Additional files were present in {}. No failure was met.",
            path
        ),
        OutcomeCategory::PartialCopyMismatch => format!(
            "Some files were copied. Some files were mismatched in {}. No failure was met.",
            path
        ),
        OutcomeCategory::NoCopyConflicts => format!(
            "Additional files and mismatched files exist in {}. No files were copied and no failures were met.",
            path
        ),
        OutcomeCategory::MixedCopyAndMismatch => format!(
            "Files were copied, a file mismatch was present, and additional files were present in {}.",
            path
        ),
        OutcomeCategory::CopyFailures => format!("Several files didn't copy in {}.", path),
        OutcomeCategory::UnknownFailure => format!(
            "At least one failure occurred during the copy operation in {}.",
            path
        ),
    }
}
