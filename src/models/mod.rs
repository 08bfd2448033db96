//! Data models for the profile importer.
//!
//! - [`PackageRecord`]: one entry of a profile's `mods.yml`
//! - [`ExclusionSet`] and [`SyncPass`]: what each of the four sync passes copies and skips
//! - [`OperationResult`] and [`RunOutcome`]: classified per-pass results and the run aggregate
//! - [`Settings`]: user preferences loaded by [`ConfigManager`](crate::config::ConfigManager)

pub mod outcome;
pub mod package;
pub mod settings;
pub mod sync_pass;

pub use outcome::{ImportSummary, OperationResult, OutcomeCategory, PruneFailure, RunOutcome, Severity};
pub use package::PackageRecord;
pub use settings::{CopierKind, DEFAULT_PROFILE, Settings};
pub use sync_pass::{
    BEPINEX_DIR, CONFIG_DIR, DOORSTOP_LIBS_DIR, ExclusionSet, PLUGINS_DIR, PassKind, SyncMode,
    SyncPass, UNSTRIPPED_CORLIB_DIR,
};
