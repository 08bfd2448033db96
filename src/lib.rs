// ProfileImport - Import an r2modman profile into a Valheim installation
//
// This is the library crate containing the sync engine and its data structures.
// The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::{ConfigurationError, ImportError, ManifestError};
pub use models::{ExclusionSet, OperationResult, OutcomeCategory, PackageRecord, RunOutcome, Settings, SyncPass};
pub use pipeline::{ImportRequest, ResolvedLocations, resolve_locations, run_import};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
