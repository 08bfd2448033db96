//! Services module - the import engine.
//!
//! The services are framework-agnostic: no console output, only explicit
//! inputs and returned values, so every stage can be tested on its own.
//!
//! # Components
//!
//! - [`paths`]: locating the r2modman data, the game install and the profile
//! - [`manifest`]: loading [`PackageRecord`](crate::models::PackageRecord)s from `mods.yml`
//! - [`exclusions`]: building the [`ExclusionSet`](crate::models::ExclusionSet)
//! - [`copier`]: the [`TreeCopier`] backends that mirror or merge a tree
//! - [`synchronizer`]: the four ordered passes and their aggregation
//! - [`outcome`]: status-code classification and messages
//! - [`pruner`]: deleting plugin folders of disabled packages
//! - [`process_check`]: refusing to run while the game is open
//!
//! # Flow
//!
//! 1. Resolve the manager root, game root and profile directory
//! 2. Load the manifest and build the exclusions
//! 3. Run the root merge, then mirror `BepInEx`, `doorstop_libs`, `unstripped_corlib`
//! 4. Stop on the first fatal result, otherwise prune disabled plugins

pub mod copier;
pub mod exclusions;
pub mod manifest;
pub mod outcome;
pub mod paths;
pub mod process_check;
pub mod pruner;
pub mod synchronizer;

pub use copier::{CopyRequest, NativeCopier, RobocopyCopier, TreeCopier};
pub use exclusions::build_exclusions;
pub use manifest::load_packages;
pub use outcome::{classify, describe};
pub use paths::resolve_path;
pub use process_check::is_process_running;
pub use pruner::{PruneReport, prune, prune_with};
pub use synchronizer::{SyncReport, TreeSynchronizer};
