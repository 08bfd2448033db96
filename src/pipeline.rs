//! Entry points tying the services together into one import.

use crate::error::{ConfigurationError, ImportError};
use crate::models::{RunOutcome, Settings, SyncPass};
use crate::services::copier::TreeCopier;
use crate::services::paths::{self, MANIFEST_FILE_NAME};
use crate::services::process_check::GAME_PROCESS_NAME;
use crate::services::{TreeSynchronizer, build_exclusions, load_packages, prune, resolve_path};
use camino::Utf8PathBuf;

/// Validated locations for an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocations {
    pub manager_root: Utf8PathBuf,
    pub game_root: Utf8PathBuf,
    pub profile_dir: Utf8PathBuf,
}

/// Resolve and validate every location an import needs.
///
/// Explicit paths in `settings` are the only candidates tried for their kind;
/// otherwise the default locations are searched. `is_running` is asked about
/// the game process last, so a running game is reported only once the paths
/// are known to be good.
pub fn resolve_locations(
    settings: &Settings,
    is_running: &dyn Fn(&str) -> bool,
) -> Result<ResolvedLocations, ImportError> {
    let manager_root = resolve_path(
        settings.r2modman_path.as_deref(),
        paths::default_manager_locations,
        paths::validate_manager_root,
    )
    .ok_or(ConfigurationError::ManagerPathNotFound)?;
    tracing::debug!("Found path for r2modman: {}", manager_root);

    let game_root = resolve_path(
        settings.game_path.as_deref(),
        paths::default_game_locations,
        paths::validate_game_root,
    )
    .ok_or(ConfigurationError::GamePathNotFound)?;
    tracing::debug!("Found path for Valheim: {}", game_root);

    let profile_dir = paths::profile_dir(&manager_root, &settings.profile);
    if !paths::validate_profile(&profile_dir) {
        return Err(ConfigurationError::InvalidProfile(profile_dir).into());
    }
    tracing::debug!("Profile path validated: {}", profile_dir);

    if is_running(GAME_PROCESS_NAME) {
        return Err(ImportError::GameRunning);
    }

    Ok(ResolvedLocations {
        manager_root,
        game_root,
        profile_dir,
    })
}

/// Inputs of the sync-and-prune stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub profile_dir: Utf8PathBuf,
    pub game_root: Utf8PathBuf,
    pub preserve_configs: bool,
}

impl ImportRequest {
    pub fn new(locations: &ResolvedLocations, preserve_configs: bool) -> Self {
        Self {
            profile_dir: locations.profile_dir.clone(),
            game_root: locations.game_root.clone(),
            preserve_configs,
        }
    }
}

/// Import a profile into a game directory.
///
/// Loads the manifest, builds the exclusions, runs the four sync passes and,
/// unless a pass was fatal, prunes disabled plugins. A fatal pass is not an
/// `Err`: it comes back as a [`RunOutcome`] with `fatal` set and no pruning.
pub fn run_import<C: TreeCopier + ?Sized>(
    request: &ImportRequest,
    copier: &C,
) -> Result<RunOutcome, ImportError> {
    tracing::info!(
        "Importing {} into {} (preserve configs: {})",
        request.profile_dir,
        request.game_root,
        request.preserve_configs
    );

    let packages = load_packages(&request.profile_dir.join(MANIFEST_FILE_NAME))?;
    let exclusions = build_exclusions(&packages, request.preserve_configs);
    let passes = SyncPass::standard_passes(&exclusions);

    let synchronizer = TreeSynchronizer::new(copier, &request.profile_dir, &request.game_root);
    let report = synchronizer.run_passes(&passes);
    let summary = report.summary();

    if report.fatal {
        return Ok(RunOutcome {
            results: report.results,
            pruned_paths: Vec::new(),
            prune_failures: Vec::new(),
            fatal: true,
            summary: None,
        });
    }

    let pruned = prune(&request.game_root, exclusions.package_names());

    tracing::info!(
        "Import finished: {} passes, {} plugins pruned, {} prune failures",
        report.results.len(),
        pruned.removed.len(),
        pruned.failed.len()
    );

    Ok(RunOutcome {
        results: report.results,
        pruned_paths: pruned.removed,
        prune_failures: pruned.failed,
        fatal: false,
        summary,
    })
}
