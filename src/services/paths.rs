//! Locating the r2modman data directory, the Valheim installation and the
//! profile to import.
//!
//! [`resolve_path`] is the shared search: a user-supplied path is the only
//! candidate when present, otherwise the default locations are tried in
//! order. The `validate_*` predicates decide what counts as usable.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Folder name r2modman uses for its local data.
pub const MANAGER_DIR_NAME: &str = "r2modmanPlus-local";

/// Game folder inside the r2modman data directory, and under Steam's `common`.
pub const GAME_DIR_NAME: &str = "Valheim";

/// Folder (under [`GAME_DIR_NAME`]) holding one directory per profile.
pub const PROFILES_DIR_NAME: &str = "profiles";

/// Package manifest written by r2modman into each profile.
pub const MANIFEST_FILE_NAME: &str = "mods.yml";

/// Game executables, Windows build first.
pub const GAME_EXECUTABLES: [&str; 2] = ["valheim.exe", "valheim.x86_64"];

/// Unity data directory next to the executable.
pub const GAME_DATA_DIR_NAME: &str = "valheim_Data";

const STEAM_GAME_SUBPATH: [&str; 4] = ["Steam", "steamapps", "common", GAME_DIR_NAME];

/// Find the first usable directory.
///
/// If `user_path` is given (and not blank) it is the sole candidate and
/// `candidates` is never called. Returns `None` when nothing validates; callers
/// treat that as a configuration error that needs explicit user input.
pub fn resolve_path<C, V>(user_path: Option<&Utf8Path>, candidates: C, validate: V) -> Option<Utf8PathBuf>
where
    C: FnOnce() -> Vec<Utf8PathBuf>,
    V: Fn(&Utf8Path) -> bool,
{
    let test_paths = match user_path {
        Some(path) if !path.as_str().trim().is_empty() => vec![path.to_path_buf()],
        _ => candidates(),
    };

    for path in test_paths {
        if validate(&path) {
            tracing::debug!("Resolved path: {}", path);
            return Some(path);
        }
        tracing::debug!("Rejected candidate path: {}", path);
    }

    None
}

/// Default r2modman data locations (roaming app data, then config dir).
pub fn default_manager_locations() -> Vec<Utf8PathBuf> {
    let mut results = Vec::new();

    for base in [dirs::data_dir(), dirs::config_dir()].into_iter().flatten() {
        if let Ok(base) = Utf8PathBuf::from_path_buf(base) {
            push_unique(&mut results, base.join(MANAGER_DIR_NAME));
        }
    }

    results
}

/// Default Valheim locations: the current directory first, then the usual
/// Steam library folders.
pub fn default_game_locations() -> Vec<Utf8PathBuf> {
    let mut results = Vec::new();

    if let Some(cwd) = std::env::current_dir()
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
    {
        push_unique(&mut results, cwd);
    }

    for var in ["ProgramFiles", "ProgramFiles(x86)"] {
        if let Ok(program_files) = std::env::var(var) {
            push_unique(&mut results, steam_game_dir(Utf8Path::new(&program_files)));
        }
    }

    if let Some(data_dir) = dirs::data_dir().and_then(|p| Utf8PathBuf::from_path_buf(p).ok()) {
        push_unique(&mut results, steam_game_dir(&data_dir));
    }

    if let Some(home) = dirs::home_dir().and_then(|p| Utf8PathBuf::from_path_buf(p).ok()) {
        push_unique(
            &mut results,
            home.join(".steam")
                .join("steam")
                .join("steamapps")
                .join("common")
                .join(GAME_DIR_NAME),
        );
    }

    results
}

fn steam_game_dir(base: &Utf8Path) -> Utf8PathBuf {
    STEAM_GAME_SUBPATH
        .iter()
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

fn push_unique(paths: &mut Vec<Utf8PathBuf>, path: Utf8PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

/// Check that `path` is an r2modman data directory with a non-empty Valheim folder.
pub fn validate_manager_root(path: &Utf8Path) -> bool {
    if path.as_str().is_empty() || !path.is_dir() {
        return false;
    }

    is_non_empty_dir(&path.join(GAME_DIR_NAME))
}

/// Check that `path` holds the Valheim executable and a non-empty data folder.
pub fn validate_game_root(path: &Utf8Path) -> bool {
    if path.as_str().is_empty() || !path.is_dir() {
        return false;
    }

    let has_executable = GAME_EXECUTABLES
        .iter()
        .any(|exe| path.join(exe).is_file());

    has_executable && is_non_empty_dir(&path.join(GAME_DATA_DIR_NAME))
}

/// Check that `path` is a profile directory containing `mods.yml`.
pub fn validate_profile(path: &Utf8Path) -> bool {
    if path.as_str().is_empty() || !path.is_dir() {
        return false;
    }

    path.join(MANIFEST_FILE_NAME).is_file()
}

/// `<manager_root>/Valheim/profiles/<profile>`
pub fn profile_dir(manager_root: &Utf8Path, profile: &str) -> Utf8PathBuf {
    manager_root
        .join(GAME_DIR_NAME)
        .join(PROFILES_DIR_NAME)
        .join(profile)
}

fn is_non_empty_dir(path: &Utf8Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
