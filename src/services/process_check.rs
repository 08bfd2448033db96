//! Detecting whether the game is running before touching its files.

use sysinfo::{ProcessRefreshKind, RefreshKind, System};

/// Process name of the game, without extension.
pub const GAME_PROCESS_NAME: &str = "valheim";

/// Checks if a process with the given executable name is running.
///
/// Matching is case-insensitive and ignores a trailing `.exe`.
pub fn is_process_running(exe_name: &str) -> bool {
    let mut sys =
        System::new_with_specifics(RefreshKind::new().with_processes(ProcessRefreshKind::new()));
    sys.refresh_processes();

    let running = sys
        .processes()
        .values()
        .any(|process| process_name_matches(process.name(), exe_name));

    tracing::debug!("Process {} running: {}", exe_name, running);
    running
}

/// Compare a process table name against an executable name.
pub fn process_name_matches(process_name: &str, exe_name: &str) -> bool {
    let wanted = exe_name.to_lowercase();
    let wanted = wanted.trim_end_matches(".exe");
    let actual = process_name.to_lowercase();
    let actual = actual.trim_end_matches(".exe");

    actual == wanted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_name_matching() {
        assert!(process_name_matches("valheim.exe", "valheim"));
        assert!(process_name_matches("Valheim.exe", "valheim.exe"));
        assert!(process_name_matches("valheim", "valheim.exe"));
        assert!(!process_name_matches("valheim_server.exe", "valheim"));
        assert!(!process_name_matches("steam", "valheim"));
    }

    #[test]
    fn test_unlikely_process_not_running() {
        assert!(!is_process_running("definitely-not-a-real-process-xyz"));
    }
}
