//! Integration tests for the import pipeline
//!
//! These tests verify:
//! - End-to-end import with disabled packages and pruning
//! - Idempotent re-runs
//! - Fatal short-circuit before later passes and pruning
//! - Config preservation
//! - Manifest errors

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use profile_import::models::{ImportSummary, OutcomeCategory, Severity};
use profile_import::services::copier::{CopyRequest, NativeCopier, TreeCopier};
use profile_import::{ImportError, ImportRequest, run_import};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

struct Layout {
    _temp: TempDir,
    profile: Utf8PathBuf,
    game: Utf8PathBuf,
}

fn write(path: &Utf8Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A profile with BepInEx plugins X (disabled) and Y (enabled), and an empty game dir.
fn create_layout() -> Layout {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
    let profile = root.join("profile");
    let game = root.join("game");

    write(
        &profile.join("mods.yml"),
        "- name: X\n  enabled: false\n- name: Y\n  enabled: true\n",
    );
    write(&profile.join("winhttp.dll"), "doorstop");
    write(&profile.join("doorstop_config.ini"), "[UnityDoorstop]");
    write(&profile.join("BepInEx/core/BepInEx.dll"), "core");
    write(&profile.join("BepInEx/config/BepInEx.cfg"), "profile config");
    write(&profile.join("BepInEx/plugins/X/X.dll"), "x");
    write(&profile.join("BepInEx/plugins/Y/Y.dll"), "y");
    write(&profile.join("doorstop_libs/mono.dll"), "mono");
    write(&profile.join("unstripped_corlib/mscorlib.dll"), "corlib");
    fs::create_dir_all(&game).unwrap();

    Layout {
        _temp: temp,
        profile,
        game,
    }
}

fn request(layout: &Layout, preserve_configs: bool) -> ImportRequest {
    ImportRequest {
        profile_dir: layout.profile.clone(),
        game_root: layout.game.clone(),
        preserve_configs,
    }
}

#[test]
fn test_end_to_end_import_prunes_disabled_plugin() {
    let layout = create_layout();
    write(&layout.game.join("BepInEx/plugins/X/X.dll"), "stale");

    let outcome = run_import(&request(&layout, false), &NativeCopier::new()).unwrap();

    assert!(!outcome.fatal);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.results.len(), 4);
    assert_eq!(outcome.results[1].pass.exclusions, vec!["X"]);
    assert!(outcome.results.iter().all(|r| r.severity != Severity::Fatal));

    assert_eq!(
        outcome.pruned_paths,
        vec![layout.game.join("BepInEx").join("plugins").join("X")]
    );
    assert!(!layout.game.join("BepInEx/plugins/X").exists());
    assert!(layout.game.join("BepInEx/plugins/Y/Y.dll").is_file());
    assert!(layout.game.join("winhttp.dll").is_file());
    assert!(layout.game.join("doorstop_libs/mono.dll").is_file());
    assert!(layout.game.join("unstripped_corlib/mscorlib.dll").is_file());
    assert_eq!(outcome.summary, Some(ImportSummary::Imported));
}

#[test]
fn test_second_run_changes_nothing() {
    let layout = create_layout();
    let copier = NativeCopier::new();

    run_import(&request(&layout, false), &copier).unwrap();
    let second = run_import(&request(&layout, false), &copier).unwrap();

    assert!(!second.fatal);
    for result in &second.results {
        assert_eq!(result.raw_code, 0, "pass {} was not a no-op", result.pass.kind);
        assert_eq!(result.category, OutcomeCategory::NoChangeNeeded);
    }
    assert!(second.pruned_paths.is_empty());
    assert_eq!(second.summary, Some(ImportSummary::AlreadyUpToDate));
}

#[test]
fn test_game_files_at_root_are_informational() {
    let layout = create_layout();
    write(&layout.game.join("valheim.exe"), "game");
    write(&layout.game.join("valheim_Data/level0"), "data");

    let outcome = run_import(&request(&layout, false), &NativeCopier::new()).unwrap();

    let root = &outcome.results[0];
    assert_eq!(root.raw_code, 3);
    assert!(!outcome.fatal);
    assert!(layout.game.join("valheim.exe").exists());

    let again = run_import(&request(&layout, false), &NativeCopier::new()).unwrap();
    assert_eq!(again.results[0].raw_code, 2);
    assert_eq!(again.results[0].severity, Severity::Info);
    assert_eq!(again.summary, Some(ImportSummary::AlreadyUpToDate));
}

#[test]
fn test_preserve_configs_keeps_local_config() {
    let layout = create_layout();
    write(&layout.game.join("BepInEx/config/BepInEx.cfg"), "my settings");
    write(&layout.game.join("BepInEx/config/local-only.cfg"), "mine");

    run_import(&request(&layout, true), &NativeCopier::new()).unwrap();

    assert_eq!(
        fs::read_to_string(layout.game.join("BepInEx/config/BepInEx.cfg")).unwrap(),
        "my settings"
    );
    assert!(layout.game.join("BepInEx/config/local-only.cfg").exists());
}

#[test]
fn test_without_preserve_configs_mirror_overwrites_config() {
    let layout = create_layout();
    write(&layout.game.join("BepInEx/config/BepInEx.cfg"), "my settings");
    write(&layout.game.join("BepInEx/config/local-only.cfg"), "mine");

    run_import(&request(&layout, false), &NativeCopier::new()).unwrap();

    assert_eq!(
        fs::read_to_string(layout.game.join("BepInEx/config/BepInEx.cfg")).unwrap(),
        "profile config"
    );
    assert!(!layout.game.join("BepInEx/config/local-only.cfg").exists());
}

/// Copier that records every request and fails the BepInEx pass.
struct FailingBepInEx {
    calls: RefCell<Vec<Utf8PathBuf>>,
}

impl TreeCopier for FailingBepInEx {
    fn copy_tree(&self, request: &CopyRequest) -> Result<i32> {
        self.calls.borrow_mut().push(request.dest.clone());
        if request.dest.ends_with("BepInEx") {
            Ok(8)
        } else {
            Ok(0)
        }
    }
}

#[test]
fn test_fatal_bepinex_pass_skips_remaining_work() {
    let layout = create_layout();
    write(&layout.game.join("BepInEx/plugins/X/X.dll"), "stale");
    let copier = FailingBepInEx {
        calls: RefCell::new(Vec::new()),
    };

    let outcome = run_import(&request(&layout, false), &copier).unwrap();

    assert!(outcome.fatal);
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(copier.calls.borrow().len(), 2);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[1].category, OutcomeCategory::CopyFailures);
    assert!(outcome.pruned_paths.is_empty());
    assert!(outcome.summary.is_none());
    assert!(layout.game.join("BepInEx/plugins/X/X.dll").exists());
}

#[test]
fn test_missing_manifest_is_error() {
    let layout = create_layout();
    fs::remove_file(layout.profile.join("mods.yml")).unwrap();

    let err = run_import(&request(&layout, false), &NativeCopier::new()).unwrap_err();
    assert!(matches!(err, ImportError::ManifestRead(_)));
    assert!(!layout.game.join("BepInEx").exists());
}

#[test]
fn test_missing_component_subtree_is_fatal() {
    let layout = create_layout();
    fs::remove_dir_all(layout.profile.join("doorstop_libs")).unwrap();

    let outcome = run_import(&request(&layout, false), &NativeCopier::new()).unwrap();

    assert!(outcome.fatal);
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.results[2].category, OutcomeCategory::UnknownFailure);
}
