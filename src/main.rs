//! ProfileImport - Import an r2modman profile into a Valheim installation
//!
//! Main entry point for the command-line tool.
//!
//! # Execution Flow
//!
//! 1. Refuse to run with no arguments at all (use `-d` for defaults)
//! 2. Load settings (YAML file + `PROFILE_IMPORT_*` env) and apply flags
//! 3. Initialize logging → `<data_local_dir>/profile-import/logs`
//! 4. Resolve the r2modman, Valheim and profile paths; refuse if Valheim is running
//! 5. Optionally save the resolved paths (`--save`)
//! 6. Run the import with the selected copier and print the report
//!
//! The exit code is 0 for a non-fatal run and 1 for configuration errors,
//! manifest errors and fatal copy results.

use anyhow::Result;
use clap::Parser;
use profile_import::cli::{Cli, NO_OPTIONS_MESSAGE};
use profile_import::models::CopierKind;
use profile_import::services::copier::{NativeCopier, RobocopyCopier, TreeCopier};
use profile_import::services::is_process_running;
use profile_import::{
    APP_NAME, ConfigManager, ImportRequest, VERSION, report, resolve_locations, run_import,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        eprintln!("{}", NO_OPTIONS_MESSAGE);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error.  {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_manager = ConfigManager::new(ConfigManager::default_dir());
    let mut settings = config_manager.load_settings()?;
    cli.apply_to(&mut settings);

    let log_dir = settings
        .log_dir
        .clone()
        .unwrap_or_else(ConfigManager::default_log_dir);
    let _guard = profile_import::logging::setup_logging_with_console(
        &log_dir,
        APP_NAME,
        settings.debug,
        cli.verbose,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::debug!("Effective settings: {:?}", settings);

    let locations = resolve_locations(&settings, &is_process_running)?;

    if cli.save {
        let mut saved = settings.clone();
        saved.r2modman_path = Some(locations.manager_root.clone());
        saved.game_path = Some(locations.game_root.clone());
        config_manager.save_settings(&saved)?;
        println!("Saved paths to {}", config_manager.settings_path());
    }

    // Only the robocopy backend spawns processes through tokio
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .thread_name("profile-import-worker")
        .build()?;

    let copier: Box<dyn TreeCopier> = match settings.copier {
        CopierKind::Native => Box::new(NativeCopier::new()),
        CopierKind::Robocopy => Box::new(RobocopyCopier::new(runtime.handle().clone())),
    };

    let request = ImportRequest::new(&locations, settings.preserve_configs);
    let outcome = run_import(&request, &copier)?;

    report::write_outcome(
        &outcome,
        &settings.profile,
        &locations.game_root,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;

    tracing::info!("Import complete, fatal: {}", outcome.fatal);

    Ok(ExitCode::from(outcome.exit_code()))
}
