use super::{CopyRequest, TreeCopier};
use crate::models::SyncMode;
use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::runtime::Handle;

/// Delegates copying to Windows' `robocopy`, whose exit codes are the status
/// protocol this crate classifies.
///
/// The child process is spawned through tokio and awaited on the supplied
/// runtime handle, so each call blocks until robocopy exits. The handle must
/// belong to a multi-threaded runtime: `Handle::block_on` cannot drive the
/// process driver of a current-thread runtime.
pub struct RobocopyCopier {
    handle: Handle,
    program: String,
}

impl RobocopyCopier {
    pub fn new(handle: Handle) -> Self {
        Self::with_program(handle, "robocopy")
    }

    /// Use a different executable name or path.
    pub fn with_program(handle: Handle, program: impl Into<String>) -> Self {
        Self {
            handle,
            program: program.into(),
        }
    }

    /// Build the robocopy argument list for a request.
    pub fn build_args(request: &CopyRequest) -> Vec<String> {
        let mut args = vec![request.source.to_string(), request.dest.to_string()];

        match request.mode {
            SyncMode::Mirror => args.push("/MIR".to_string()),
            SyncMode::Merge if request.recursive => args.push("/E".to_string()),
            SyncMode::Merge => {}
        }

        if !request.exclusions.is_empty() {
            args.push("/XD".to_string());
            args.extend(request.exclusions.iter().cloned());
            args.push("/XF".to_string());
            args.extend(request.exclusions.iter().cloned());
        }

        // robocopy retries a locked file a million times by default
        args.push("/R:0".to_string());
        args.push("/NP".to_string());

        args
    }
}

impl TreeCopier for RobocopyCopier {
    fn copy_tree(&self, request: &CopyRequest) -> Result<i32> {
        let args = Self::build_args(request);
        tracing::info!("Executing: {} {}", self.program, args.join(" "));

        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let status = self
            .handle
            .block_on(async { cmd.status().await })
            .with_context(|| format!("Failed to run {}", self.program))?;

        let exit_code = status.code().unwrap_or(-1);

        tracing::info!(
            "{} completed in {:.2}s with exit code {}",
            self.program,
            start.elapsed().as_secs_f32(),
            exit_code
        );

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn request(mode: SyncMode, exclusions: &[&str], recursive: bool) -> CopyRequest {
        CopyRequest {
            source: Utf8PathBuf::from("profile"),
            dest: Utf8PathBuf::from("game"),
            mode,
            exclusions: exclusions.iter().map(|s| s.to_string()).collect(),
            recursive,
        }
    }

    #[test]
    fn test_mirror_args() {
        let args = RobocopyCopier::build_args(&request(SyncMode::Mirror, &["config", "ModA"], true));
        assert_eq!(&args[..3], &["profile", "game", "/MIR"]);
        assert_eq!(&args[3..6], &["/XD", "config", "ModA"]);
        assert_eq!(&args[6..9], &["/XF", "config", "ModA"]);
        assert!(args.contains(&"/R:0".to_string()));
    }

    #[test]
    fn test_root_merge_args_have_no_recursion_flag() {
        let args = RobocopyCopier::build_args(&request(
            SyncMode::Merge,
            &["BepInEx", "doorstop_libs", "unstripped_corlib"],
            false,
        ));
        assert!(!args.contains(&"/MIR".to_string()));
        assert!(!args.contains(&"/E".to_string()));
        assert_eq!(args[2], "/XD");
    }

    #[test]
    fn test_no_exclusions_no_xd() {
        let args = RobocopyCopier::build_args(&request(SyncMode::Mirror, &[], true));
        assert!(!args.contains(&"/XD".to_string()));
    }

    #[test]
    fn test_missing_program_is_error() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let copier = RobocopyCopier::with_program(runtime.handle().clone(), "definitely-not-robocopy-xyz");
        assert!(copier.copy_tree(&request(SyncMode::Mirror, &[], true)).is_err());
    }
}
