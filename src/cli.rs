//! Command-line arguments.

use crate::models::{CopierKind, Settings};
use camino::Utf8PathBuf;
use clap::Parser;

/// Message shown when the binary is started without any argument.
pub const NO_OPTIONS_MESSAGE: &str =
    "No options specified.  Please use -d to attempt import with defaults, or -h for help.";

/// Import an r2modman profile into a Valheim directory.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "profile-import")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The name of the profile to be imported [default: Default]
    pub name: Option<String>,

    /// Attempt to import using default values
    #[arg(short = 'd', long)]
    pub use_defaults: bool,

    /// Path of the r2modman data directory (defaults to the roaming app data r2modmanPlus-local)
    #[arg(short = 'r', long, value_name = "PATH")]
    pub r2modman_path: Option<Utf8PathBuf>,

    /// Path of Valheim (defaults to the current directory or the Steam library)
    #[arg(short = 'v', long, value_name = "PATH")]
    pub game_path: Option<Utf8PathBuf>,

    /// Preserve the game's current BepInEx/config directory
    #[arg(short = 'p', long)]
    pub preserve_configs: bool,

    /// Copy backend
    #[arg(long, value_enum)]
    pub copier: Option<CopierKind>,

    /// Save the resolved r2modman and Valheim paths to the settings file
    #[arg(short = 's', long)]
    pub save: bool,

    /// Also write log output to the console
    #[arg(long)]
    pub verbose: bool,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Layer the flags that were given over loaded settings.
    ///
    /// Switches only ever turn options on; a flag left off keeps the value
    /// from the settings file or environment.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(name) = &self.name {
            settings.profile = name.clone();
        }
        if let Some(path) = &self.r2modman_path {
            settings.r2modman_path = Some(path.clone());
        }
        if let Some(path) = &self.game_path {
            settings.game_path = Some(path.clone());
        }
        if self.preserve_configs {
            settings.preserve_configs = true;
        }
        if self.debug {
            settings.debug = true;
        }
        if let Some(copier) = self.copier {
            settings.copier = copier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::parse_from(["profile-import", "Modded", "-p", "-r", "C:/r2", "-v", "D:/Valheim"]);
        assert_eq!(cli.name.as_deref(), Some("Modded"));
        assert!(cli.preserve_configs);
        assert_eq!(cli.r2modman_path, Some(Utf8PathBuf::from("C:/r2")));
        assert_eq!(cli.game_path, Some(Utf8PathBuf::from("D:/Valheim")));
    }

    #[test]
    fn test_defaults_flag() {
        let cli = Cli::parse_from(["profile-import", "-d"]);
        assert!(cli.use_defaults);
        assert!(cli.name.is_none());

        let mut settings = Settings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from(["profile-import", "Other", "--copier", "robocopy", "-v", "game"]);
        let mut settings = Settings {
            profile: "FromFile".to_string(),
            game_path: Some(Utf8PathBuf::from("old")),
            preserve_configs: true,
            ..Settings::default()
        };
        cli.apply_to(&mut settings);

        assert_eq!(settings.profile, "Other");
        assert_eq!(settings.game_path, Some(Utf8PathBuf::from("game")));
        assert_eq!(settings.copier, CopierKind::Robocopy);
        assert!(settings.preserve_configs);
    }

    #[test]
    fn test_unknown_copier_rejected() {
        assert!(Cli::try_parse_from(["profile-import", "--copier", "rsync"]).is_err());
    }
}
