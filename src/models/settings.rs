use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Name of the profile imported when none is given.
pub const DEFAULT_PROFILE: &str = "Default";

/// Which directory-mirroring backend performs the copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CopierKind {
    /// Built-in tree walk, works on every platform.
    #[default]
    Native,
    /// Shell out to robocopy (Windows only).
    Robocopy,
}

/// User settings from `profile-import.yaml`, the environment and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: String,

    pub r2modman_path: Option<Utf8PathBuf>,

    pub game_path: Option<Utf8PathBuf>,

    pub preserve_configs: bool,

    pub debug: bool,

    pub copier: CopierKind,

    pub log_dir: Option<Utf8PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            r2modman_path: None,
            game_path: None,
            preserve_configs: false,
            debug: false,
            copier: CopierKind::Native,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.profile, "Default");
        assert!(settings.r2modman_path.is_none());
        assert!(!settings.preserve_configs);
        assert_eq!(settings.copier, CopierKind::Native);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml_ng::from_str("preserve_configs: true\n").unwrap();
        assert!(settings.preserve_configs);
        assert_eq!(settings.profile, "Default");
    }

    #[test]
    fn test_copier_kind_lowercase() {
        let settings: Settings = serde_yaml_ng::from_str("copier: robocopy\n").unwrap();
        assert_eq!(settings.copier, CopierKind::Robocopy);
    }
}
