use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::fs;

/// Settings file name inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "profile-import.yaml";

/// Prefix of environment variables that override settings
/// (e.g. `PROFILE_IMPORT_GAME_PATH`).
pub const ENV_PREFIX: &str = "PROFILE_IMPORT";

const APP_DIR_NAME: &str = "profile-import";

/// Loads and saves [`Settings`].
///
/// Sources, lowest priority first:
/// - built-in defaults
/// - `profile-import.yaml` in the configuration directory (optional)
/// - `PROFILE_IMPORT_*` environment variables
///
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for the given directory. The directory is only
    /// created when settings are saved.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();
        Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        }
    }

    /// Platform configuration directory for this tool, falling back to the
    /// current directory.
    pub fn default_dir() -> Utf8PathBuf {
        dirs::config_dir()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .map(|p| p.join(APP_DIR_NAME))
            .unwrap_or_else(|| Utf8PathBuf::from("."))
    }

    /// Default log directory: `<data_local_dir>/profile-import/logs`, or `./logs`.
    pub fn default_log_dir() -> Utf8PathBuf {
        dirs::data_local_dir()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .map(|p| p.join(APP_DIR_NAME).join("logs"))
            .unwrap_or_else(|| Utf8PathBuf::from("logs"))
    }

    /// Load settings from the file and the process environment.
    pub fn load_settings(&self) -> Result<Settings> {
        self.load_settings_with_env(None)
    }

    /// Load settings, taking environment variables from `vars` instead of the
    /// process environment when given.
    pub fn load_settings_with_env(&self, vars: Option<HashMap<String, String>>) -> Result<Settings> {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(vars);

        let settings: Settings = Config::builder()
            .add_source(File::new(self.settings_path.as_str(), FileFormat::Yaml).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Save settings to the YAML file, creating the directory if needed.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)
                .with_context(|| format!("Failed to create config directory: {}", self.config_dir))?;
        }

        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CopierKind;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(config_path.join("nested"));
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let settings = manager.load_settings_with_env(Some(HashMap::new())).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let (manager, _temp_dir) = create_test_config_manager();
        let settings = Settings {
            game_path: Some(Utf8PathBuf::from("/games/Valheim")),
            preserve_configs: true,
            copier: CopierKind::Robocopy,
            ..Settings::default()
        };
        manager.save_settings(&settings).unwrap();
        assert!(manager.settings_path().exists());

        let loaded = manager.load_settings_with_env(Some(HashMap::new())).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_environment_overrides_file() {
        let (manager, _temp_dir) = create_test_config_manager();
        manager
            .save_settings(&Settings {
                profile: "FromFile".to_string(),
                ..Settings::default()
            })
            .unwrap();

        let vars = HashMap::from([
            ("PROFILE_IMPORT_PROFILE".to_string(), "FromEnv".to_string()),
            ("PROFILE_IMPORT_PRESERVE_CONFIGS".to_string(), "true".to_string()),
        ]);
        let loaded = manager.load_settings_with_env(Some(vars)).unwrap();

        assert_eq!(loaded.profile, "FromEnv");
        assert!(loaded.preserve_configs);
    }
}
