use camino::Utf8PathBuf;
use thiserror::Error;

/// A required location could not be found or is not what it should be.
///
/// These are reported with guidance on which option to supply; no copy
/// operation is attempted after one of them.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Please specify a valid r2modman path with option -r.")]
    ManagerPathNotFound,

    #[error("Please specify a valid Valheim path with option -v.")]
    GamePathNotFound,

    #[error("Profile path is invalid: {0}")]
    InvalidProfile(Utf8PathBuf),
}

/// Errors raised while loading a profile's package manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(Utf8PathBuf),

    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Errors that stop an import before or instead of a classified run.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    ManifestRead(#[from] ManifestError),

    #[error("Valheim is currently running. Please exit the game and rerun.")]
    GameRunning,
}
