//! Loading the package list from a profile's `mods.yml`.

use crate::error::ManifestError;
use crate::models::PackageRecord;
use camino::Utf8Path;
use std::fs;

/// Load the package records declared in an r2modman manifest.
///
/// The file is a YAML sequence of package mappings. Null entries and an empty
/// document are tolerated; unknown fields are ignored. An entry without a
/// `name` is a parse error.
pub fn load_packages(path: &Utf8Path) -> Result<Vec<PackageRecord>, ManifestError> {
    if !path.is_file() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let packages = parse_packages(&contents).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Loaded {} packages from {}", packages.len(), path);
    Ok(packages)
}

/// Parse manifest text. Split out so callers holding the text already can skip I/O.
pub fn parse_packages(contents: &str) -> Result<Vec<PackageRecord>, serde_yaml_ng::Error> {
    let entries: Option<Vec<Option<PackageRecord>>> = serde_yaml_ng::from_str(contents)?;

    let packages: Vec<PackageRecord> = entries.unwrap_or_default().into_iter().flatten().collect();

    tracing::debug!(
        "Parsed manifest: {} packages, {} disabled",
        packages.len(),
        packages.iter().filter(|p| p.is_disabled()).count()
    );

    Ok(packages)
}
