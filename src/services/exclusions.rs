//! Deriving the directory names that sync must skip.

use crate::models::{ExclusionSet, PackageRecord};

/// Build the exclusion set for the BepInEx pass.
///
/// `config` comes first when `preserve_config` is set, followed by the name of
/// every package with `enabled: false`, in manifest order. Enabled packages and
/// packages without an `enabled` field are never excluded. Names that are
/// blank or contain a path separator cannot be matched as a bare directory
/// name and are dropped with a warning.
pub fn build_exclusions(packages: &[PackageRecord], preserve_config: bool) -> ExclusionSet {
    let names: Vec<String> = packages
        .iter()
        .filter(|p| p.is_disabled())
        .filter_map(|p| {
            if is_valid_token(&p.name) {
                Some(p.name.clone())
            } else {
                tracing::warn!("Ignoring disabled package with unusable name {:?}", p.name);
                None
            }
        })
        .collect();

    let set = ExclusionSet::from_parts(preserve_config, names);

    tracing::info!(
        "Exclusions: {} disabled packages, preserve config: {}",
        set.package_names().len(),
        preserve_config
    );
    tracing::debug!("Exclusion tokens: {:?}", set.tokens());

    set
}

fn is_valid_token(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}
