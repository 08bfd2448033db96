use serde::{Deserialize, Serialize};

/// One declared package from a profile's `mods.yml`.
///
/// r2modman writes many more fields per entry (author, version, icon, ...);
/// only the two that drive exclusion are kept, everything else is ignored on
/// load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,

    /// `None` when the manifest entry has no `enabled` field (or it is null).
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, enabled: Option<bool>) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    /// True only for an explicit `enabled: false`.
    ///
    /// A missing or null `enabled` reads as enabled. Readers that default the
    /// field to `false` would exclude those entries instead; this one keeps
    /// them, so a manifest without the field imports every package.
    pub fn is_disabled(&self) -> bool {
        self.enabled == Some(false)
    }
}
