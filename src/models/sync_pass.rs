use std::fmt;

/// Name of the BepInEx subtree in both the profile and the game directory.
pub const BEPINEX_DIR: &str = "BepInEx";

/// Name of the doorstop loader subtree.
pub const DOORSTOP_LIBS_DIR: &str = "doorstop_libs";

/// Name of the unstripped Unity corlib subtree.
pub const UNSTRIPPED_CORLIB_DIR: &str = "unstripped_corlib";

/// Directory (under `BepInEx`) skipped when configs are preserved.
pub const CONFIG_DIR: &str = "config";

/// Directory (under `BepInEx`) holding one folder per installed plugin.
pub const PLUGINS_DIR: &str = "plugins";

/// How a pass treats destination content that the source does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Destination becomes an exact copy of the source, extras are deleted.
    Mirror,
    /// Missing or changed content is copied, nothing is deleted.
    Merge,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Mirror => write!(f, "mirror"),
            SyncMode::Merge => write!(f, "merge"),
        }
    }
}

/// Identifies which of the four fixed passes a [`SyncPass`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    Root,
    BepInEx,
    DoorstopLibs,
    UnstrippedCorlib,
}

impl PassKind {
    /// Subdirectory name shared by source and destination, empty for the root.
    pub fn subpath(self) -> &'static str {
        match self {
            PassKind::Root => "",
            PassKind::BepInEx => BEPINEX_DIR,
            PassKind::DoorstopLibs => DOORSTOP_LIBS_DIR,
            PassKind::UnstrippedCorlib => UNSTRIPPED_CORLIB_DIR,
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Root => write!(f, "profile root"),
            other => write!(f, "{}", other.subpath()),
        }
    }
}

/// Ordered list of bare directory names that sync must not touch.
///
/// Built once per run by
/// [`build_exclusions`](crate::services::exclusions::build_exclusions). The
/// configuration token, when present, always comes first; the disabled
/// package names follow in manifest order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    tokens: Vec<String>,
    packages_start: usize,
}

impl ExclusionSet {
    pub(crate) fn from_parts(preserve_config: bool, package_names: Vec<String>) -> Self {
        let mut tokens = Vec::with_capacity(package_names.len() + 1);
        if preserve_config {
            tokens.push(CONFIG_DIR.to_string());
        }
        let packages_start = tokens.len();
        tokens.extend(package_names);
        Self {
            tokens,
            packages_start,
        }
    }

    /// Every token, in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Only the disabled package names, which are also the prune targets.
    pub fn package_names(&self) -> &[String] {
        &self.tokens[self.packages_start..]
    }

    pub fn preserves_config(&self) -> bool {
        self.packages_start > 0
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// One subtree synchronization operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPass {
    pub kind: PassKind,
    pub source_subpath: String,
    pub dest_subpath: String,
    pub mode: SyncMode,
    pub exclusions: Vec<String>,
    pub copy_subdirectories: bool,
}

impl SyncPass {
    /// Top-level profile files merged into the game root. The three component
    /// subtrees are excluded so they are only handled by their own passes.
    pub fn root() -> Self {
        Self {
            kind: PassKind::Root,
            source_subpath: String::new(),
            dest_subpath: String::new(),
            mode: SyncMode::Merge,
            exclusions: vec![
                BEPINEX_DIR.to_string(),
                DOORSTOP_LIBS_DIR.to_string(),
                UNSTRIPPED_CORLIB_DIR.to_string(),
            ],
            copy_subdirectories: false,
        }
    }

    /// Mirror of a component subtree with the given exclusions.
    pub fn mirror(kind: PassKind, exclusions: Vec<String>) -> Self {
        Self {
            kind,
            source_subpath: kind.subpath().to_string(),
            dest_subpath: kind.subpath().to_string(),
            mode: SyncMode::Mirror,
            exclusions,
            copy_subdirectories: true,
        }
    }

    /// The four passes of an import, in the order they must run.
    pub fn standard_passes(exclusions: &ExclusionSet) -> Vec<SyncPass> {
        vec![
            SyncPass::root(),
            SyncPass::mirror(PassKind::BepInEx, exclusions.tokens().to_vec()),
            SyncPass::mirror(PassKind::DoorstopLibs, Vec::new()),
            SyncPass::mirror(PassKind::UnstrippedCorlib, Vec::new()),
        ]
    }

    pub fn is_root(&self) -> bool {
        self.kind == PassKind::Root
    }
}
