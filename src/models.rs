// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::constants::{DEFAULT_ENV_DIR, DEFAULT_GLOBAL_ENV_FILE};

// --- CONFIGURATION FILES (JSON) ---

/// A directory glob paired with the environment-file template it selects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub pattern: String,
    /// Relative to `envDir`. May contain the `{env}` placeholder.
    pub env_path: String,
}

/// The user-level configuration in `~/.config/rundev/config.json`.
///
/// Fields missing from the file keep their built-in defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalConfig {
    pub env_dir: String,
    pub global_env_file: String,
    pub mappings: Vec<Mapping>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            env_dir: DEFAULT_ENV_DIR.to_string(),
            global_env_file: DEFAULT_GLOBAL_ENV_FILE.to_string(),
            mappings: Vec::new(),
        }
    }
}

/// The per-project override in `<project>/.rundevrc.json`. Never written by rundev.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalConfig {
    pub env_path: Option<String>,
    pub script_filter: Option<String>,
}

/// The subset of `package.json` rundev cares about. Only the script names matter.
#[derive(Deserialize, Debug, Default)]
pub struct Manifest {
    #[serde(default)]
    pub scripts: Option<BTreeMap<String, serde_json::Value>>,
}

// --- LOADING OUTCOMES ---

/// Why a configuration layer fell back to its defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    Missing,
    Corrupt(String),
}

/// Result of reading an optional configuration file.
///
/// Loading never fails: a missing or unreadable file is reported as `Defaulted`
/// so callers can tell the two cases apart without inspecting logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    Defaulted(DefaultReason),
    Loaded(T),
}

impl<T> LoadOutcome<T> {
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }

    /// The loaded value, if the file was read successfully.
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Defaulted(_) => None,
        }
    }
}

impl<T: Default> LoadOutcome<T> {
    pub fn into_value_or_default(self) -> T {
        self.loaded().unwrap_or_default()
    }
}

// --- RESOLVED VIEW ---

/// Where the effective `envPath` template came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvPathSource {
    Local,
    Mapping { pattern: String },
}

/// The merged configuration consumed by the switcher and the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub env_dir: PathBuf,
    pub global_env_file: PathBuf,
    /// `None` means no mapping applies and environment switching is skipped.
    pub env_path: Option<String>,
    pub env_path_source: Option<EnvPathSource>,
    pub script_filter: String,
}

// --- ENVIRONMENT DETECTION ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// A `STAGE=<value>` line in the project's `.env`.
    StageLine,
    /// The `<identity>@<environment>` profile variable.
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedEnvironment {
    pub name: String,
    pub source: DetectionSource,
}

// --- PERSISTED STATE ---

/// Absolute project path → last script run there. Grows by one entry per project.
pub type ProjectState = BTreeMap<String, String>;
