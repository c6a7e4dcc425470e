//! # Configuration Resolver
//!
//! Merges the user-level `config.json` with an optional `.rundevrc.json` at the
//! project root into a single [`ResolvedConfig`].
//!
//! Loading is best-effort: a missing or corrupt file
//! never stops the launcher, it is reported as [`LoadOutcome::Defaulted`] instead.
//! Resolution itself ([`resolve`]) is a pure function of its inputs.

use crate::{
    constants::{DEFAULT_SCRIPT_FILTER, LOCAL_CONFIG_FILENAME},
    core::{commons, paths, pattern},
    models::{
        DefaultReason, EnvPathSource, GlobalConfig, LoadOutcome, LocalConfig, Mapping,
        ResolvedConfig,
    },
};
use std::path::{Path, PathBuf};

/// Loads the global configuration file at `path`.
pub fn load_global_config(path: &Path) -> LoadOutcome<GlobalConfig> {
    commons::load_json_file(path)
}

/// Loads `<cwd>/.rundevrc.json`.
pub fn load_local_config(cwd: &Path) -> LoadOutcome<LocalConfig> {
    commons::load_json_file(&cwd.join(LOCAL_CONFIG_FILENAME))
}

/// Returns the first mapping, in declaration order, whose pattern matches `cwd`.
pub fn find_matching_mapping<'a>(mappings: &'a [Mapping], cwd: &Path) -> Option<&'a Mapping> {
    let subject = paths::to_pattern_subject(cwd);
    mappings
        .iter()
        .find(|mapping| pattern::matches_directory(&mapping.pattern, &subject))
}

/// Expands a leading `~` against `home`. Without a home directory the value is kept as is.
fn expand_home(value: &str, home: Option<&str>) -> PathBuf {
    PathBuf::from(shellexpand::tilde_with_context(value, || home).into_owned())
}

/// Merges the two layers. The local `envPath` wins over any matching mapping.
pub fn resolve(
    global: &GlobalConfig,
    local: Option<&LocalConfig>,
    cwd: &Path,
    home: Option<&str>,
) -> ResolvedConfig {
    let local_env_path = local
        .and_then(|l| l.env_path.as_deref())
        .filter(|p| !p.is_empty());

    let (env_path, env_path_source) = match local_env_path {
        Some(path) => (Some(path.to_string()), Some(EnvPathSource::Local)),
        None => match find_matching_mapping(&global.mappings, cwd) {
            Some(mapping) => (
                Some(mapping.env_path.clone()),
                Some(EnvPathSource::Mapping {
                    pattern: mapping.pattern.clone(),
                }),
            ),
            None => (None, None),
        },
    };

    log::debug!(
        "Resolved envPath for '{}': {:?} (source: {:?})",
        cwd.display(),
        env_path,
        env_path_source
    );

    ResolvedConfig {
        env_dir: expand_home(&global.env_dir, home),
        global_env_file: expand_home(&global.global_env_file, home),
        env_path,
        env_path_source,
        script_filter: local
            .and_then(|l| l.script_filter.clone())
            .unwrap_or_else(|| DEFAULT_SCRIPT_FILTER.to_string()),
    }
}

/// Loads both layers from explicit locations and resolves them.
pub fn load_with(cwd: &Path, global_config_path: Option<&Path>, home: Option<&str>) -> ResolvedConfig {
    let global_outcome = match global_config_path {
        Some(path) => load_global_config(path),
        None => LoadOutcome::Defaulted(DefaultReason::Missing),
    };
    if global_outcome.is_defaulted() {
        log::debug!("Using built-in global defaults: {:?}", global_outcome);
    }
    let global = global_outcome.into_value_or_default();
    let local = load_local_config(cwd).loaded();

    resolve(&global, local.as_ref(), cwd, home)
}

/// Loads the configuration for `cwd` from the standard locations.
pub fn load(cwd: &Path) -> ResolvedConfig {
    let global_path = paths::get_global_config_path().ok();
    let home = paths::home_dir_string();
    load_with(cwd, global_path.as_deref(), home.as_deref())
}
