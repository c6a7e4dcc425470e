//! # Environment Switcher
//!
//! Detects which deployment environment a project is in and copies the matching
//! environment file over the project's `.env`.

use crate::{
    constants::{ENV_FILENAME, ENV_PLACEHOLDER, PROFILE_ENV_VAR},
    models::{DetectedEnvironment, DetectionSource, ResolvedConfig},
};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    env, fs,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;

lazy_static! {
    // First `STAGE=` line of a dotenv file. The value is trimmed afterwards (CRLF files).
    static ref STAGE_LINE_RE: Regex =
        Regex::new(r"(?m)^STAGE=(.+)$").expect("STAGE line regex is valid");
}

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("No environment path mapping found for this directory")]
    NoMapping,
    #[error("Environment file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },
    #[error("Failed to switch environment: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Extracts the value of the first `STAGE=` line. A blank value counts as absent,
/// so detection moves on to the profile variable.
pub fn stage_from_env_content(content: &str) -> Option<String> {
    STAGE_LINE_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|stage| !stage.is_empty())
}

/// Extracts `<environment>` from a profile shaped like `<identity>@<environment>`.
pub fn environment_from_profile(profile: &str) -> Option<String> {
    profile
        .split_once('@')
        .map(|(_, env)| env.to_string())
        .filter(|env| !env.is_empty())
}

/// Detects the environment from `<cwd>/.env`, then from `profile`.
///
/// Returns `None` when neither source names one; that is an expected outcome.
pub fn detect_environment(cwd: &Path, profile: Option<&str>) -> Option<DetectedEnvironment> {
    let env_file = cwd.join(ENV_FILENAME);
    match fs::read_to_string(&env_file) {
        Ok(content) => {
            if let Some(name) = stage_from_env_content(&content) {
                return Some(DetectedEnvironment {
                    name,
                    source: DetectionSource::StageLine,
                });
            }
        }
        Err(e) => log::debug!("No readable '{}': {}", env_file.display(), e),
    }

    profile
        .and_then(environment_from_profile)
        .map(|name| DetectedEnvironment {
            name,
            source: DetectionSource::Profile,
        })
}

/// [`detect_environment`] using the `AWS_PROFILE` variable of this process.
pub fn detect(cwd: &Path) -> Option<DetectedEnvironment> {
    let profile = env::var(PROFILE_ENV_VAR).ok();
    detect_environment(cwd, profile.as_deref())
}

/// Resolves the source environment file for `env`, if a template is configured.
///
/// Every `{env}` placeholder in the template is substituted.
pub fn source_env_file(env: &str, config: &ResolvedConfig) -> Option<PathBuf> {
    config
        .env_path
        .as_deref()
        .map(|template| config.env_dir.join(template.replace(ENV_PLACEHOLDER, env)))
}

/// Copies the environment file for `env` over `<cwd>/.env` and appends the global
/// env file when it exists.
///
/// Nothing is written unless the source file exists and the global file (if any)
/// could be read. On success, returns the status line to show the user.
pub fn switch_environment(
    env: &str,
    cwd: &Path,
    config: &ResolvedConfig,
) -> Result<String, SwitchError> {
    let source = source_env_file(env, config).ok_or(SwitchError::NoMapping)?;
    if !source.is_file() {
        return Err(SwitchError::SourceNotFound { path: source });
    }

    let global_content = if config.global_env_file.is_file() {
        Some(fs::read(&config.global_env_file)?)
    } else {
        log::debug!(
            "Global env file '{}' not present; nothing to append.",
            config.global_env_file.display()
        );
        None
    };

    let target = cwd.join(ENV_FILENAME);
    log::debug!("Copying '{}' -> '{}'", source.display(), target.display());
    fs::copy(&source, &target)?;

    if let Some(content) = global_content {
        let mut file = OpenOptions::new().append(true).open(&target)?;
        file.write_all(b"\n")?;
        file.write_all(&content)?;
    }

    Ok(format!(t!("switch.success"), env = env))
}
