// src/constants.rs

/// The name of the directory holding rundev's own files (inside `~/.config/`).
pub const APP_DIR_NAME: &str = "rundev";

/// Overrides the location of rundev's configuration directory when set.
pub const CONFIG_DIR_ENV_VAR: &str = "RUNDEV_CONFIG_DIR";

/// The name of the global configuration file (in `~/.config/rundev/`).
pub const GLOBAL_CONFIG_FILENAME: &str = "config.json";

/// The name of the last-script record (in `~/.config/rundev/`).
pub const STATE_FILENAME: &str = "state.json";

/// The name of the optional per-project override file at the project root.
pub const LOCAL_CONFIG_FILENAME: &str = ".rundevrc.json";

/// The project manifest whose `scripts` table is scanned.
pub const MANIFEST_FILENAME: &str = "package.json";

/// The project-local environment file that gets switched.
pub const ENV_FILENAME: &str = ".env";

/// Placeholder substituted with the environment name inside an `envPath` template.
pub const ENV_PLACEHOLDER: &str = "{env}";

/// Process variable shaped like `<identity>@<environment>`.
pub const PROFILE_ENV_VAR: &str = "AWS_PROFILE";

/// Filter applied to script names when no local config sets one.
pub const DEFAULT_SCRIPT_FILTER: &str = "dev*";

/// Script that is always listed first when it matches the filter.
pub const PRIMARY_SCRIPT: &str = "dev";

/// Base directory for environment files when the global config sets none.
pub const DEFAULT_ENV_DIR: &str = "~/.config/env";
/// File appended to every switched `.env` when the global config sets none.
pub const DEFAULT_GLOBAL_ENV_FILE: &str = "~/.config/env/global";

/// Package manager used to launch the selected script.
pub const PACKAGE_MANAGER: &str = "npm";
