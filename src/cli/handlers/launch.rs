// src/cli/handlers/launch.rs

//! The launcher pipeline: resolve config, switch the environment, pick a script,
//! remember it, run it.

use super::commons;
use crate::{
    cli::Cli,
    constants::{PACKAGE_MANAGER, PROFILE_ENV_VAR},
    core::{config_resolver, env_switcher, paths, script_scanner, state_store::StateStore},
    models::{DetectionSource, ResolvedConfig},
    system::{
        executor::{self, ExecutionError, ProcessRunner},
        prompt::ScriptSelector,
    },
};
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(std::io::Error),
    #[error("No scripts matching \"{filter}\" found in package.json")]
    NoMatchingScripts { filter: String },
    #[error("Script '{script}' exited with code {code}.")]
    ScriptFailed { script: String, code: i32 },
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error("User Interface Error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl LaunchError {
    /// Every failure of the pipeline exits with status 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the user has already seen the problem (the child printed it).
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::ScriptFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Completed { script: String },
    Cancelled,
}

impl LaunchOutcome {
    pub fn exit_code(&self) -> i32 {
        0
    }
}

/// Process-level inputs of the pipeline, gathered once at startup.
#[derive(Debug, Clone, Default)]
pub struct LaunchSettings {
    pub cwd: PathBuf,
    pub global_config_path: Option<PathBuf>,
    pub home: Option<String>,
    /// Value of the `<identity>@<environment>` profile variable.
    pub profile: Option<String>,
}

impl LaunchSettings {
    /// Reads the settings from the running process.
    pub fn from_process() -> Result<Self, LaunchError> {
        let cwd = env::current_dir().map_err(LaunchError::CurrentDir)?;
        Ok(Self {
            cwd: dunce::simplified(&cwd).to_path_buf(),
            global_config_path: paths::get_global_config_path().ok(),
            home: paths::home_dir_string(),
            profile: env::var(PROFILE_ENV_VAR).ok(),
        })
    }
}

fn detection_label(source: DetectionSource) -> &'static str {
    match source {
        DetectionSource::StageLine => t!("launch.source.stage_line"),
        DetectionSource::Profile => t!("launch.source.profile"),
    }
}

/// Switches the environment if one was given or can be detected. Never fatal.
fn switch_environment_step(
    requested: Option<&str>,
    settings: &LaunchSettings,
    config: &ResolvedConfig,
) {
    let env_name = match requested {
        Some(name) => Some(name.to_string()),
        None => env_switcher::detect_environment(&settings.cwd, settings.profile.as_deref()).map(
            |detected| {
                commons::info(&format!(
                    t!("launch.info.detected_env"),
                    env = detected.name,
                    source = detection_label(detected.source)
                ));
                detected.name
            },
        ),
    };

    let Some(env_name) = env_name else {
        commons::warn(t!("launch.warn.no_env"));
        return;
    };

    match env_switcher::switch_environment(&env_name, &settings.cwd, config) {
        Ok(message) => commons::success(&message),
        Err(e) => commons::warn(&e.to_string()),
    }
}

fn project_key(cwd: &Path) -> String {
    cwd.to_string_lossy().into_owned()
}

/// Main entry point of the launcher.
pub fn handle(
    cli: &Cli,
    settings: &LaunchSettings,
    state: &mut dyn StateStore,
    selector: &dyn ScriptSelector,
    runner: &dyn ProcessRunner,
) -> Result<LaunchOutcome, LaunchError> {
    commons::intro(t!("launch.intro"));

    // 1. Resolve configuration.
    let config = config_resolver::load_with(
        &settings.cwd,
        settings.global_config_path.as_deref(),
        settings.home.as_deref(),
    );

    // 2. Switch the environment file.
    switch_environment_step(cli.env.as_deref(), settings, &config);

    // 3. Find candidate scripts.
    let scripts = script_scanner::scan_scripts(&settings.cwd, &config.script_filter);
    if scripts.is_empty() {
        return Err(LaunchError::NoMatchingScripts {
            filter: config.script_filter,
        });
    }

    // 4. Decide which script to run.
    let key = project_key(&settings.cwd);
    let last_script = state.get(&key);

    let mut chosen = None;
    if cli.last {
        match &last_script {
            Some(script) => {
                commons::info(&format!(t!("launch.info.using_last"), script = script));
                chosen = Some(script.clone());
            }
            None => commons::warn(t!("launch.warn.no_last")),
        }
    }

    let script = match (chosen, scripts.as_slice()) {
        (Some(script), _) => script,
        (None, [only]) => {
            commons::info(&format!(t!("launch.info.auto_selected"), script = only));
            only.clone()
        }
        (None, _) => {
            let ordered = script_scanner::order_for_selection(&scripts, last_script.as_deref());
            match selector.select(&ordered, last_script.as_deref())? {
                Some(script) => script,
                None => {
                    commons::outro(t!("launch.outro.cancelled"));
                    return Ok(LaunchOutcome::Cancelled);
                }
            }
        }
    };

    // 5. Remember the choice before handing over the terminal.
    state.set(&key, &script);
    if let Err(e) = state.flush() {
        log::warn!("Failed to persist last script: {:#}", e);
        commons::warn(&format!(t!("launch.warn.state_not_saved"), reason = e));
    }

    // 6. Run it.
    let args = vec!["run".to_string(), script.clone()];
    commons::outro(&format!(
        t!("launch.outro.running"),
        command = executor::command_line(PACKAGE_MANAGER, &args)
    ));

    let code = runner.run(PACKAGE_MANAGER, &args, &settings.cwd)?;
    if code != 0 {
        return Err(LaunchError::ScriptFailed { script, code });
    }
    Ok(LaunchOutcome::Completed { script })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state_store::MemoryStateStore;
    use std::{cell::RefCell, fs};
    use tempfile::TempDir;

    // --- Fakes for the two collaborators ---

    struct FakeSelector {
        choice: Option<String>,
        seen: RefCell<Vec<Vec<String>>>,
    }

    impl FakeSelector {
        fn choosing(choice: Option<&str>) -> Self {
            Self {
                choice: choice.map(str::to_string),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ScriptSelector for FakeSelector {
        fn select(
            &self,
            options: &[String],
            _last_used: Option<&str>,
        ) -> Result<Option<String>, dialoguer::Error> {
            self.seen.borrow_mut().push(options.to_vec());
            Ok(self.choice.clone())
        }
    }

    struct FakeRunner {
        code: i32,
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl FakeRunner {
        fn exiting_with(code: i32) -> Self {
            Self {
                code,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, program: &str, args: &[String], _cwd: &Path) -> Result<i32, ExecutionError> {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            Ok(self.code)
        }
    }

    // --- Fixtures ---

    struct Fixture {
        home: TempDir,
        project: TempDir,
    }

    impl Fixture {
        fn with_scripts(scripts: &[&str]) -> Self {
            let home = TempDir::new().unwrap();
            let project = TempDir::new().unwrap();
            let entries: Vec<String> = scripts
                .iter()
                .map(|s| format!("\"{}\": \"echo {}\"", s, s))
                .collect();
            fs::write(
                project.path().join("package.json"),
                format!("{{ \"scripts\": {{ {} }} }}", entries.join(", ")),
            )
            .unwrap();
            Self { home, project }
        }

        fn settings(&self) -> LaunchSettings {
            LaunchSettings {
                cwd: self.project.path().to_path_buf(),
                global_config_path: Some(self.home.path().join("config.json")),
                home: Some(self.home.path().to_string_lossy().into_owned()),
                profile: None,
            }
        }

        fn key(&self) -> String {
            project_key(self.project.path())
        }
    }

    fn cli(env: Option<&str>, last: bool) -> Cli {
        Cli {
            env: env.map(str::to_string),
            last,
        }
    }

    fn run_args(script: &str) -> (String, Vec<String>) {
        ("npm".to_string(), vec!["run".to_string(), script.to_string()])
    }

    // --- Tests ---

    #[test]
    fn test_single_script_is_auto_selected_and_remembered() {
        let fx = Fixture::with_scripts(&["dev", "build"]);
        let mut state = MemoryStateStore::new();
        let selector = FakeSelector::choosing(None);
        let runner = FakeRunner::exiting_with(0);

        let outcome =
            handle(&cli(None, false), &fx.settings(), &mut state, &selector, &runner).unwrap();

        assert_eq!(outcome, LaunchOutcome::Completed { script: "dev".to_string() });
        assert!(selector.seen.borrow().is_empty());
        assert_eq!(*runner.calls.borrow(), vec![run_args("dev")]);
        assert_eq!(state.get(&fx.key()).as_deref(), Some("dev"));
    }

    #[test]
    fn test_prompt_lists_last_used_first() {
        let fx = Fixture::with_scripts(&["dev:watch", "dev", "dev:api"]);
        let mut state = MemoryStateStore::new();
        state.set(&fx.key(), "dev:watch");
        let selector = FakeSelector::choosing(Some("dev:api"));
        let runner = FakeRunner::exiting_with(0);

        let outcome =
            handle(&cli(None, false), &fx.settings(), &mut state, &selector, &runner).unwrap();

        assert_eq!(outcome, LaunchOutcome::Completed { script: "dev:api".to_string() });
        assert_eq!(
            selector.seen.borrow().first().cloned().unwrap(),
            vec!["dev:watch", "dev", "dev:api"]
        );
        assert_eq!(state.get(&fx.key()).as_deref(), Some("dev:api"));
    }

    #[test]
    fn test_cancel_exits_cleanly_without_running() {
        let fx = Fixture::with_scripts(&["dev", "dev:api"]);
        let mut state = MemoryStateStore::new();
        let selector = FakeSelector::choosing(None);
        let runner = FakeRunner::exiting_with(0);

        let outcome =
            handle(&cli(None, false), &fx.settings(), &mut state, &selector, &runner).unwrap();

        assert_eq!(outcome, LaunchOutcome::Cancelled);
        assert_eq!(outcome.exit_code(), 0);
        assert!(runner.calls.borrow().is_empty());
        assert_eq!(state.get(&fx.key()), None);
    }

    #[test]
    fn test_last_flag_reuses_saved_script_without_prompt() {
        let fx = Fixture::with_scripts(&["dev", "dev:api"]);
        let mut state = MemoryStateStore::new();
        state.set(&fx.key(), "dev:api");
        let selector = FakeSelector::choosing(Some("dev"));
        let runner = FakeRunner::exiting_with(0);

        handle(&cli(None, true), &fx.settings(), &mut state, &selector, &runner).unwrap();

        assert!(selector.seen.borrow().is_empty());
        assert_eq!(*runner.calls.borrow(), vec![run_args("dev:api")]);
    }

    #[test]
    fn test_last_flag_without_saved_script_falls_through_to_prompt() {
        let fx = Fixture::with_scripts(&["dev", "dev:api"]);
        let mut state = MemoryStateStore::new();
        let selector = FakeSelector::choosing(Some("dev"));
        let runner = FakeRunner::exiting_with(0);

        handle(&cli(None, true), &fx.settings(), &mut state, &selector, &runner).unwrap();

        assert_eq!(selector.seen.borrow().len(), 1);
        assert_eq!(*runner.calls.borrow(), vec![run_args("dev")]);
    }

    #[test]
    fn test_no_matching_scripts_is_fatal() {
        let fx = Fixture::with_scripts(&["build", "predev"]);
        let mut state = MemoryStateStore::new();
        let selector = FakeSelector::choosing(None);
        let runner = FakeRunner::exiting_with(0);

        let err = handle(&cli(None, false), &fx.settings(), &mut state, &selector, &runner)
            .unwrap_err();

        assert!(matches!(&err, LaunchError::NoMatchingScripts { filter } if filter == "dev*"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "No scripts matching \"dev*\" found in package.json");
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_non_zero_exit_maps_to_failure() {
        let fx = Fixture::with_scripts(&["dev"]);
        let mut state = MemoryStateStore::new();
        let selector = FakeSelector::choosing(None);
        let runner = FakeRunner::exiting_with(2);

        let err = handle(&cli(None, false), &fx.settings(), &mut state, &selector, &runner)
            .unwrap_err();

        assert!(matches!(err, LaunchError::ScriptFailed { code: 2, .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(err.is_reported());
        // The choice was saved before the script ran.
        assert_eq!(state.get(&fx.key()).as_deref(), Some("dev"));
    }

    #[test]
    fn test_explicit_environment_is_switched() {
        let fx = Fixture::with_scripts(&["dev"]);
        let envs = fx.home.path().join("envs");
        fs::create_dir_all(envs.join("app")).unwrap();
        fs::write(envs.join("app/staging.env"), "A=1").unwrap();
        fs::write(envs.join("global"), "B=2").unwrap();
        let config = serde_json::json!({
            "envDir": envs,
            "globalEnvFile": envs.join("global"),
            "mappings": [{ "pattern": "**", "envPath": "app/{env}.env" }],
        });
        fs::write(fx.home.path().join("config.json"), config.to_string()).unwrap();

        let mut state = MemoryStateStore::new();
        handle(
            &cli(Some("staging"), false),
            &fx.settings(),
            &mut state,
            &FakeSelector::choosing(None),
            &FakeRunner::exiting_with(0),
        )
        .unwrap();

        let written = fs::read_to_string(fx.project.path().join(".env")).unwrap();
        assert_eq!(written, "A=1\nB=2");
    }

    #[test]
    fn test_failed_switch_does_not_stop_the_pipeline() {
        let fx = Fixture::with_scripts(&["dev"]);
        let mut settings = fx.settings();
        settings.profile = Some("alice@prod".to_string());
        let mut state = MemoryStateStore::new();
        let runner = FakeRunner::exiting_with(0);

        // No global config: no mapping, so the detected environment cannot be switched.
        let outcome = handle(
            &cli(None, false),
            &settings,
            &mut state,
            &FakeSelector::choosing(None),
            &runner,
        )
        .unwrap();

        assert_eq!(outcome, LaunchOutcome::Completed { script: "dev".to_string() });
        assert!(!fx.project.path().join(".env").exists());
        assert_eq!(runner.calls.borrow().len(), 1);
    }
}
