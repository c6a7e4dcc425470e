// src/bin/rundev.rs

use clap::Parser;
use rundev::{
    cli::{
        Cli,
        handlers::{
            commons,
            launch::{self, LaunchError, LaunchOutcome, LaunchSettings},
        },
    },
    core::{
        paths,
        state_store::{FileStateStore, MemoryStateStore, StateStore},
    },
    system::{executor::SystemRunner, prompt::DialoguerSelector},
};

/// The main entry point of the `rundev` application.
/// It sets up logging, parses arguments, runs the launcher,
/// and maps the outcome to the process exit code.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    let code = match run_cli(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            // A failing script has already spoken through the inherited terminal.
            if !e.is_reported() {
                commons::error(rundev::t!("main.error.label"), &e.to_string());
            }
            e.exit_code()
        }
    };
    std::process::exit(code);
}

/// Opens the persisted last-script record, or an in-memory one if there is no
/// place to keep it.
fn open_state_store() -> Box<dyn StateStore> {
    match paths::get_state_path() {
        Ok(path) => Box::new(FileStateStore::open(path)),
        Err(e) => {
            commons::warn(&format!(
                rundev::t!("main.warn.memory_state"),
                reason = e
            ));
            Box::new(MemoryStateStore::new())
        }
    }
}

fn run_cli(cli: &Cli) -> Result<LaunchOutcome, LaunchError> {
    let settings = LaunchSettings::from_process()?;
    let mut state = open_state_store();

    launch::handle(
        cli,
        &settings,
        state.as_mut(),
        &DialoguerSelector,
        &SystemRunner,
    )
}
