// src/system/executor.rs

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' was terminated before it could finish.")]
    Interrupted(String),
}

/// Runs a program as a child process attached to the user's terminal.
pub trait ProcessRunner {
    /// Runs `program` with `args` in `cwd` and returns its exit code.
    /// Returns once the child has finished.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<i32, ExecutionError>;
}

/// Renders a program and its arguments the way the user would type them.
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The real process runner, inheriting stdin, stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn spawn_and_wait(
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> std::io::Result<ExitStatus> {
        StdCommand::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<i32, ExecutionError> {
        if program.trim().is_empty() {
            return Err(ExecutionError::EmptyCommand);
        }

        let full_command = command_line(program, args);
        let clean_cwd = dunce::simplified(cwd);
        log::debug!("Running '{}' in '{}'", full_command, clean_cwd.display());

        // On Windows, package managers are `.cmd` shims that cannot be spawned
        // directly. If that fails with `NotFound`, go through `cmd /C`.
        let status = match Self::spawn_and_wait(program, args, clean_cwd) {
            Ok(status) => status,
            Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
                log::debug!("Command '{}' not found. Retrying with cmd /C.", program);
                let mut shell_args = vec!["/C".to_string(), program.to_string()];
                shell_args.extend(args.iter().cloned());
                Self::spawn_and_wait("cmd", &shell_args, clean_cwd)
                    .map_err(|e| ExecutionError::CommandFailed(full_command.clone(), e))?
            }
            Err(e) => return Err(ExecutionError::CommandFailed(full_command, e)),
        };

        // No exit code means the child was killed by a signal.
        status
            .code()
            .ok_or(ExecutionError::Interrupted(full_command))
    }
}
