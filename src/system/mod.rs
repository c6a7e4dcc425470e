//! # System Interaction Layer
//!
//! The two external collaborators of the launcher, each behind a narrow trait so the
//! pipeline can run against fakes.
//!
//! ## Modules
//!
//! - **`executor`**: spawns the selected script with the user's terminal attached and
//!   reports its exit code. Falls back to `cmd /C` on Windows.
//! - **`prompt`**: the interactive script picker, built on `dialoguer`.

pub mod executor;
pub mod prompt;
