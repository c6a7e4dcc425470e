use clap::Parser;

pub mod handlers;

/// rundev: smart dev server launcher with environment switching.
///
/// Copies the environment file mapped to the current directory into `.env`,
/// then runs one of the project's `dev*` scripts, remembering the choice.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about,
    long_about = None,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Environment name (e.g., staging, production). Detected from `.env` or
    /// `AWS_PROFILE` when omitted.
    pub env: Option<String>,

    /// Run the last used script without prompting.
    #[arg(long, short)]
    pub last: bool,
}
