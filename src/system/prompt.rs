// src/system/prompt.rs

use dialoguer::{Select, theme::ColorfulTheme};

/// Asks the user to pick one of the candidate scripts.
pub trait ScriptSelector {
    /// Presents `options` in the given order. `Ok(None)` means the user cancelled.
    fn select(
        &self,
        options: &[String],
        last_used: Option<&str>,
    ) -> Result<Option<String>, dialoguer::Error>;
}

/// Interactive terminal selector. `Esc` or `q` cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerSelector;

fn option_label(script: &str, last_used: Option<&str>) -> String {
    if last_used == Some(script) {
        format!(t!("prompt.last_used_label"), script = script)
    } else {
        script.to_string()
    }
}

impl ScriptSelector for DialoguerSelector {
    fn select(
        &self,
        options: &[String],
        last_used: Option<&str>,
    ) -> Result<Option<String>, dialoguer::Error> {
        let labels: Vec<String> = options
            .iter()
            .map(|script| option_label(script, last_used))
            .collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("prompt.select_script"))
            .items(&labels)
            .default(0)
            .interact_opt()?;

        Ok(selection.and_then(|idx| options.get(idx).cloned()))
    }
}
