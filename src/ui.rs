// UI layer: small terminal helpers built on `indicatif` and `dialoguer`.
// Both draw on stderr so that stdout only carries command output.

use anyhow::Result;
use dialoguer::{Confirm, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a spinner with `message`. It ticks on its own until the caller
/// clears it with `finish_and_clear`; nothing is drawn when stderr is not
/// a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run `f` while a spinner with `message` is shown.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = spinner(message);
    let out = f();
    spinner.finish_and_clear();
    out
}

/// Ask for an API key with hidden input. When a key is already stored the
/// user must confirm replacing it; `None` means they declined.
pub fn prompt_api_key(has_existing: bool) -> Result<Option<String>> {
    if has_existing {
        let replace = Confirm::new()
            .with_prompt("An API key is already configured. Replace it?")
            .default(false)
            .interact()?;
        if !replace {
            return Ok(None);
        }
    }
    // `Password` hides input in terminal.
    let key: String = Password::new().with_prompt("Thoth API key").interact()?;
    let key = key.trim().to_string();
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    Ok(Some(key))
}
