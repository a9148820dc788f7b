//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Password};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm replacing an existing output file
pub fn confirm_overwrite(path: &std::path::Path) -> Result<bool> {
    let message = format!("{} already exists. Overwrite it?", path.display());
    confirm_step(&message)
}

/// Prompt for a new master password without echo, asking twice
pub fn prompt_master_password() -> Result<String> {
    let password = Password::new()
        .with_prompt("Enter a new master password for the KeePass database")
        .with_confirmation("Repeat the master password", "Passwords do not match")
        .allow_empty_password(false)
        .interact()?;
    Ok(password)
}
