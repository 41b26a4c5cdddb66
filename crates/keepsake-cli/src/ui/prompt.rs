//! Interactive prompts.
//!
//! Passphrases come from `KEEPSAKE_PASSPHRASE` or an interactive prompt.
//! Declining to enter one (empty input) maps to
//! `KeepsakeError::Cancelled` so callers abort the operation cleanly.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm, Password};

use keepsake_core::KeepsakeError;

/// Resolve a passphrase for an encryption or decryption operation.
///
/// `confirm` asks for the passphrase twice (used when encrypting, where
/// a typo would lock the file forever).
pub fn resolve_passphrase(confirm: bool) -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("KEEPSAKE_PASSPHRASE") {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }

    prompt_passphrase(confirm)
}

/// Prompt for a passphrase on the terminal.
pub fn prompt_passphrase(confirm: bool) -> anyhow::Result<String> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive passphrase input required. Set KEEPSAKE_PASSPHRASE or run on a TTY."
        ));
    }

    let theme = ColorfulTheme::default();
    let builder = Password::with_theme(&theme)
        .with_prompt("Passphrase")
        .allow_empty_password(true);

    let passphrase = if confirm {
        builder
            .with_confirmation("Confirm passphrase", "Passphrases do not match")
            .interact()?
    } else {
        builder.interact()?
    };

    if passphrase.trim().is_empty() {
        return Err(KeepsakeError::Cancelled.into());
    }

    Ok(passphrase)
}

/// Prompt for confirmation.
pub fn prompt_confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Interactive confirmation required. Use --yes or run on a TTY."
        ));
    }

    let theme = ColorfulTheme::default();
    let result = Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?;

    Ok(result)
}
