//! Keepsake CLI - browse Drive photo folders and keep an encrypted file
//! vault.
//!
//! This is the command-line interface for Keepsake. It provides a
//! user-friendly surface over the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod output;
mod ui;

use clap::Parser;

use keepsake_core::{KeepsakeError, VERSION};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{gallery, misc, vault};
use crate::ui::{print_cancelled, print_error, UiContext};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ui = UiContext::from_env();

    let ctx = match AppContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            print_error(&ui, &format!("{:#}", e), None);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&ctx, &ui, &cli) {
        if matches!(e.downcast_ref::<KeepsakeError>(), Some(KeepsakeError::Cancelled)) {
            print_cancelled(&ui, "Operation");
            std::process::exit(1);
        }

        let error_msg = format!("{:#}", e);
        let hint = extract_error_hint(&error_msg);
        print_error(&ui, &error_msg, hint.as_deref());
        std::process::exit(1);
    }
}

/// Route diagnostic traces to stderr; silent unless KEEPSAKE_LOG is set.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("KEEPSAKE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Provide contextual hints for common error messages.
fn extract_error_hint(error: &str) -> Option<String> {
    if let Some(idx) = error.find("\nHint:") {
        return Some(error[idx + 1..].to_string());
    }

    let error_lower = error.to_lowercase();

    // Wrong or missing passphrase
    if error_lower.contains("incorrect passphrase") {
        return Some(
            "Hint: Check your passphrase. Set KEEPSAKE_PASSPHRASE to skip the prompt.".to_string(),
        );
    }

    // Rejected or stale credential
    if error_lower.contains("http 401")
        || error_lower.contains("http 403")
        || error_lower.contains("expired")
    {
        return Some(
            "Hint: The access token was rejected. Re-run your OAuth helper or pass a fresh \
             --token."
                .to_string(),
        );
    }

    // Name resolution failures
    if error_lower.contains("no folder named") {
        return Some("Hint: Run `keepsake folders` to see folder names.".to_string());
    }
    if error_lower.contains("no image named") {
        return Some("Hint: Run `keepsake images <folder>` to see image names.".to_string());
    }
    if error_lower.contains("no stored file named") {
        return Some("Hint: Run `keepsake files` to see the vault contents.".to_string());
    }

    // Malformed or foreign payloads
    if error_lower.contains("malformed payload") {
        return Some(
            "Hint: The stored object is not a Keepsake payload; it may have been uploaded by \
             another tool."
                .to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, ui: &UiContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Folders(args)) => {
            gallery::handle_folders(ctx, ui, args)?;
        }
        Some(Commands::Images(args)) => {
            gallery::handle_images(ctx, ui, args)?;
        }
        Some(Commands::Fetch(args)) => {
            gallery::handle_fetch(ctx, ui, args)?;
        }
        Some(Commands::Delete(args)) => {
            gallery::handle_delete(ctx, ui, args)?;
        }
        Some(Commands::Favorite(args)) => {
            gallery::handle_favorite(ctx, ui, args)?;
        }
        Some(Commands::Put(args)) => {
            vault::handle_put(ctx, ui, args)?;
        }
        Some(Commands::Get(args)) => {
            vault::handle_get(ctx, ui, args)?;
        }
        Some(Commands::Files(args)) => {
            vault::handle_files(ctx, ui, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Keepsake v{}", VERSION);
            println!("\nQuickstart:");
            println!("  keepsake folders");
            println!("  keepsake images <folder>");
            println!("  keepsake fetch <folder> <image>");
            println!("  keepsake put <file>");
            println!("  keepsake get <file>");
            println!("\nRun `keepsake --help` for full usage.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_for_incorrect_passphrase() {
        let hint = extract_error_hint("Incorrect passphrase").expect("hint");
        assert!(hint.contains("KEEPSAKE_PASSPHRASE"));
    }

    #[test]
    fn test_hint_for_rejected_token() {
        let hint = extract_error_hint("Remote store error: List failed with HTTP 401 Unauthorized")
            .expect("hint");
        assert!(hint.contains("OAuth"));
    }

    #[test]
    fn test_hint_for_unknown_folder() {
        let hint = extract_error_hint("Not found: No folder named 'Trip'").expect("hint");
        assert!(hint.contains("keepsake folders"));
    }

    #[test]
    fn test_explicit_hint_is_passed_through() {
        let hint = extract_error_hint("Something failed\nHint: do the thing").expect("hint");
        assert_eq!(hint, "Hint: do the thing");
    }

    #[test]
    fn test_no_hint_for_unknown_error() {
        assert!(extract_error_hint("some unrelated failure").is_none());
    }
}
