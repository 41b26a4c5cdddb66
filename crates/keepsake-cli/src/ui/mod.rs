//! UI primitives for the Keepsake CLI.
//!
//! - **Context**: Environment detection (TTY, color, unicode)
//! - **Progress**: Spinners for remote operations
//! - **Prompt**: Passphrase and confirmation prompts

mod context;
pub mod progress;
pub mod prompt;

pub use context::UiContext;
pub use progress::Spinner;

use owo_colors::OwoColorize;

/// Print an error as a single blocking notification, with an optional
/// follow-up hint.
pub fn print_error(ctx: &UiContext, message: &str, hint: Option<&str>) {
    if ctx.color {
        eprintln!("{} {}", "error:".red().bold(), message);
    } else {
        eprintln!("error: {}", message);
    }
    if let Some(hint) = hint {
        if ctx.color {
            eprintln!("{}", hint.dimmed());
        } else {
            eprintln!("{}", hint);
        }
    }
}

/// Print a success line.
pub fn print_success(ctx: &UiContext, message: &str) {
    let mark = if ctx.unicode { "\u{2713}" } else { "[OK]" };
    if ctx.color {
        println!("{} {}", mark.green(), message);
    } else {
        println!("{} {}", mark, message);
    }
}

/// Print a cancellation notice.
pub fn print_cancelled(ctx: &UiContext, action: &str) {
    let mark = if ctx.unicode { "\u{26A0}" } else { "[WARN]" };
    if ctx.color {
        println!("{} {} cancelled", mark.yellow(), action);
    } else {
        println!("{} {} cancelled", mark, action);
    }
}
