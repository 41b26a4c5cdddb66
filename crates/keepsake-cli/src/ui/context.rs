//! UI context for environment detection.

use std::io::IsTerminal;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
}

impl UiContext {
    /// Create context from the environment.
    ///
    /// Color is disabled for non-TTY output, `NO_COLOR`, or `TERM=dumb`.
    pub fn from_env() -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color = std::env::var("NO_COLOR").is_ok();

        Self {
            is_tty,
            color: is_tty && !no_color && !term_is_dumb,
            unicode: !term_is_dumb,
        }
    }

    /// Check if animations (spinners) are allowed.
    pub fn allows_animation(&self) -> bool {
        self.is_tty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_does_not_panic() {
        let ctx = UiContext::from_env();
        // Non-TTY test runners must never claim color support.
        if !ctx.is_tty {
            assert!(!ctx.color);
        }
    }
}
