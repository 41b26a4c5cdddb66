//! Progress indicators for long-running operations using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

/// A spinner for indeterminate progress (uploads, downloads, listings).
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create and start a spinner. On non-TTY output nothing is drawn.
    pub fn new(ctx: &UiContext, message: &str) -> Self {
        let bar = if ctx.allows_animation() {
            let pb = ProgressBar::new_spinner();
            let template = if ctx.unicode {
                "{spinner:.cyan} {msg}..."
            } else {
                "{spinner} {msg}..."
            };
            if let Ok(style) = ProgressStyle::default_spinner().template(template) {
                pb.set_style(style);
            }
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(80));
            Some(pb)
        } else {
            None
        };

        Self { bar }
    }

    /// Stop and clear the spinner.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}
