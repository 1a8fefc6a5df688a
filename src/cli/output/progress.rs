//! Spinner shown while a campaign run is in flight.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner on stderr with an initial message.
///
/// Hidden when stderr is not a terminal, so piped output stays clean.
pub fn create_spinner_with_message(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_CHARS),
    );

    if console::Term::stderr().is_term() {
        spinner.set_draw_target(ProgressDrawTarget::stderr());
        spinner.enable_steady_tick(Duration::from_millis(80));
    } else {
        spinner.set_draw_target(ProgressDrawTarget::hidden());
    }

    spinner.set_message(message.into());
    spinner
}

/// Spinner that never draws, for `--json` mode.
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}
