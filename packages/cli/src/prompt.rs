use client::Notifier;
use console::style;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;

/// Alerts printed to stderr, confirmations asked on the terminal.
pub struct TerminalNotifier {
    theme: ColorfulTheme,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {message}", style("!").yellow().bold());
    }

    fn confirm(&self, prompt: &str) -> bool {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
