/// User-facing prompts raised by dashboard actions.
pub trait Notifier: Send + Sync {
    /// Blocking message the user must acknowledge.
    fn alert(&self, message: &str);

    /// Ask before a destructive action. `false` cancels it.
    fn confirm(&self, prompt: &str) -> bool;
}
