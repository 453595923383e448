//! Transient user-facing notifications.
//!
//! One channel covers both warnings and errors, matching the toast the
//! dashboard shows. The terminal implementation prints to stderr; tests
//! substitute a recording notifier.

/// Shows a transient message to the user.
pub trait Notifier {
    fn show(&mut self, title: &str, description: &str);
}

/// Prints notifications to stderr as `title: description`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn show(&mut self, title: &str, description: &str) {
        eprintln!("{}: {}", title, description);
    }
}
