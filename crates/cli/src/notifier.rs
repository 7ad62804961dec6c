use tracing::warn;

use ticketview_core::Notifier;

/// Surfaces notifications on stderr, and in the log.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        warn!("User notification: {}", message);
        eprintln!("{}", message);
    }
}
