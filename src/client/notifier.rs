use tracing::{error, info};

/// Where user-facing notifications (toasts) go.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes notifications to the log; useful for headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "notification", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "notification", "{}", message);
    }
}
