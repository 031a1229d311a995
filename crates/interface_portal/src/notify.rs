//! Notification delivery for the operator binary

use tracing::{info, warn};

use core_kernel::{Notification, Notifier};

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_destructive() {
            warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            );
        } else {
            info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            );
        }
    }
}
