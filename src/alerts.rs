//! Desktop alert for failed runs
//!
//! The tool is usually started from a key binding or a notification daemon's
//! button handler, where stderr goes nowhere. Alerts are opt-in.

use notify_rust::{Notification, Timeout};
use tracing::warn;

const APP_NAME: &str = "notify-actions";

/// Show a failure alert.
///
/// Fire-and-forget: errors are logged but don't propagate.
pub fn alert_failure(message: &str) {
    let result = Notification::new()
        .appname(APP_NAME)
        .summary("Notification action failed")
        .body(&truncate(message, 200))
        .icon("dialog-error")
        .timeout(Timeout::Milliseconds(5000))
        .show();

    if let Err(e) = result {
        warn!("Failed to send alert: {}", e);
    }
}

fn truncate(message: &str, max_chars: usize) -> String {
    if message.chars().count() > max_chars {
        let kept: String = message.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    } else {
        message.to_string()
    }
}
