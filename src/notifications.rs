//! Desktop notifications. Only macOS is implemented.

#[cfg(target_os = "macos")]
use std::process::Command;

/// Send a notification when a task ran to zero
pub fn notify_task_completed(task_label: &str, next_label: Option<&str>) {
    #[cfg(target_os = "macos")]
    {
        let body = match next_label {
            Some(next) => format!("{} done. Up next: {}", task_label, next),
            None => format!("{} done. Queue is empty.", task_label),
        };
        let script = format!(
            r#"display notification "{}" with title "Flow - Task Completed""#,
            body.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = (task_label, next_label);
    }
}
