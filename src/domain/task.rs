use crate::error::InputError;
use chrono::Local;
use std::fmt;
use uuid::Uuid;

/// Runtime identity of a queued task (never persisted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labeled unit of work with a fixed nominal duration
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Identity used to keep the current pointer on the same task
    pub id: TaskId,
    pub label: String,
    /// Nominal duration in seconds, always > 0
    pub duration_secs: u32,
    /// Epoch millis when the task was added, if it was added by the user
    pub start_timestamp: Option<i64>,
}

impl Task {
    /// Create a task added by the user right now
    pub fn new(label: &str, duration_secs: u32) -> Result<Self, InputError> {
        let label = validate_label(label)?;
        validate_duration(duration_secs)?;
        Ok(Self {
            id: TaskId::new(),
            label,
            duration_secs,
            start_timestamp: Some(Local::now().timestamp_millis()),
        })
    }

    /// Rebuild a task from a stored snapshot entry. Only the duration is checked,
    /// stored labels are taken as they are.
    pub fn restore(
        label: String,
        duration_secs: u32,
        start_timestamp: Option<i64>,
    ) -> Result<Self, InputError> {
        validate_duration(duration_secs)?;
        Ok(Self {
            id: TaskId::new(),
            label,
            duration_secs,
            start_timestamp,
        })
    }

    /// Format the nominal duration as "Xh Ym"
    pub fn duration_formatted(&self) -> String {
        format_duration(self.duration_secs as u64)
    }
}

pub(crate) fn validate_label(label: &str) -> Result<String, InputError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_duration(duration_secs: u32) -> Result<(), InputError> {
    if duration_secs == 0 {
        return Err(InputError::ZeroDuration);
    }
    Ok(())
}

/// Format seconds as "Xh Ym" (omits 0 values)
pub fn format_duration(secs: u64) -> String {
    let total_minutes = secs / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}
