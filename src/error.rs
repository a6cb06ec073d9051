use thiserror::Error;

/// Rejected user input. The session controller logs these and keeps its prior state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("task label is empty")]
    EmptyLabel,

    #[error("duration must be a positive whole number of minutes, got {0:?}")]
    InvalidMinutes(String),

    #[error("duration must be positive")]
    ZeroDuration,

    #[error("time must look like HH:MM, got {0:?}")]
    MalformedTime(String),

    #[error("hour of day {0} is outside [0, 24)")]
    HourOutOfRange(f64),

    #[error("unknown bookmark kind {0:?}")]
    UnknownBookmarkKind(String),

    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the task queue is empty")]
    EmptyQueue,
}

/// Parse a whole number of minutes as typed by the user into seconds.
///
/// Non-numeric and non-positive entries are rejected.
pub fn parse_minutes(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    let minutes: u32 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidMinutes(trimmed.to_string()))?;
    if minutes == 0 {
        return Err(InputError::InvalidMinutes(trimmed.to_string()));
    }
    minutes
        .checked_mul(60)
        .ok_or_else(|| InputError::InvalidMinutes(trimmed.to_string()))
}
