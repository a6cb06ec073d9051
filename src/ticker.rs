use std::time::{Duration, Instant};

/// Countdown cadence
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Default input poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Get input poll duration
pub fn poll_duration(poll_ms: u64) -> Duration {
    Duration::from_millis(poll_ms.max(10))
}

/// Cancellable repeating schedule.
///
/// While armed, `due()` reports how many whole periods have elapsed since the
/// anchor and moves the anchor forward by exactly that many periods. Ticks
/// never drift, and periods that passed while the caller was busy are
/// reported on the next call instead of being lost.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    anchor: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            anchor: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start counting periods from `now`
    pub fn arm(&mut self, now: Instant) {
        self.anchor = Some(now);
    }

    pub fn disarm(&mut self) {
        self.anchor = None;
    }

    /// Number of periods that elapsed since the last call
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        if self.period.is_zero() || now <= anchor {
            return 0;
        }
        let elapsed = now - anchor;
        let periods = (elapsed.as_nanos() / self.period.as_nanos()).min(u32::MAX as u128) as u32;
        if periods > 0 {
            self.anchor = Some(anchor + self.period * periods);
        }
        periods
    }
}
