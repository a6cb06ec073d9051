//! Daily focus-time ledger.
//!
//! Focus time is an explicit map of calendar date to credited seconds. The
//! date is recomputed from the injected clock on every access, so crossing
//! midnight simply starts reading and writing a different bucket.

use super::clock::Clock;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One day's focus-time bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusBucket {
    pub date: NaiveDate,
    pub seconds: u64,
}

pub struct FocusLedger {
    clock: Box<dyn Clock>,
    buckets: BTreeMap<NaiveDate, u64>,
}

impl FocusLedger {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_buckets(clock, BTreeMap::new())
    }

    pub fn with_buckets(clock: Box<dyn Clock>, buckets: BTreeMap<NaiveDate, u64>) -> Self {
        Self { clock, buckets }
    }

    /// Date whose bucket is "today" right now
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Today's credited seconds, 0 if nothing was credited yet
    pub fn current_value(&self) -> u64 {
        self.value_on(self.today())
    }

    pub fn value_on(&self, date: NaiveDate) -> u64 {
        self.buckets.get(&date).copied().unwrap_or(0)
    }

    /// Add a naturally completed task's duration to today's bucket
    pub fn credit_completion(&mut self, duration_secs: u64) -> FocusBucket {
        let date = self.today();
        let seconds = self.buckets.entry(date).or_insert(0);
        *seconds = seconds.saturating_add(duration_secs);
        FocusBucket {
            date,
            seconds: *seconds,
        }
    }

    /// Set today's bucket back to 0
    pub fn reset_today(&mut self) -> FocusBucket {
        let date = self.today();
        self.buckets.insert(date, 0);
        FocusBucket { date, seconds: 0 }
    }

    /// The `days` most recent calendar days ending today, oldest first
    pub fn recent(&self, days: u32) -> Vec<FocusBucket> {
        let today = self.today();
        (0..days as i64)
            .rev()
            .filter_map(|back| today.checked_sub_signed(chrono::Duration::days(back)))
            .map(|date| FocusBucket {
                date,
                seconds: self.value_on(date),
            })
            .collect()
    }
}

/// Format seconds of focus as "{h}h {m}m", dropping the hours when zero
pub fn format_focus_time(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
