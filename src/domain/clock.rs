use chrono::{DateTime, Local, NaiveDate, Timelike};
use std::rc::Rc;

/// Source of local wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Current local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current local time as a decimal hour in [0, 24)
    fn current_hour(&self) -> f64 {
        let now = self.now();
        now.hour() as f64 + now.minute() as f64 / 60.0
    }
}

/// Reads the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
