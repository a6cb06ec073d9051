//! Per-task countdown state machine.
//!
//! ```text
//! Idle <-> Running -> Completed
//! ```
//!
//! The countdown has no clock of its own: the caller feeds it one `tick()`
//! per elapsed second while it is running. `Completed` is reached only by
//! running at zero (by ticking, by `subtract_minute` or by `start` on an
//! empty countdown) and stays put until `load()` re-seeds the countdown for
//! the next task.

/// Upper bound for manual adjustment (two hours)
pub const MAX_REMAINING_SECS: u32 = 7200;

/// Step used by `add_minute` / `subtract_minute`
pub const ADJUST_STEP_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Idle,
    Running,
    Completed,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing changed
    Ignored,
    /// One second was taken off
    Decremented,
    /// The countdown reached zero while running
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    nominal_secs: u32,
    phase: CountdownPhase,
}

impl Countdown {
    /// A stopped countdown showing the full nominal duration
    pub fn new(nominal_secs: u32) -> Self {
        Self {
            remaining_secs: nominal_secs,
            nominal_secs,
            phase: CountdownPhase::Idle,
        }
    }

    /// Re-seed for a different task; the countdown keeps nothing from before
    pub fn load(&mut self, nominal_secs: u32) {
        *self = Self::new(nominal_secs);
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn nominal_secs(&self) -> u32 {
        self.nominal_secs
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    /// Returns true when the countdown completed on the spot
    pub fn start(&mut self) -> bool {
        if self.phase == CountdownPhase::Idle {
            self.phase = CountdownPhase::Running;
        }
        self.complete_if_zero()
    }

    pub fn pause(&mut self) {
        if self.phase == CountdownPhase::Running {
            self.phase = CountdownPhase::Idle;
        }
    }

    pub fn toggle(&mut self) {
        match self.phase {
            CountdownPhase::Idle => {
                self.start();
            }
            CountdownPhase::Running => self.pause(),
            CountdownPhase::Completed => {}
        }
    }

    /// Stop and restore the full nominal duration
    pub fn reset(&mut self) {
        self.phase = CountdownPhase::Idle;
        self.remaining_secs = self.nominal_secs;
    }

    /// Change the duration `reset()` returns to, leaving the live value alone
    pub fn set_nominal(&mut self, nominal_secs: u32) {
        self.nominal_secs = nominal_secs;
    }

    pub fn add_minute(&mut self) {
        self.remaining_secs = self
            .remaining_secs
            .saturating_add(ADJUST_STEP_SECS)
            .min(MAX_REMAINING_SECS);
    }

    /// Returns true when this took a running countdown to zero
    pub fn subtract_minute(&mut self) -> bool {
        self.remaining_secs = self.remaining_secs.saturating_sub(ADJUST_STEP_SECS);
        self.complete_if_zero()
    }

    fn complete_if_zero(&mut self) -> bool {
        if self.phase == CountdownPhase::Running && self.remaining_secs == 0 {
            self.phase = CountdownPhase::Completed;
            return true;
        }
        false
    }

    /// Advance by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != CountdownPhase::Running {
            return TickOutcome::Ignored;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.phase = CountdownPhase::Completed;
            return TickOutcome::Completed;
        }
        TickOutcome::Decremented
    }

    /// Fraction of the nominal duration already gone, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.nominal_secs == 0 {
            return 0.0;
        }
        let gone = self.nominal_secs.saturating_sub(self.remaining_secs) as f64;
        (gone / self.nominal_secs as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as "MM:SS"; minutes are not wrapped into hours
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
