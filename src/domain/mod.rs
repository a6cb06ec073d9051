pub mod bookmark;
pub mod clock;
pub mod countdown;
pub mod enums;
pub mod focus;
pub mod queue;
pub mod task;

pub use bookmark::{Bookmark, BookmarkKind, Timeline, TimeOfDay};
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use countdown::{format_clock, Countdown, CountdownPhase, TickOutcome};
pub use enums::{BookmarkForm, FormField, TaskForm, UiMode};
pub use focus::{format_focus_time, FocusBucket, FocusLedger};
pub use queue::{Navigation, Removal, TaskQueue};
pub use task::{format_duration, Task, TaskId};
