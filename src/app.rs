use crate::config::Config;
use crate::domain::{
    BookmarkForm, BookmarkKind, Clock, Countdown, FocusBucket, FocusLedger, FormField, Navigation,
    TaskForm, TaskId, TaskQueue, TickOutcome, Timeline, UiMode,
};
use crate::error::{parse_minutes, InputError};
use crate::notifications;
use crate::persistence::{load_focus_buckets, load_tasks, save_focus_bucket, save_tasks, KeyValueStore, TasksSource};
use crate::ticker::{Ticker, COUNTDOWN_PERIOD};
use chrono::NaiveDate;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main application state.
///
/// Every mutating call follows the same shape: remember which task is
/// current, apply the change, reload the countdown if the current task is now
/// a different one, then write the queue back to the store.
pub struct AppState {
    pub queue: TaskQueue,
    pub countdown: Countdown,
    pub focus: FocusLedger,
    pub timeline: Timeline,
    pub config: Config,
    pub ui_mode: UiMode,
    /// Set whenever the task manager should be on screen
    pub show_task_manager: bool,
    pub manager_selected: usize,
    pub task_form: Option<TaskForm>,
    pub rename_buffer: Option<String>,
    pub bookmark_form: Option<BookmarkForm>,
    pub bookmark_selected: usize,
    /// Last rejected input, shown in the footer until the next key
    pub last_error: Option<String>,
    ticker: Ticker,
    tasks_source: TasksSource,
    store: Box<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    focus_day: NaiveDate,
}

impl AppState {
    pub fn new(store: Box<dyn KeyValueStore>, clock: Rc<dyn Clock>, config: Config) -> Self {
        let idle_secs = config.timer.idle_secs();
        let (tasks, source) = load_tasks(store.as_ref(), &config.timer.seed_label, idle_secs);
        let buckets = load_focus_buckets(store.as_ref());
        let focus = FocusLedger::with_buckets(Box::new(Rc::clone(&clock)), buckets);
        let queue = TaskQueue::new(tasks);
        let countdown = Countdown::new(queue.current().map_or(idle_secs, |t| t.duration_secs));

        info!(
            tasks = queue.len(),
            source = ?source,
            focus_today = focus.current_value(),
            "session loaded"
        );

        Self {
            show_task_manager: queue.is_empty(),
            queue,
            countdown,
            focus_day: focus.today(),
            focus,
            timeline: Timeline::new(),
            config,
            ui_mode: UiMode::Normal,
            manager_selected: 0,
            task_form: None,
            rename_buffer: None,
            bookmark_form: None,
            bookmark_selected: 0,
            last_error: None,
            ticker: Ticker::new(COUNTDOWN_PERIOD),
            tasks_source: source,
            store,
            clock,
        }
    }

    /// Write a seeded or reseeded queue back so the next start finds it.
    /// Loading alone never writes, which keeps read-only commands read-only.
    pub fn persist_seed(&mut self) {
        if self.tasks_source != TasksSource::Stored {
            self.persist_tasks();
            self.tasks_source = TasksSource::Stored;
        }
    }

    fn idle_secs(&self) -> u32 {
        self.config.timer.idle_secs()
    }

    /// Local time as a decimal hour, for the timeline marker
    pub fn current_hour(&self) -> f64 {
        self.timeline.current_hour(self.clock.as_ref())
    }

    /// Today's credited focus seconds
    pub fn focus_today(&self) -> u64 {
        self.focus.current_value()
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    // --- Timer ---

    /// Start the countdown; with nothing queued the task manager opens instead
    pub fn start(&mut self) {
        if self.queue.is_empty() {
            debug!("start with empty queue, opening task manager");
            self.open_task_manager();
            return;
        }
        if self.countdown.start() {
            self.complete_current();
        }
        self.sync_ticker(Instant::now());
    }

    pub fn pause(&mut self) {
        self.countdown.pause();
        self.ticker.disarm();
    }

    pub fn toggle_run_pause(&mut self) {
        if self.countdown.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and restore the current task's full duration
    pub fn reset(&mut self) {
        let nominal = self.queue.current().map_or(self.idle_secs(), |t| t.duration_secs);
        self.countdown.set_nominal(nominal);
        self.countdown.reset();
        self.ticker.disarm();
    }

    pub fn add_minute(&mut self) {
        self.countdown.add_minute();
    }

    /// Taking a running countdown to zero finishes the task right away
    pub fn subtract_minute(&mut self) {
        if self.countdown.subtract_minute() {
            self.complete_current();
            self.ticker.disarm();
            self.sync_ticker(Instant::now());
        }
    }

    /// Apply every countdown second that elapsed up to `now`
    pub fn tick(&mut self, now: Instant) {
        let today = self.focus.today();
        if today != self.focus_day {
            info!(from = %self.focus_day, to = %today, "focus day rolled over");
            self.focus_day = today;
        }

        let due = self.ticker.due(now);
        for _ in 0..due {
            if self.advance_second() == TickOutcome::Completed {
                // The next task starts counting from this poll, not the stale anchor
                self.ticker.disarm();
                break;
            }
        }
        self.sync_ticker(now);
    }

    /// Take one second off the countdown, completing the task at zero
    pub fn advance_second(&mut self) -> TickOutcome {
        let outcome = self.countdown.tick();
        if outcome == TickOutcome::Completed {
            self.complete_current();
        }
        outcome
    }

    fn sync_ticker(&mut self, now: Instant) {
        if self.countdown.is_running() {
            if !self.ticker.is_armed() {
                self.ticker.arm(now);
            }
        } else {
            self.ticker.disarm();
        }
    }

    /// Credit the finished task, drop it and move on to the next one
    fn complete_current(&mut self) {
        let removal = match self.queue.complete_current() {
            Ok(removal) => removal,
            Err(e) => {
                warn!(error = %e, "countdown completed without a current task");
                self.countdown.load(self.idle_secs());
                return;
            }
        };

        let credited = removal.task.duration_secs as u64;
        let bucket = self.focus.credit_completion(credited);
        self.persist_focus(bucket);
        info!(
            task = %removal.task.label,
            credited_secs = credited,
            focus_today = bucket.seconds,
            "task completed"
        );

        let next = self.queue.current().map(|t| (t.label.clone(), t.duration_secs));
        if self.config.ui.notifications {
            notifications::notify_task_completed(&removal.task.label, next.as_ref().map(|(l, _)| l.as_str()));
        }

        match next {
            Some((label, secs)) => {
                debug!(task = %label, "auto-starting next task");
                self.countdown.load(secs);
                self.countdown.start();
            }
            None => {
                self.countdown.load(self.idle_secs());
                self.open_task_manager();
            }
        }
        self.clamp_manager_selection();
        self.persist_tasks();
    }

    // --- Queue ---

    pub fn add_task(&mut self, label: &str, duration_secs: u32) -> Result<(), InputError> {
        let before = self.queue.current_id();
        let id = self.queue.add(label, duration_secs).map_err(|e| self.reject(e))?;
        debug!(task = %id, "task added");
        self.after_queue_change(before);
        Ok(())
    }

    pub fn delete_task(&mut self, index: usize) -> Result<(), InputError> {
        let before = self.queue.current_id();
        let removal = self.queue.delete(index).map_err(|e| self.reject(e))?;
        debug!(task = %removal.task.label, was_current = removal.was_current, "task deleted");
        self.after_queue_change(before);
        Ok(())
    }

    pub fn reorder_tasks(&mut self, from: usize, to: usize) -> Result<(), InputError> {
        let before = self.queue.current_id();
        self.queue.reorder(from, to).map_err(|e| self.reject(e))?;
        self.manager_selected = to.min(self.queue.len().saturating_sub(1));
        self.after_queue_change(before);
        Ok(())
    }

    /// Change a task's label and duration. Editing the current task only
    /// changes what `reset` returns to; the live countdown keeps going.
    pub fn edit_task(&mut self, index: usize, label: &str, duration_secs: u32) -> Result<(), InputError> {
        let before = self.queue.current_id();
        self.queue.edit(index, label, duration_secs).map_err(|e| self.reject(e))?;
        if self.queue.current_index() == index && before.is_some() {
            self.countdown.set_nominal(duration_secs);
        }
        self.after_queue_change(before);
        Ok(())
    }

    pub fn edit_current_label(&mut self, label: &str) -> Result<(), InputError> {
        let before = self.queue.current_id();
        self.queue.edit_current_label(label).map_err(|e| self.reject(e))?;
        self.after_queue_change(before);
        Ok(())
    }

    /// Make the task at `index` current
    pub fn select_task(&mut self, index: usize) -> Result<(), InputError> {
        let before = self.queue.current_id();
        self.queue.select(index).map_err(|e| self.reject(e))?;
        self.after_queue_change(before);
        Ok(())
    }

    pub fn move_prev(&mut self) {
        let before = self.queue.current_id();
        if self.queue.move_prev() {
            self.after_queue_change(before);
        }
    }

    /// Go to the next task; past the last one the task manager opens
    pub fn move_next(&mut self) {
        let before = self.queue.current_id();
        match self.queue.move_next() {
            Navigation::Moved => self.after_queue_change(before),
            Navigation::AtEnd => self.open_task_manager(),
            Navigation::Unchanged => {}
        }
    }

    fn after_queue_change(&mut self, before: Option<TaskId>) {
        self.sync_countdown(before);
        if self.queue.is_empty() {
            self.open_task_manager();
        }
        self.clamp_manager_selection();
        self.persist_tasks();
    }

    /// Reload the countdown when the current task is no longer `before`
    fn sync_countdown(&mut self, before: Option<TaskId>) {
        let current = self.queue.current_id();
        if current == before {
            return;
        }
        let secs = self.queue.current().map_or(self.idle_secs(), |t| t.duration_secs);
        self.countdown.load(secs);
        self.ticker.disarm();
        debug!(remaining_secs = secs, "countdown reloaded");
    }

    // --- Focus and bookmarks ---

    pub fn reset_focus(&mut self) {
        let bucket = self.focus.reset_today();
        info!(date = %bucket.date, "focus time reset");
        self.persist_focus(bucket);
    }

    pub fn add_bookmark(&mut self, kind: BookmarkKind, hour_of_day: f64) -> Result<(), InputError> {
        self.timeline.add(kind, hour_of_day).map_err(|e| self.reject(e))
    }

    pub fn add_bookmark_at(&mut self, kind: BookmarkKind, time: &str) -> Result<(), InputError> {
        self.timeline.add_at(kind, time).map_err(|e| self.reject(e))
    }

    /// Remove the bookmark at `index` in insertion order
    pub fn remove_bookmark(&mut self, index: usize) {
        if let Some(bookmark) = self.timeline.remove(index) {
            debug!(kind = %bookmark.kind, "bookmark removed");
        }
        self.bookmark_selected = self
            .bookmark_selected
            .min(self.timeline.len().saturating_sub(1));
    }

    /// Remove the bookmark under the timeline cursor
    pub fn remove_selected_bookmark(&mut self) {
        let index = self
            .timeline
            .sorted()
            .get(self.bookmark_selected)
            .map(|(index, _)| *index);
        if let Some(index) = index {
            self.remove_bookmark(index);
        }
    }

    pub fn select_prev_bookmark(&mut self) {
        self.bookmark_selected = self.bookmark_selected.saturating_sub(1);
    }

    pub fn select_next_bookmark(&mut self) {
        if self.bookmark_selected + 1 < self.timeline.len() {
            self.bookmark_selected += 1;
        }
    }

    // --- Task manager ---

    pub fn open_task_manager(&mut self) {
        self.show_task_manager = true;
        self.manager_selected = self.queue.current_index();
    }

    pub fn close_task_manager(&mut self) {
        self.show_task_manager = false;
    }

    pub fn manager_select_up(&mut self) {
        self.manager_selected = self.manager_selected.saturating_sub(1);
    }

    pub fn manager_select_down(&mut self) {
        if self.manager_selected + 1 < self.queue.len() {
            self.manager_selected += 1;
        }
    }

    pub fn manager_move_up(&mut self) {
        let from = self.manager_selected;
        if from > 0 {
            let _ = self.reorder_tasks(from, from - 1);
        }
    }

    pub fn manager_move_down(&mut self) {
        let from = self.manager_selected;
        if from + 1 < self.queue.len() {
            let _ = self.reorder_tasks(from, from + 1);
        }
    }

    pub fn manager_delete(&mut self) {
        let _ = self.delete_task(self.manager_selected);
    }

    /// Focus the selected task and close the manager
    pub fn manager_focus_selected(&mut self) {
        if self.select_task(self.manager_selected).is_ok() {
            self.close_task_manager();
        }
    }

    fn clamp_manager_selection(&mut self) {
        self.manager_selected = self.manager_selected.min(self.queue.len().saturating_sub(1));
    }

    // --- Forms ---

    pub fn start_add_task(&mut self) {
        self.task_form = Some(TaskForm::empty());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn start_edit_task(&mut self) {
        let Some(task) = self.queue.get(self.manager_selected) else {
            return;
        };
        self.task_form = Some(TaskForm {
            label: task.label.clone(),
            minutes: (task.duration_secs / 60).to_string(),
            field: FormField::Label,
            editing: Some(self.manager_selected),
        });
        self.ui_mode = UiMode::EditingTask;
    }

    /// Submit the task form. An invalid form stays open.
    pub fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.clone() else {
            return;
        };
        let secs = match parse_minutes(&form.minutes) {
            Ok(secs) => secs,
            Err(e) => {
                self.reject(e);
                return;
            }
        };
        let result = match form.editing {
            Some(index) => self.edit_task(index, &form.label, secs),
            None => self.add_task(&form.label, secs),
        };
        if result.is_ok() {
            self.cancel_form();
            if form.editing.is_none() {
                self.close_task_manager();
            }
        }
    }

    pub fn start_rename_current(&mut self) {
        let Some(task) = self.queue.current() else {
            return;
        };
        self.rename_buffer = Some(task.label.clone());
        self.ui_mode = UiMode::RenamingCurrent;
    }

    pub fn submit_rename(&mut self) {
        let Some(label) = self.rename_buffer.clone() else {
            return;
        };
        if self.edit_current_label(&label).is_ok() {
            self.cancel_form();
        }
    }

    pub fn start_add_bookmark(&mut self) {
        self.bookmark_form = Some(BookmarkForm::new());
        self.ui_mode = UiMode::AddingBookmark;
    }

    /// Place the bookmark; an empty time field means now
    pub fn submit_bookmark_form(&mut self) {
        let Some(form) = self.bookmark_form.clone() else {
            return;
        };
        let result = if form.time.trim().is_empty() {
            let hour = self.clock.current_hour();
            self.add_bookmark(form.kind, hour)
        } else {
            self.add_bookmark_at(form.kind, &form.time)
        };
        if result.is_ok() {
            self.cancel_form();
        }
    }

    /// Close whichever form is open
    pub fn cancel_form(&mut self) {
        self.task_form = None;
        self.rename_buffer = None;
        self.bookmark_form = None;
        self.ui_mode = UiMode::Normal;
    }

    fn reject(&mut self, e: InputError) -> InputError {
        debug!(error = %e, "input rejected");
        self.last_error = Some(e.to_string());
        e
    }

    // --- Persistence ---

    fn persist_tasks(&mut self) {
        if let Err(e) = save_tasks(self.store.as_mut(), self.queue.iter()) {
            warn!(error = %e, "failed to save tasks");
        }
    }

    fn persist_focus(&mut self, bucket: FocusBucket) {
        if let Err(e) = save_focus_bucket(self.store.as_mut(), bucket) {
            warn!(error = %e, date = %bucket.date, "failed to save focus time");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountdownPhase, ManualClock, Task};
    use crate::persistence::snapshot::{encode_tasks, TASKS_KEY};
    use crate::persistence::{focus_key, MemoryStore};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::time::Duration as StdDuration;

    fn store_with(tasks: &[(&str, u32)]) -> MemoryStore {
        let tasks: Vec<Task> = tasks
            .iter()
            .map(|(label, secs)| Task::new(label, *secs).unwrap())
            .collect();
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, &encode_tasks(tasks.iter()).unwrap()).unwrap();
        store
    }

    fn create_test_app(tasks: &[(&str, u32)]) -> (AppState, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::at(2025, 1, 1, 9, 0));
        let mut config = Config::default();
        config.ui.notifications = false;
        let app = AppState::new(Box::new(store_with(tasks)), clock.clone(), config);
        (app, clock)
    }

    fn labels(app: &AppState) -> Vec<String> {
        app.queue.iter().map(|t| t.label.clone()).collect()
    }

    fn stored_labels(app: &AppState) -> Vec<String> {
        let json = app.store.get(TASKS_KEY).unwrap().unwrap();
        crate::persistence::snapshot::decode_tasks(&json)
            .unwrap()
            .into_iter()
            .map(|t| t.label)
            .collect()
    }

    #[test]
    fn test_app_state_new() {
        let (app, _) = create_test_app(&[("A", 300), ("B", 120)]);
        assert_eq!(labels(&app), vec!["A", "B"]);
        assert_eq!(app.countdown.remaining_secs(), 300);
        assert!(!app.is_running());
        assert!(!app.show_task_manager);
    }

    #[test]
    fn test_missing_store_seeds_and_persists() {
        let clock = Rc::new(ManualClock::at(2025, 1, 1, 9, 0));
        let mut app = AppState::new(Box::new(MemoryStore::new()), clock, Config::default());
        assert_eq!(labels(&app), vec!["Enter Task"]);
        assert_eq!(app.countdown.remaining_secs(), 2700);
        // Loading alone leaves the store untouched
        assert_eq!(app.store.get(TASKS_KEY).unwrap(), None);

        app.persist_seed();
        assert_eq!(stored_labels(&app), vec!["Enter Task"]);
    }

    #[test]
    fn test_corrupt_store_is_not_rewritten_on_load() {
        let clock = Rc::new(ManualClock::at(2025, 1, 1, 9, 0));
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, "not json").unwrap();
        let mut app = AppState::new(Box::new(store), clock, Config::default());
        assert_eq!(labels(&app), vec!["Enter Task"]);
        assert_eq!(app.store.get(TASKS_KEY).unwrap(), Some("not json".to_string()));

        app.persist_seed();
        assert_eq!(stored_labels(&app), vec!["Enter Task"]);
    }

    #[test]
    fn test_persist_seed_leaves_stored_queue_alone() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        let before = app.store.get(TASKS_KEY).unwrap();
        app.persist_seed();
        assert_eq!(app.store.get(TASKS_KEY).unwrap(), before);
    }

    #[test]
    fn test_empty_stored_queue_opens_manager() {
        let (app, _) = create_test_app(&[]);
        assert!(app.queue.is_empty());
        assert!(app.show_task_manager);
        assert_eq!(app.countdown.remaining_secs(), 2700);
    }

    #[test]
    fn test_completion_auto_advances() {
        let (mut app, _) = create_test_app(&[("A", 300), ("B", 120)]);
        app.start();

        for _ in 0..299 {
            assert_eq!(app.advance_second(), TickOutcome::Decremented);
        }
        assert_eq!(app.countdown.remaining_secs(), 1);
        assert_eq!(app.advance_second(), TickOutcome::Completed);

        assert_eq!(app.focus_today(), 300);
        assert_eq!(labels(&app), vec!["B"]);
        assert_eq!(app.queue.current().unwrap().label, "B");
        assert!(app.is_running());
        assert_eq!(app.countdown.remaining_secs(), 120);
        assert_eq!(stored_labels(&app), vec!["B"]);
        assert_eq!(
            app.store.get(&focus_key(app.focus.today())).unwrap(),
            Some("300".to_string())
        );
    }

    #[test]
    fn test_completion_of_last_task_goes_idle() {
        let (mut app, _) = create_test_app(&[("A", 2)]);
        app.start();
        app.advance_second();
        assert_eq!(app.advance_second(), TickOutcome::Completed);

        assert!(app.queue.is_empty());
        assert!(!app.is_running());
        assert_eq!(app.countdown.remaining_secs(), 2700);
        assert!(app.show_task_manager);
        assert_eq!(app.focus_today(), 2);
    }

    #[test]
    fn test_completion_credits_nominal_duration_once() {
        let (mut app, _) = create_test_app(&[("A", 120), ("B", 60)]);
        app.subtract_minute();
        app.start();
        for _ in 0..60 {
            app.advance_second();
        }
        // Credit is the task's duration, not the time actually counted down
        assert_eq!(app.focus_today(), 120);
        assert_eq!(app.queue.current().unwrap().label, "B");
    }

    #[test]
    fn test_tick_drains_elapsed_seconds() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.start();
        app.tick(Instant::now() + StdDuration::from_millis(3500));
        assert_eq!(app.countdown.remaining_secs(), 297);
    }

    #[test]
    fn test_tick_while_paused_does_nothing() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.tick(Instant::now() + StdDuration::from_secs(10));
        assert_eq!(app.countdown.remaining_secs(), 300);

        app.start();
        app.pause();
        app.tick(Instant::now() + StdDuration::from_secs(10));
        assert_eq!(app.countdown.remaining_secs(), 300);
    }

    #[test]
    fn test_tick_completion_stops_draining() {
        let (mut app, _) = create_test_app(&[("A", 2), ("B", 60)]);
        app.start();
        app.tick(Instant::now() + StdDuration::from_millis(10_500));
        // Seconds past A's end are not charged to B
        assert_eq!(app.queue.current().unwrap().label, "B");
        assert_eq!(app.countdown.remaining_secs(), 60);
        assert!(app.is_running());
        assert_eq!(app.focus_today(), 2);
    }

    #[test]
    fn test_start_with_empty_queue_opens_manager() {
        let (mut app, _) = create_test_app(&[]);
        app.close_task_manager();
        app.start();
        assert!(!app.is_running());
        assert!(app.show_task_manager);
    }

    #[test]
    fn test_delete_last_task_resets_to_idle() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.delete_task(0).unwrap();

        assert!(app.queue.is_empty());
        assert_eq!(app.queue.current_index(), 0);
        assert_eq!(app.countdown.remaining_secs(), 2700);
        assert!(app.show_task_manager);
        assert_eq!(stored_labels(&app), Vec::<String>::new());
    }

    #[test]
    fn test_delete_current_loads_next() {
        let (mut app, _) = create_test_app(&[("A", 300), ("B", 120), ("C", 60)]);
        app.select_task(1).unwrap();
        app.start();
        app.delete_task(1).unwrap();

        assert_eq!(app.queue.current().unwrap().label, "C");
        assert_eq!(app.countdown.remaining_secs(), 60);
        assert!(!app.is_running());
    }

    #[test]
    fn test_delete_other_task_keeps_countdown() {
        let (mut app, _) = create_test_app(&[("A", 300), ("B", 120)]);
        app.start();
        app.advance_second();
        app.delete_task(1).unwrap();

        assert_eq!(app.countdown.remaining_secs(), 299);
        assert!(app.is_running());
    }

    #[test]
    fn test_add_task_keeps_countdown() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.start();
        app.advance_second();
        app.add_task("B", 120).unwrap();

        assert_eq!(app.countdown.remaining_secs(), 299);
        assert!(app.is_running());
        assert_eq!(stored_labels(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_add_to_empty_queue_loads_task() {
        let (mut app, _) = create_test_app(&[]);
        app.add_task("Write", 600).unwrap();
        assert_eq!(app.countdown.remaining_secs(), 600);
        assert_eq!(app.queue.current().unwrap().label, "Write");
    }

    #[test]
    fn test_rejected_add_leaves_queue_alone() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        assert_eq!(app.add_task("  ", 60), Err(InputError::EmptyLabel));
        assert_eq!(app.add_task("B", 0), Err(InputError::ZeroDuration));
        assert_eq!(labels(&app), vec!["A"]);
        assert!(app.last_error.is_some());
    }

    #[test]
    fn test_reorder_follows_current_task() {
        let (mut app, _) = create_test_app(&[("A", 300), ("B", 120), ("C", 60)]);
        app.start();
        app.reorder_tasks(0, 2).unwrap();

        assert_eq!(labels(&app), vec!["B", "C", "A"]);
        assert_eq!(app.queue.current().unwrap().label, "A");
        assert_eq!(app.queue.current_index(), 2);
        assert!(app.is_running());
        assert_eq!(app.manager_selected, 2);
    }

    #[test]
    fn test_navigation_reloads_countdown() {
        let (mut app, _) = create_test_app(&[("A", 300), ("B", 120)]);
        app.start();
        app.move_next();
        assert_eq!(app.countdown.remaining_secs(), 120);
        assert!(!app.is_running());

        app.move_next();
        assert!(app.show_task_manager);
        assert_eq!(app.queue.current().unwrap().label, "B");

        app.move_prev();
        assert_eq!(app.countdown.remaining_secs(), 300);
    }

    #[test]
    fn test_edit_current_changes_reset_target() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.start();
        app.advance_second();
        app.edit_task(0, "A2", 600).unwrap();

        assert_eq!(app.countdown.remaining_secs(), 299);
        app.reset();
        assert_eq!(app.countdown.remaining_secs(), 600);
        assert_eq!(app.countdown.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn test_subtract_to_zero_while_running_completes_now() {
        let (mut app, _) = create_test_app(&[("A", 60), ("B", 120)]);
        app.start();
        app.subtract_minute();

        assert_eq!(app.focus_today(), 60);
        assert_eq!(labels(&app), vec!["B"]);
        assert_eq!(app.countdown.remaining_secs(), 120);
        assert!(app.is_running());

        // Pausing right away cannot strand a finished task at 00:00
        app.pause();
        assert_eq!(app.queue.current().unwrap().label, "B");
    }

    #[test]
    fn test_start_at_zero_completes_now() {
        let (mut app, _) = create_test_app(&[("A", 60)]);
        app.subtract_minute();
        assert_eq!(app.countdown.remaining_secs(), 0);
        assert_eq!(app.countdown.phase(), CountdownPhase::Idle);

        app.start();
        assert!(app.queue.is_empty());
        assert_eq!(app.focus_today(), 60);
        assert!(!app.is_running());
        assert_eq!(app.countdown.remaining_secs(), 2700);
        assert!(app.show_task_manager);
    }

    #[test]
    fn test_add_minute_on_huge_duration_clamps() {
        let secs = parse_minutes("71582788").unwrap();
        let (mut app, _) = create_test_app(&[("A", secs)]);
        app.add_minute();
        assert_eq!(app.countdown.remaining_secs(), 7200);
    }

    #[test]
    fn test_adjust_minutes_clamped() {
        let (mut app, _) = create_test_app(&[("A", 7170)]);
        app.add_minute();
        assert_eq!(app.countdown.remaining_secs(), 7200);
        app.reset();
        app.subtract_minute();
        assert_eq!(app.countdown.remaining_secs(), 7110);
    }

    #[test]
    fn test_focus_rollover() {
        let clock = Rc::new(ManualClock::at(2025, 1, 1, 23, 0));
        let mut store = store_with(&[("A", 60)]);
        store.set("focusTime-2025-01-01", "1800").unwrap();
        let mut config = Config::default();
        config.ui.notifications = false;
        let mut app = AppState::new(Box::new(store), clock.clone(), config);
        assert_eq!(app.focus_today(), 1800);

        clock.advance(Duration::hours(2));
        app.tick(Instant::now());
        assert_eq!(app.focus_today(), 0);

        app.start();
        for _ in 0..60 {
            app.advance_second();
        }
        assert_eq!(app.focus_today(), 60);
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(app.focus.value_on(jan1), 1800);
        assert_eq!(app.store.get("focusTime-2025-01-02").unwrap(), Some("60".to_string()));
    }

    #[test]
    fn test_reset_focus() {
        let (mut app, _) = create_test_app(&[("A", 60)]);
        app.start();
        for _ in 0..60 {
            app.advance_second();
        }
        assert_eq!(app.focus_today(), 60);
        app.reset_focus();
        assert_eq!(app.focus_today(), 0);
        assert_eq!(app.store.get("focusTime-2025-01-01").unwrap(), Some("0".to_string()));
    }

    #[test]
    fn test_bookmarks() {
        let (mut app, _) = create_test_app(&[("A", 60)]);
        app.add_bookmark_at(BookmarkKind::Coffee, "09:30").unwrap();
        let bookmark = &app.timeline.bookmarks()[0];
        assert_eq!(bookmark.hour_of_day, 9.5);
        assert_eq!(bookmark.label, "Break");

        assert!(app.add_bookmark_at(BookmarkKind::Gym, "25:00").is_err());
        assert_eq!(app.timeline.len(), 1);

        app.remove_bookmark(0);
        assert!(app.timeline.is_empty());
        app.remove_bookmark(3);
        assert!(app.timeline.is_empty());
    }

    #[test]
    fn test_bookmark_form_defaults_to_now() {
        let (mut app, _) = create_test_app(&[("A", 60)]);
        app.start_add_bookmark();
        app.submit_bookmark_form();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.timeline.bookmarks()[0].hour_of_day, 9.0);
    }

    #[test]
    fn test_task_form_add_and_edit() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.open_task_manager();
        app.start_add_task();
        for c in "Review".chars() {
            app.task_form.as_mut().unwrap().push(c);
        }
        app.submit_task_form();
        // No minutes yet, form stays open
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        let form = app.task_form.as_mut().unwrap();
        form.field = form.field.toggle();
        form.push('2');
        form.push('5');
        app.submit_task_form();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(labels(&app), vec!["A", "Review"]);
        assert_eq!(app.queue.get(1).unwrap().duration_secs, 1500);
        // A successful add closes the manager
        assert!(!app.show_task_manager);

        app.open_task_manager();
        app.manager_selected = 1;
        app.start_edit_task();
        assert_eq!(app.task_form.as_ref().unwrap().minutes, "25");
        app.task_form.as_mut().unwrap().label = "Review PR".to_string();
        app.submit_task_form();
        assert_eq!(labels(&app), vec!["A", "Review PR"]);
        assert!(app.show_task_manager);
    }

    #[test]
    fn test_rename_current() {
        let (mut app, _) = create_test_app(&[("A", 300)]);
        app.start_rename_current();
        app.rename_buffer = Some("Deep work".to_string());
        app.submit_rename();
        assert_eq!(app.queue.current().unwrap().label, "Deep work");
        assert_eq!(stored_labels(&app), vec!["Deep work"]);
    }

    #[test]
    fn test_manager_focus_selected() {
        let (mut app, _) = create_test_app(&[("A", 300), ("B", 120)]);
        app.open_task_manager();
        app.manager_select_down();
        app.manager_focus_selected();
        assert!(!app.show_task_manager);
        assert_eq!(app.queue.current().unwrap().label, "B");
        assert_eq!(app.countdown.remaining_secs(), 120);
    }

    #[test]
    fn test_store_failure_does_not_break_session() {
        let clock = Rc::new(ManualClock::at(2025, 1, 1, 9, 0));
        let mut config = Config::default();
        config.ui.notifications = false;
        let mut app = AppState::new(Box::new(MemoryStore::new().failing_writes()), clock, config);
        app.add_task("B", 60).unwrap();
        assert_eq!(labels(&app), vec!["Enter Task", "B"]);
    }
}
