use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    app.last_error = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::AddingTask | UiMode::EditingTask => handle_task_form_mode(app, key),
        UiMode::RenamingCurrent => handle_rename_mode(app, key),
        UiMode::AddingBookmark => handle_bookmark_form_mode(app, key),
        UiMode::Normal if app.show_task_manager => handle_task_manager_mode(app, key),
        UiMode::Normal => handle_normal_mode(app, key),
    }
}

/// Handle keys on the timer screen
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),

        // Timer
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_run_pause(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.add_minute(),
        KeyCode::Char('-') => app.subtract_minute(),

        // Queue navigation
        KeyCode::Left => app.move_prev(),
        KeyCode::Right => app.move_next(),
        KeyCode::Char('t') => app.open_task_manager(),
        KeyCode::Char('e') => app.start_rename_current(),

        // Timeline
        KeyCode::Char('b') => app.start_add_bookmark(),
        KeyCode::Char('[') => app.select_prev_bookmark(),
        KeyCode::Char(']') => app.select_next_bookmark(),
        KeyCode::Char('x') => app.remove_selected_bookmark(),

        KeyCode::Char('f') => app.reset_focus(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while the task manager is open
fn handle_task_manager_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('t') => app.close_task_manager(),

        // Shift reorders, plain arrows move the selection
        KeyCode::Up if shift => app.manager_move_up(),
        KeyCode::Down if shift => app.manager_move_down(),
        KeyCode::Up | KeyCode::Char('k') => app.manager_select_up(),
        KeyCode::Down | KeyCode::Char('j') => app.manager_select_down(),
        KeyCode::Char('K') => app.manager_move_up(),
        KeyCode::Char('J') => app.manager_move_down(),

        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('e') => app.start_edit_task(),
        KeyCode::Char('d') | KeyCode::Delete => app.manager_delete(),
        KeyCode::Enter => app.manager_focus_selected(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add/edit task form
fn handle_task_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(form) = &mut app.task_form {
                form.field = form.field.toggle();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.task_form {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = &mut app.task_form {
                form.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys while renaming the current task
fn handle_rename_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_rename(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Backspace => {
            if let Some(buffer) = &mut app.rename_buffer {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = &mut app.rename_buffer {
                buffer.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the bookmark form: ←/→ cycle the kind, digits and ':' type the time
fn handle_bookmark_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_bookmark_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Left => {
            if let Some(form) = &mut app.bookmark_form {
                form.kind = form.kind.prev();
            }
        }
        KeyCode::Right | KeyCode::Tab => {
            if let Some(form) = &mut app.bookmark_form {
                form.kind = form.kind.next();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.bookmark_form {
                form.time.pop();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => {
            if let Some(form) = &mut app.bookmark_form {
                form.time.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{BookmarkKind, ManualClock, Task};
    use crate::persistence::snapshot::{encode_tasks, TASKS_KEY};
    use crate::persistence::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn create_test_app() -> AppState {
        let tasks = vec![Task::new("Task 1", 300).unwrap(), Task::new("Task 2", 120).unwrap()];
        let mut store = MemoryStore::new();
        store.set(TASKS_KEY, &encode_tasks(tasks.iter()).unwrap()).unwrap();
        let mut config = Config::default();
        config.ui.notifications = false;
        AppState::new(Box::new(store), Rc::new(ManualClock::at(2025, 1, 1, 9, 0)), config)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn labels(app: &AppState) -> Vec<String> {
        app.queue.iter().map(|t| t.label.clone()).collect()
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);

        let mut app = create_test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_timer_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.is_running());
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(!app.is_running());

        handle_key(&mut app, key(KeyCode::Char('+'))).unwrap();
        assert_eq!(app.countdown.remaining_secs(), 360);
        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.countdown.remaining_secs(), 300);
        handle_key(&mut app, key(KeyCode::Char('-'))).unwrap();
        assert_eq!(app.countdown.remaining_secs(), 240);
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.queue.current_index(), 1);

        // Past the end the task manager opens
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert!(app.show_task_manager);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.queue.current_index(), 0);
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();
        assert!(app.show_task_manager);

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        type_str(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_str(&mut app, "15");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.task_form.is_none());
        assert!(app.show_task_manager);
        assert_eq!(labels(&app), vec!["Task 1", "Task 2", "New"]);
        assert_eq!(app.queue.get(2).unwrap().duration_secs, 900);
    }

    #[test]
    fn test_handle_reorder_and_delete() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();

        handle_key(&mut app, shift(KeyCode::Down)).unwrap();
        assert_eq!(labels(&app), vec!["Task 2", "Task 1"]);
        assert_eq!(app.manager_selected, 1);

        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(labels(&app), vec!["Task 2"]);

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert!(app.queue.is_empty());
        assert!(app.show_task_manager);
    }

    #[test]
    fn test_handle_rename() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::RenamingCurrent);
        for _ in 0.."Task 1".len() {
            handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_str(&mut app, "Deep work");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.queue.current().unwrap().label, "Deep work");
    }

    #[test]
    fn test_handle_bookmark_form() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('b'))).unwrap();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.bookmark_form.as_ref().unwrap().kind, BookmarkKind::Gym);

        type_str(&mut app, "18:3x0");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.timeline.bookmarks()[0].hour_of_day, 18.5);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.timeline.is_empty());
    }

    #[test]
    fn test_invalid_bookmark_time_keeps_form_open() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('b'))).unwrap();
        type_str(&mut app, "27:00");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingBookmark);
        assert!(app.last_error.is_some());
        assert!(app.timeline.is_empty());
    }
}
