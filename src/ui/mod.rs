pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod timeline_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::{render_bookmark_form, render_rename_form, render_task_form};
use keybindings::{render_header, render_keybindings, render_status};
use layout::create_layout;
use modal::render_task_manager;
use ratatui::Frame;
use timeline_pane::render_timeline_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_header(f, app, layout.header_area);
    render_timer_pane(f, app, layout.timer_area);
    render_timeline_pane(f, app, layout.timeline_area);
    render_status(f, app, layout.status_area);

    // Task manager sits under any form opened from it
    if app.show_task_manager {
        render_task_manager(f, app, size);
    }

    match app.ui_mode {
        UiMode::AddingTask | UiMode::EditingTask => render_task_form(f, app, size),
        UiMode::RenamingCurrent => render_rename_form(f, app, size),
        UiMode::AddingBookmark => render_bookmark_form(f, app, size),
        UiMode::Normal => {}
    }
}
