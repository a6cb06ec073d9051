use crate::app::AppState;
use crate::domain::{BookmarkKind, FormField, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// A labelled text field with a block cursor when focused
fn field_lines<'a>(label: &'a str, value: &'a str, focused: bool) -> [Line<'a>; 2] {
    let label = if focused {
        Line::raw(format!("{} (editing)", label))
    } else {
        Line::raw(label)
    };
    let value = Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]);
    [label, value]
}

fn render_form<'a>(f: &mut Frame, app: &'a AppState, area: Rect, title: &str, mut lines: Vec<Line<'a>>) {
    if let Some(error) = &app.last_error {
        lines.push(Line::from(Span::styled(error.as_str(), error_style())));
    }

    let modal_area = create_modal_area(area, lines.len() as u16 + 2);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the add/edit task form
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.task_form else {
        return;
    };
    let title = if app.ui_mode == UiMode::EditingTask {
        " Edit Task "
    } else {
        " Add Task "
    };

    let mut lines = vec![Line::raw("")];
    lines.extend(field_lines("Name:", &form.label, form.field == FormField::Label));
    lines.push(Line::raw(""));
    lines.extend(field_lines("Minutes:", &form.minutes, form.field == FormField::Minutes));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

    render_form(f, app, area, title, lines);
}

/// Render the rename-current-task form
pub fn render_rename_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(buffer) = &app.rename_buffer else {
        return;
    };

    let mut lines = vec![Line::raw("")];
    lines.extend(field_lines("Name:", buffer, true));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Enter to save  ·  Esc to cancel"));

    render_form(f, app, area, " Rename Task ", lines);
}

/// Render the add-bookmark form
pub fn render_bookmark_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.bookmark_form else {
        return;
    };
    let use_emoji = app.config.ui.use_emoji;

    let mut kinds = vec![Span::raw("Kind: ")];
    for kind in BookmarkKind::all() {
        let text = format!(" {} {} ", kind.glyph(use_emoji), kind.label());
        if *kind == form.kind {
            kinds.push(Span::styled(format!("[{}]", text), modal_title_style()));
        } else {
            kinds.push(Span::raw(text));
        }
    }

    let mut lines = vec![Line::raw(""), Line::from(kinds), Line::raw("")];
    lines.extend(field_lines("Time (HH:MM, empty for now):", &form.time, true));
    lines.push(Line::raw(""));
    lines.push(Line::raw("←/→ kind  ·  Enter to place  ·  Esc to cancel"));

    render_form(f, app, area, " Add Bookmark ", lines);
}
