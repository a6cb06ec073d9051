use crate::app::AppState;
use crate::domain::format_duration;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, running_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the task manager modal
pub fn render_task_manager(f: &mut Frame, app: &AppState, area: Rect) {
    let height = (app.queue.len() as u16).saturating_add(6).clamp(10, 24);
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Tasks ", modal_title_style()))
        .style(modal_bg_style());
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let list_height = inner.height.saturating_sub(2);
    let list_area = Rect::new(inner.x, inner.y, inner.width, list_height);
    let hint_area = Rect::new(inner.x, inner.y + list_height, inner.width, inner.height - list_height);

    if app.queue.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::raw("  Queue is empty. Press a to add a task."),
        ]);
        f.render_widget(empty, list_area);
    } else {
        let current = app.queue.current_id();
        let items: Vec<ListItem> = app
            .queue
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let marker = if Some(task.id) == current { "▶ " } else { "  " };
                let line = Line::from(vec![
                    Span::styled(marker, running_style()),
                    Span::raw(format!("{:>2}. ", i + 1)),
                    Span::raw(task.label.as_str()),
                    Span::raw(format!("  ({})", format_duration(task.duration_secs as u64))),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).highlight_style(selected_style());
        let mut state = ListState::default();
        state.select(Some(app.manager_selected));
        f.render_stateful_widget(list, list_area, &mut state);
    }

    let hints = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("[a]", modal_title_style()),
            Span::raw(" add  "),
            Span::styled("[e]", modal_title_style()),
            Span::raw(" edit  "),
            Span::styled("[d]", modal_title_style()),
            Span::raw(" delete  "),
            Span::styled("Shift+↑/↓", modal_title_style()),
            Span::raw(" move  "),
            Span::styled("[Enter]", modal_title_style()),
            Span::raw(" focus  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" close"),
        ]),
    ]);
    f.render_widget(hints, hint_area);
}
