use crate::app::AppState;
use crate::domain::{format_duration, CountdownPhase};
use crate::ui::styles::{
    border_style, default_style, gauge_style, idle_style, paused_style, running_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Badge text and style for the countdown phase
fn phase_badge(phase: CountdownPhase) -> (&'static str, ratatui::style::Style) {
    match phase {
        CountdownPhase::Running => ("▶ RUNNING", running_style()),
        CountdownPhase::Idle => ("⏸ PAUSED", paused_style()),
        CountdownPhase::Completed => ("✓ DONE", idle_style()),
    }
}

/// Render the countdown for the current task
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Focus ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Label, clock and badge
            Constraint::Length(1), // Gauge
            Constraint::Length(2), // Navigation
        ])
        .split(inner);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    match app.queue.current() {
        Some(task) => {
            lines.push(Line::from(Span::styled(
                task.label.as_str(),
                default_style().add_modifier(Modifier::BOLD),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No tasks queued. Press t to add one.",
                idle_style(),
            )));
        }
    }
    lines.push(Line::raw(""));

    let clock_style = if app.is_running() {
        running_style()
    } else {
        default_style().add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(app.countdown.display(), clock_style)));
    lines.push(Line::raw(""));

    let (badge, badge_style) = phase_badge(app.countdown.phase());
    lines.push(Line::from(Span::styled(badge, badge_style)));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(app.countdown.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", app.countdown.progress() * 100.0));
    f.render_widget(gauge, chunks[1]);

    let nav_style = |available: bool| if available { default_style() } else { idle_style() };
    let position = if app.queue.is_empty() {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", app.queue.current_index() + 1, app.queue.len())
    };
    let nav = Line::from(vec![
        Span::styled("◀ prev   ", nav_style(app.queue.can_move_prev())),
        Span::raw(position),
        Span::styled("   next ▶", nav_style(app.queue.can_move_next())),
    ]);
    let plan = Line::from(Span::styled(
        format!("Planned: {}", format_duration(app.queue.total_queued_secs())),
        idle_style(),
    ));
    let navigation = Paragraph::new(vec![nav, plan]).alignment(Alignment::Center);
    f.render_widget(navigation, chunks[2]);
}
