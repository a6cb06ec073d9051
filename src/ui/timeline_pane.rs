use crate::app::AppState;
use crate::ui::styles::{
    border_style, default_style, hint_style, idle_style, now_marker_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HOURS: u16 = 24;

/// First hour row to show so the current hour stays roughly centered
fn scroll_offset(current_hour: f64, visible_rows: u16) -> u16 {
    if visible_rows >= HOURS {
        return 0;
    }
    let hour = current_hour.floor().clamp(0.0, 23.0) as u16;
    hour.saturating_sub(visible_rows / 2).min(HOURS - visible_rows)
}

/// Axis label for an hour row; only every third hour is labelled
fn axis_label(hour: u16) -> String {
    if hour % 3 == 0 {
        format!("{:02}:00 ", hour)
    } else {
        "      ".to_string()
    }
}

/// Render the 24-hour timeline with bookmarks and the current-hour marker
pub fn render_timeline_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let current_hour = app.current_hour();
    let sorted = app.timeline.sorted();
    let use_emoji = app.config.ui.use_emoji;

    let mut lines = Vec::with_capacity(HOURS as usize);
    for hour in 0..HOURS {
        let is_now = current_hour.floor() as u16 == hour;
        let axis_style = if is_now { now_marker_style() } else { hint_style() };

        let mut spans = vec![
            Span::styled(axis_label(hour), axis_style),
            Span::styled(if is_now { "▶" } else { "│" }, axis_style),
        ];

        for (position, (_, bookmark)) in sorted.iter().enumerate() {
            if bookmark.hour_of_day.floor() as u16 != hour {
                continue;
            }
            let style = if position == app.bookmark_selected {
                selected_style()
            } else {
                default_style()
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(
                    "{} {} {}",
                    bookmark.kind.glyph(use_emoji),
                    bookmark.label,
                    bookmark.time_formatted()
                ),
                style,
            ));
        }

        if is_now && spans.len() == 2 {
            spans.push(Span::styled(" now", idle_style()));
        }
        lines.push(Line::from(spans));
    }

    let inner_height = area.height.saturating_sub(2);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Today ", title_style())),
        )
        .scroll((scroll_offset(current_hour, inner_height), 0));

    f.render_widget(paragraph, area);
}
