use crate::app::AppState;
use crate::domain::format_focus_time;
use crate::ui::styles::{border_style, error_style, focus_style, hint_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" Space start/pause   "),
        Span::raw("r reset   "),
        Span::raw("+ / - minute   "),
        Span::raw("←/→ prev/next   "),
        Span::raw("t tasks   "),
        Span::raw("e rename   "),
        Span::raw("b bookmark   "),
        Span::raw("[ ] select   "),
        Span::raw("x remove   "),
        Span::raw("f reset focus   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the header with today's focus time
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Focus today: ", title_style()),
        Span::styled(format_focus_time(app.focus_today()), focus_style()),
        Span::raw(format!("   {}   ", app.focus.today().format("%a %d %b"))),
        Span::styled("Queued: ", title_style()),
        Span::raw(app.queue.len().to_string()),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    f.render_widget(paragraph, area);
}

/// Render the status line (last rejected input)
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(error) = &app.last_error {
        let paragraph = Paragraph::new(Span::styled(format!(" {}", error), error_style()));
        f.render_widget(paragraph, area);
    }
}
