use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, Status};
use crate::util::unicode::{display_width, truncate_to_width};

const NAVIGATE_HINT: &str = "+/- mark  c done  d delete  e edit  w sync  r reload  p party  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match app.mode {
        Mode::EditTitle => {
            // Title prompt: title: text▌
            let spans = vec![
                Span::styled("title: ", Style::default().fg(app.theme.dim).bg(bg)),
                Span::styled(
                    app.edit_buffer.clone(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            (spans, "Enter save  Esc cancel".to_string())
        }
        Mode::Overlay => (Vec::new(), "j/k scroll  Esc close".to_string()),
        Mode::Navigate => {
            let spans = match &app.status {
                Some(Status::Info(msg)) => vec![Span::styled(
                    msg.clone(),
                    Style::default().fg(app.theme.text).bg(bg),
                )],
                Some(Status::Error(msg)) => vec![Span::styled(
                    msg.clone(),
                    Style::default().fg(app.theme.red).bg(bg),
                )],
                None => Vec::new(),
            };
            let staged = app.session.staged_count();
            let hint = if staged > 0 {
                format!("{} staged  {}", staged, NAVIGATE_HINT)
            } else {
                NAVIGATE_HINT.to_string()
            };
            (spans, hint)
        }
    };

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(&hint);
    if content_width + hint_width + 2 <= width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    } else if content_width > width {
        // A long message wins over the hint but must still fit
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        let style = spans.first().map_or(Style::default(), |s| s.style);
        spans = vec![Span::styled(truncate_to_width(&text, width), style)];
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
