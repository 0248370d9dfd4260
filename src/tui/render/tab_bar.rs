use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::TaskKind;
use crate::tui::app::App;

/// Render the tab bar: one tab per menu with its task count and, when
/// something is staged there, the staged count.
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    for kind in TaskKind::ALL {
        let collection = app.session.collection(kind);
        let is_current = app.menu == kind;
        let style = tab_style(app, is_current);
        let tab_bg = if is_current { app.theme.selection_bg } else { bg };

        spans.push(Span::styled(
            format!(" {} {} ", kind.menu_title(), collection.len()),
            style,
        ));
        let staged = collection.staged_count();
        if staged > 0 {
            spans.push(Span::styled(
                format!("*{} ", staged),
                Style::default().fg(app.theme.purple).bg(tab_bg),
            ));
        }
        spans.push(sep.clone());
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}
