use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render user statistics on the left; attributes and the time of the last
/// update on the right when there is room.
pub fn render_stats_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;
    let stats = &app.session.stats;
    let snap = stats.snapshot();

    let label = Style::default().fg(theme.dim).bg(bg);
    let mut spans = vec![
        Span::styled(" Lvl ", label),
        Span::styled(
            snap.lvl.to_string(),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  HP ", label),
        Span::styled(
            format!("{}/{}", snap.hp, stats.max_health as i64),
            Style::default().fg(theme.red).bg(bg),
        ),
        Span::styled("  EXP ", label),
        Span::styled(
            format!("{}/{}", snap.exp, stats.to_next_level as i64),
            Style::default().fg(theme.yellow).bg(bg),
        ),
        Span::styled("  MP ", label),
        Span::styled(
            format!("{}/{}", snap.mp, stats.max_mp as i64),
            Style::default().fg(theme.blue).bg(bg),
        ),
        Span::styled("  GP ", label),
        Span::styled(snap.gp.to_string(), Style::default().fg(theme.green).bg(bg)),
    ];

    let mut right = Vec::new();
    if let Some(attributes) = app.session.attributes {
        right.push(attributes.to_string());
    }
    if let Some(at) = app.session.last_update {
        right.push(format!("updated {}", at.format("%H:%M")));
    }
    let right = right.join("  ");

    let left_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right_width = display_width(&right);
    if !right.is_empty() && left_width + right_width + 2 <= width {
        let padding = width - left_width - right_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(right, label));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::model::AttributeStats;
    use crate::tui::render::test_helpers::*;

    fn render_bar(app: &App, w: u16) -> String {
        render_to_string(w, 1, |frame, area| render_stats_bar(frame, app, area))
    }

    #[test]
    fn stats_only() {
        let mut app = sample_app();
        app.session.last_update = None;
        assert_eq!(
            render_bar(&app, TERM_W),
            " Lvl 3  HP 50/50  EXP 25/100  MP 10/30  GP 10"
        );
    }

    #[test]
    fn attributes_and_update_time_on_the_right() {
        let mut app = sample_app();
        app.session.last_update = Local.with_ymd_and_hms(2024, 4, 15, 14, 2, 0).single();
        app.session.attributes = Some(AttributeStats {
            strength: 3,
            intelligence: 1,
            perception: 0,
            constitution: 4,
        });
        let out = render_bar(&app, 100);
        assert!(out.starts_with(" Lvl 3  HP 50/50"));
        assert!(out.ends_with("STR: 3 INT: 1 PER: 0 CON: 4  updated 14:02"));
        assert_eq!(display_width(&out), 99);
    }

    #[test]
    fn right_side_dropped_when_narrow() {
        let mut app = sample_app();
        app.session.attributes = Some(AttributeStats::default());
        let out = render_bar(&app, 50);
        assert!(!out.contains("STR"));
        assert!(out.contains("GP 10"));
    }
}
