use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{truncate_to_width, wrap_words};

use super::centered_rect;

const BULLET: &str = "\u{2022} ";
const BULLET_WIDTH: usize = 2;

/// Render the open overlay, one bulleted paragraph per entry starting at
/// its scroll position. Headers go on a dim line above their text.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(overlay) = &app.overlay else {
        return;
    };
    let bg = app.theme.background;
    let max_width = area.width.saturating_sub(4);
    let width = match app.overlay_width {
        0 => max_width,
        cap => cap.min(max_width),
    };
    let inner_width = width.saturating_sub(2) as usize;
    let text_width = inner_width.saturating_sub(BULLET_WIDTH).max(1);

    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let header_style = Style::default().fg(app.theme.dim).bg(bg);
    let bullet_style = Style::default().fg(app.theme.purple).bg(bg);
    let mut lines: Vec<Line> = Vec::new();
    for entry in overlay.entries.iter().skip(overlay.scroll) {
        if let Some(header) = &entry.header {
            lines.push(Line::from(Span::styled(
                truncate_to_width(header, inner_width),
                header_style,
            )));
        }
        for (i, row) in wrap_words(&entry.text, text_width).into_iter().enumerate() {
            let lead = if i == 0 { BULLET } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(lead, bullet_style),
                Span::styled(row, text_style),
            ]));
        }
    }

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay_area);

    let title = format!(
        " {} {}/{} ",
        overlay.title,
        overlay.scroll + 1,
        overlay.entries.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::OverlayEntry;
    use crate::tui::render::test_helpers::*;

    fn entry(header: Option<&str>, text: &str) -> OverlayEntry {
        OverlayEntry {
            header: header.map(str::to_string),
            text: text.to_string(),
        }
    }

    fn app_with_drops(drops: &[&str]) -> App {
        let mut app = sample_app();
        app.open_overlay("Drops", drops.iter().map(|d| entry(None, d)).collect());
        app
    }

    #[test]
    fn drops_are_bulleted_in_a_box() {
        let app = app_with_drops(&["You found a Wolf Egg!", "You found Meat!"]);
        let out = render_to_string(40, 10, |frame, area| {
            render_overlay(frame, &app, area);
        });
        assert!(out.contains("Drops 1/2"));
        assert!(out.contains("\u{2022} You found a Wolf Egg!"));
        assert!(out.contains("\u{2022} You found Meat!"));
    }

    #[test]
    fn long_entries_wrap_to_the_width_cap() {
        let mut app = app_with_drops(&["one two three four five six seven eight"]);
        app.overlay_width = 20;
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_overlay(frame, &app, area);
        });
        assert!(out.contains("\u{2022} one two three"));
        assert!(out.contains("  four five six"));
        assert!(out.contains("  seven eight"));
    }

    #[test]
    fn scroll_skips_earlier_entries() {
        let mut app = app_with_drops(&["first", "second"]);
        if let Some(overlay) = app.overlay.as_mut() {
            overlay.scroll = 1;
        }
        let out = render_to_string(40, 10, |frame, area| {
            render_overlay(frame, &app, area);
        });
        assert!(!out.contains("first"));
        assert!(out.contains("Drops 2/2"));
    }

    #[test]
    fn chat_headers_sit_above_their_text() {
        let mut app = sample_app();
        app.open_overlay(
            "Party",
            vec![
                entry(Some("bob, 14/03 09:13"), "see you at the boss"),
                entry(Some("alice, 14/03 09:12"), "hi all"),
            ],
        );
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_overlay(frame, &app, area);
        });
        let lines: Vec<&str> = out.lines().collect();
        let bob = lines.iter().position(|l| l.contains("bob, 14/03 09:13")).unwrap();
        assert!(lines[bob + 1].contains("\u{2022} see you at the boss"));
        assert!(out.contains("Party 1/2"));
        assert!(!lines[bob].contains('\u{2022}'));
    }

    #[test]
    fn nothing_without_an_overlay() {
        let app = sample_app();
        let out = render_to_string(40, 10, |frame, area| {
            render_overlay(frame, &app, area);
        });
        assert!(out.is_empty());
    }
}
