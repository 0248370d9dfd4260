use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{PendingEdit, Task, TaskKind};
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the focused menu as one row per task
pub fn render_menu_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let kind = app.menu;
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    // Keep the cursor on screen
    let cursor = app.cursor();
    let mut scroll = app.scroll(kind);
    if cursor < scroll {
        scroll = cursor;
    } else if cursor >= scroll + height {
        scroll = cursor + 1 - height;
    }
    app.set_scroll(kind, scroll);

    let collection = app.session.collection(kind);
    let bg = app.theme.background;
    let lines: Vec<Line> = if collection.is_empty() {
        vec![Line::from(Span::styled(
            format!("  No {}", kind.menu_title()),
            Style::default().fg(app.theme.dim).bg(bg),
        ))]
    } else {
        collection
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(i, task)| task_line(app, task, i == cursor, area.width as usize))
            .collect()
    };

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// `[+-]` for habits (directions it can be scored in), `[x]`/`[ ]` otherwise
fn status_text(task: &Task) -> String {
    match task.kind() {
        TaskKind::Habit => {
            let d = task.directions();
            format!(
                "[{}{}]",
                if d.up { "+" } else { " " },
                if d.down { "-" } else { " " }
            )
        }
        _ if task.completed => "[x]".to_string(),
        _ => "[ ]".to_string(),
    }
}

fn task_line<'a>(app: &App, task: &Task, selected: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let bg = if selected { theme.selection_bg } else { theme.background };
    let base = Style::default().bg(bg);

    let marker = task.pending.marker().unwrap_or(" ");
    let status = status_text(task);

    let mut suffix: Vec<(String, Style)> = Vec::new();
    if let Some(checklist) = task.checklist {
        suffix.push((
            format!(" ({}/{})", checklist.done, checklist.total),
            base.fg(theme.dim),
        ));
    }
    if let Some(due) = task.due_date {
        suffix.push((format!(" {}", due.format("[%d/%m]")), base.fg(theme.yellow)));
    }
    if task.pending == PendingEdit::Edit
        && let Some(draft) = app.session.drafts.get(&task.id)
    {
        suffix.push((format!(" \u{2192} {}", draft), base.fg(theme.cyan)));
    }

    let prefix_width = 1 + display_width(marker) + 1 + display_width(&status) + 1;
    let suffix_width: usize = suffix.iter().map(|(s, _)| display_width(s)).sum();
    let title_budget = width.saturating_sub(prefix_width + suffix_width).max(1);

    let mut title_style = base.fg(if selected { theme.text_bright } else { theme.text });
    if task.pending == PendingEdit::Delete {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    let status_color = if task.completed { theme.green } else { theme.dim };

    let mut spans = vec![
        Span::styled(" ", base),
        Span::styled(
            marker.to_string(),
            base.fg(theme.pending_color(task.pending))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", base),
        Span::styled(status, base.fg(status_color)),
        Span::styled(" ", base),
        Span::styled(truncate_to_width(&task.title, title_budget), title_style),
    ];
    spans.extend(suffix.into_iter().map(|(text, style)| Span::styled(text, style)));

    // Fill the rest of a selected row so the highlight spans the width
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if selected && used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}
