use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Checklist, Directions, Task, TaskKind, UiConfig};
use crate::ops::test_helpers::session_with;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// Two habits, a daily with a checklist and two to-dos
pub fn sample_app() -> App {
    let mut daily = Task::new("d1", TaskKind::Daily, "Stretch");
    daily.checklist = Some(Checklist { done: 1, total: 3 });
    let mut todo = Task::new("t1", TaskKind::Todo, "Taxes");
    todo.due_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 15);
    let session = session_with(vec![
        Task::habit("h1", "Floss", Directions::both()),
        Task::habit("h2", "Junk food", Directions { up: false, down: true }),
        daily,
        todo,
        Task::new("t2", TaskKind::Todo, "Laundry"),
    ]);
    App::new(session, &UiConfig::default())
}
