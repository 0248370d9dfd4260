pub mod menu_view;
pub mod overlay;
pub mod stats_bar;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar | task list | stats bar | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tab bar
            Constraint::Min(1),    // content area
            Constraint::Length(1), // stats bar
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);
    menu_view::render_menu_view(frame, app, chunks[1]);
    stats_bar::render_stats_bar(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    // Overlay (rendered on top of everything)
    if app.mode == Mode::Overlay {
        overlay::render_overlay(frame, app, area);
    }
}

/// Rect of `width` x `height` centered in `area`, clipped to it
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
