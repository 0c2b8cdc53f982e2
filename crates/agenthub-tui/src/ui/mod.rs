//! TUI layout compositing: assembles all UI panels.

mod catalog;
mod community;
mod contributors;
mod featured;
mod input;
mod status;
mod switcher;
mod toasts;

use ratatui::prelude::*;

use crate::app::{App, Tab};

/// Render the full TUI layout.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // ┌──────────────────────────────────┐
    // │ Tabs (switcher)                  │
    // ├──────────────────────────────────┤
    // │ Search (marketplace only)        │
    // ├─────────────────┬────────────────┤
    // │ List            │ Detail         │
    // ├─────────────────┴────────────────┤
    // │ Status bar                       │
    // └──────────────────────────────────┘

    let search_height = if app.tab == Tab::Marketplace { 3 } else { 0 };
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // tabs
            Constraint::Length(search_height), // search
            Constraint::Min(10),               // content
            Constraint::Length(1),             // status
        ])
        .split(area);

    switcher::draw(frame, app, main_layout[0]);

    match app.tab {
        Tab::Marketplace => {
            input::draw(frame, app, main_layout[1]);
            catalog::draw(frame, app, main_layout[2]);
        }
        Tab::Community => community::draw(frame, app, main_layout[2]),
        Tab::Featured => featured::draw(frame, app, main_layout[2]),
        Tab::Contributors => contributors::draw(frame, app, main_layout[2]),
    }

    status::draw(frame, app, main_layout[3]);

    // Toasts float over the top-right corner
    toasts::draw(frame, app, area);
}
