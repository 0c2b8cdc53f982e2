//! Top-level tab switcher.

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use crate::app::{App, Tab};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            let count = match tab {
                Tab::Marketplace => app.total,
                Tab::Community => app.discussions.len(),
                Tab::Featured => app.featured.len(),
                Tab::Contributors => app.contributors.len(),
            };
            format!(" {} ({}) ", tab.title(), count)
        })
        .collect();

    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .divider("|");

    frame.render_widget(tabs, area);
}
