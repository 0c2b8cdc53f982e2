//! Top contributors table.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["#", "Contributor", "Agents", "Downloads", "Rating"])
        .style(Style::default().fg(Color::Cyan).bold());

    let rows: Vec<Row> = app
        .contributors
        .iter()
        .enumerate()
        .map(|(rank, c)| {
            Row::new(vec![
                format!("{}", rank + 1),
                c.name.clone(),
                c.agent_count.to_string(),
                c.total_downloads.to_string(),
                format!("{:.1}", c.average_rating),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Top Contributors ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(table, area);
}
