//! Featured picks: the leading catalog entries, independent of search and filters.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::app::App;

use super::catalog::{difficulty_color, draw_detail};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = app
        .featured
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("★ ", Style::default().fg(Color::Yellow)),
                    Span::styled(entry.name.clone(), Style::default().bold()),
                ]),
                Line::from(Span::styled(
                    format!("  {}", entry.description),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("  {:<12}", entry.difficulty.as_str()),
                        Style::default().fg(difficulty_color(entry.difficulty)),
                    ),
                    Span::styled(
                        format!("★ {:.1}  ↓ {}", entry.rating, entry.downloads),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Featured Agents ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.featured_selected));
    frame.render_stateful_widget(list, layout[0], &mut state);

    draw_detail(frame, app.selected_featured(), layout[1]);
}
