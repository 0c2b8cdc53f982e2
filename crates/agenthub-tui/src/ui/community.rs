//! Community discussions: thread list plus the selected thread.

use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use agenthub_core::community::time_ago;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let now = Utc::now();
    let items: Vec<ListItem> = app
        .discussions
        .iter()
        .map(|d| {
            ListItem::new(vec![
                Line::from(Span::styled(d.title.clone(), Style::default().bold())),
                Line::styled(
                    format!(
                        "  {} · {} · ♥ {} · {} replies",
                        d.author,
                        time_ago(d.created_at, now),
                        d.likes,
                        d.replies
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Discussions ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 30, 50)))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.discussion_selected));
    frame.render_stateful_widget(list, layout[0], &mut state);

    let block = Block::default()
        .title(" Thread ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(d) = app.selected_discussion() else {
        frame.render_widget(block, layout[1]);
        return;
    };

    let lines = vec![
        Line::styled(d.title.clone(), Style::default().bold()),
        Line::styled(
            format!("{} · {}", d.category, time_ago(d.created_at, now)),
            Style::default().fg(Color::Magenta),
        ),
        Line::raw(""),
        Line::raw(d.content.clone()),
        Line::raw(""),
        Line::styled(
            format!("♥ {}   {} replies", d.likes, d.replies),
            Style::default().fg(Color::Yellow),
        ),
    ];
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, layout[1]);
}
