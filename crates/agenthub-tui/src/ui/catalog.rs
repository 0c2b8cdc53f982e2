//! Marketplace results list and the detail pane for the selected entry.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use agenthub_core::types::{category_name, CatalogEntry, Difficulty};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_list(frame, app, layout[0]);
    draw_detail(frame, app.selected_entry(), layout[1]);
}

pub(super) fn difficulty_color(level: Difficulty) -> Color {
    match level {
        Difficulty::Beginner => Color::Green,
        Difficulty::Intermediate => Color::Yellow,
        Difficulty::Advanced => Color::Red,
    }
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Agents ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.results.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let empty = Paragraph::new("No agents found. Try adjusting your search or filters.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(entry.name.clone(), Style::default().bold())),
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
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

pub(super) fn draw_detail(frame: &mut Frame, entry: Option<&CatalogEntry>, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(entry) = entry else {
        frame.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::Cyan);
    let mut lines = vec![
        Line::styled(entry.name.clone(), Style::default().bold()),
        Line::styled(
            format!(
                "{} · by {} · updated {}",
                category_name(&entry.category).unwrap_or(entry.category.as_str()),
                entry.author.name,
                entry.last_updated
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
        Line::raw(entry.description.clone()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Rating: ", label),
            Span::raw(format!("{:.1} ({} reviews)  ", entry.rating, entry.reviews)),
            Span::styled("Downloads: ", label),
            Span::raw(entry.downloads.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Difficulty: ", label),
            Span::styled(
                entry.difficulty.as_str(),
                Style::default().fg(difficulty_color(entry.difficulty)),
            ),
            Span::styled("  Nodes: ", label),
            Span::raw(entry.node_count.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Capabilities: ", label),
            Span::raw(entry.capabilities.join(", ")),
        ]),
        Line::from(vec![
            Span::styled("Integrations: ", label),
            Span::raw(entry.integrations.join(", ")),
        ]),
        Line::from(vec![
            Span::styled("Requirements: ", label),
            Span::raw(entry.requirements.clone()),
        ]),
        Line::from(vec![
            Span::styled("Tags: ", label),
            Span::styled(
                entry.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![Span::styled("GitHub: ", label), Span::raw(entry.github_url.clone())]),
    ];
    if let Some(demo) = &entry.demo_url {
        lines.push(Line::from(vec![
            Span::styled("Demo: ", label),
            Span::raw(demo.clone()),
        ]));
    }
    lines.push(Line::styled(
        format!("Source: {}", entry.source),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
