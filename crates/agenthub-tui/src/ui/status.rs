//! Status bar: result count, active filters and key hints.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Tab};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let spans = match app.tab {
        Tab::Marketplace => vec![
            Span::styled(
                format!(" Showing {} of {} ", app.results.len(), app.total),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw(format!(
                " {} | {} | {} ",
                app.category_label(),
                app.difficulty_label(),
                app.sort.label()
            )),
            Span::styled(
                " ^K category  ^D level  ^S sort  ^R refresh  ^Q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ],
        Tab::Community => vec![
            Span::styled(
                format!(" {} discussions ", app.discussions.len()),
                Style::default().fg(Color::Black).bg(Color::Magenta),
            ),
            Span::styled(
                " ^L like  Tab switch  ^Q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ],
        Tab::Featured => vec![
            Span::styled(
                format!(" {} featured picks ", app.featured.len()),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::styled(" Tab switch  ^Q quit", Style::default().fg(Color::DarkGray)),
        ],
        Tab::Contributors => vec![
            Span::styled(
                format!(" Top {} contributors ", app.contributors.len()),
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            Span::styled(" Tab switch  ^Q quit", Style::default().fg(Color::DarkGray)),
        ],
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
