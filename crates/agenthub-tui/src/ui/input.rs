//! Search bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let pending = app.search_input != app.applied_search;
    let border_color = if pending { Color::Yellow } else { Color::Cyan };

    let block = Block::default()
        .title(" Search agents, tags, integrations (Esc to clear) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(app.search_input.as_str()).style(Style::default().fg(Color::White));
    frame.render_widget(input, inner);

    let x = cursor_x(inner, app.search_input.chars().count());
    frame.set_cursor_position(Position::new(x, inner.y));
}

/// Column for the cursor after `typed` chars, held inside the box.
fn cursor_x(inner: Rect, typed: usize) -> u16 {
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(typed.min(inner.width.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_inside_box() {
        let inner = Rect::new(1, 1, 20, 1);
        assert_eq!(cursor_x(inner, 0), 1);
        assert_eq!(cursor_x(inner, 5), 6);
        assert_eq!(cursor_x(inner, 19), 20);
        assert_eq!(cursor_x(inner, 300), 20);
        assert_eq!(cursor_x(inner, 70_000), 20);

        // collapsed box at the screen edge
        let edge = Rect::new(u16::MAX, 0, 0, 0);
        assert_eq!(cursor_x(edge, 10), u16::MAX);
    }
}
