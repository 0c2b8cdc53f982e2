//! Notification toasts, newest at the bottom.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use agenthub_core::notify::NotificationKind;

use crate::app::App;

const WIDTH: u16 = 48;
const HEIGHT: u16 = 4;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < WIDTH + 2 {
        return;
    }

    let x = area.x + area.width - WIDTH - 1;
    let mut y = area.y + 1;
    for toast in &app.toasts {
        if y + HEIGHT > area.y + area.height {
            break;
        }
        let color = match toast.kind {
            NotificationKind::Info => Color::Blue,
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let rect = Rect::new(x, y, WIDTH, HEIGHT);
        let paragraph = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {} ", toast.kind))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(Clear, rect);
        frame.render_widget(paragraph, rect);
        y += HEIGHT;
    }
}
