use crate::palette::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Terminal,
};
use std::{thread, time::Duration};
use versus_core::Result;

/// Show a message in a popup for `duration_ms`, or until a key is pressed
pub fn show_message<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    message: &str,
    palette: &Palette,
    duration_ms: u64,
) -> Result<()> {
    terminal.draw(|f| {
        let area = centered_rect(60, 20, f.size());
        f.render_widget(Clear, area);

        let message_box = Paragraph::new(message.to_string())
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent))
                    .title(" versus "),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message_box, area);
    })?;

    // Interruptible by any key press
    for _ in 0..duration_ms / 100 {
        thread::sleep(Duration::from_millis(100));
        if crossterm::event::poll(Duration::from_millis(0))? {
            let _ = crossterm::event::read()?;
            break;
        }
    }

    Ok(())
}

/// A rect of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }
}
