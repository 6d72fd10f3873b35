//! Full-screen status messages shown before a forecast is available

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use fishcast::data::Location;

/// Centers a block of `height` rows vertically
fn centered_rows(area: Rect, height: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}

/// Renders a loading message while the forecast is being fetched
pub fn render_loading(frame: &mut Frame, location: &Location) {
    let area = centered_rows(frame.area(), 2);

    let lines = vec![
        Line::from(Span::styled(
            "Loading fishing forecast...",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            location.name.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Renders the message shown when the forecast could not be fetched
pub fn render_unavailable(frame: &mut Frame, message: &str) {
    let area = centered_rows(frame.area(), 5);

    let lines = vec![
        Line::from(Span::styled(
            "Forecast unavailable",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" Retry  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishcast::data::default_location;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_loading_shows_location() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| render_loading(frame, &default_location()))
            .unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("Loading fishing forecast"));
        assert!(content.contains("Miami"));
    }

    #[test]
    fn test_unavailable_shows_reason_and_retry() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| render_unavailable(frame, "marine API returned HTTP 503"))
            .unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("Forecast unavailable"));
        assert!(content.contains("HTTP 503"));
        assert!(content.contains("Retry"));
    }
}
