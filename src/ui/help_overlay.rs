//! Help overlay listing the key bindings
//!
//! Rows come from [`KEY_BINDINGS`], grouped by the view they apply to.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{KeyContext, KEY_BINDINGS};

const OVERLAY_WIDTH: u16 = 46;
const KEY_COLUMN: usize = 12;

const SECTIONS: [(KeyContext, &str); 3] = [
    (KeyContext::Forecast, "Forecast list"),
    (KeyContext::DayDetail, "Day details"),
    (KeyContext::Anywhere, "Anywhere"),
];

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let lines = help_lines();
    // Borders take one row each
    let height = lines.len() as u16 + 2;
    let overlay_area = centered_rect(OVERLAY_WIDTH, height, frame.area());

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (context, heading) in SECTIONS {
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(
            KEY_BINDINGS
                .iter()
                .filter(|binding| binding.context == context)
                .map(|binding| {
                    Line::from(vec![
                        Span::styled(
                            format!("  {:<width$}", binding.label, width = KEY_COLUMN),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(binding.description),
                    ])
                }),
        );
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Centers a `width` x `height` rect in `area`, shrinking it to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(render).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_help_overlay_renders() {
        let content = render_to_string(80, 24);

        assert!(content.contains("Help"), "Should render help title");
        assert!(content.contains("Forecast list"));
        assert!(content.contains("Day details"));
        assert!(content.contains("Press Esc or ? to close"));
    }

    #[test]
    fn test_every_key_binding_is_listed() {
        let content = render_to_string(80, 30);
        for binding in KEY_BINDINGS {
            assert!(
                content.contains(binding.description),
                "Missing help row: {}",
                binding.description
            );
        }
    }

    #[test]
    fn test_one_row_per_binding() {
        // Heading and blank line per section, plus the closing hint
        let expected = KEY_BINDINGS.len() + SECTIONS.len() * 2 + 1;
        assert_eq!(help_lines().len(), expected);
    }

    #[test]
    fn test_centered_rect_fits_small_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(OVERLAY_WIDTH, 20, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
