//! Score sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use fishcast::scoring::{MAX_SCORE, MIN_SCORE};

/// Block characters for different score levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A sparkline widget showing daily fishing scores, one cell per day
pub struct ScoreSparkline<'a> {
    /// Scores in date order
    scores: &'a [u8],
    /// Highlighted day (index into scores)
    marker: Option<usize>,
    /// Style for the sparkline
    style: Style,
    /// Style for the highlighted day
    marker_style: Style,
}

impl<'a> ScoreSparkline<'a> {
    pub fn new(scores: &'a [u8]) -> Self {
        Self {
            scores,
            marker: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    pub fn marker(mut self, index: usize) -> Self {
        self.marker = Some(index);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn score_to_block(&self, score: u8) -> char {
        let span = (MAX_SCORE - MIN_SCORE) as f64;
        let normalized = (score.saturating_sub(MIN_SCORE) as f64 / span).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for ScoreSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;

        for (i, score) in self.scores.iter().take(width).enumerate() {
            let block = self.score_to_block(*score);
            let x = area.x + i as u16;

            let style = if self.marker == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}
