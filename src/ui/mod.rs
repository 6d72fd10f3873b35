//! UI rendering module for fishcast
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod day_detail;
pub mod forecast_list;
pub mod help_overlay;
pub mod status;
pub mod widgets;

pub use day_detail::render as render_day_detail;
pub use forecast_list::render_forecast_list;
pub use help_overlay::render as render_help_overlay;
pub use status::{render_loading, render_unavailable};

use fishcast::scoring::ColorBand;
use ratatui::style::Color;

/// Terminal color for a score's color band
pub fn band_color(band: ColorBand) -> Color {
    match band {
        ColorBand::Green => Color::Green,
        ColorBand::Yellow => Color::Yellow,
        ColorBand::Orange => Color::Rgb(255, 165, 0),
        ColorBand::Red => Color::Red,
    }
}
