//! Day detail screen UI
//!
//! Renders the detailed view for a single forecast day: the score with its
//! per-factor breakdown, tips, the moon phase and the full set of conditions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fishcast::forecast::DayForecast;
use fishcast::scoring::{
    classify_score, describe_cloud_cover, describe_pressure, describe_rain_probability,
    describe_visibility, TipKind, BASE_SCORE,
};

use crate::app::App;
use crate::ui::band_color;
use crate::ui::forecast_list::refreshing_label;

mod colors {
    use ratatui::style::Color;

    /// Section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Factor that raised the score
    pub const POSITIVE: Color = Color::Green;
    /// Factor that lowered the score
    pub const NEGATIVE: Color = Color::Red;
    /// Factor with no effect
    pub const NEUTRAL: Color = Color::DarkGray;
    /// Caution tips
    pub const WARNING: Color = Color::Yellow;
}

/// 16-point compass names, starting at north
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Converts a bearing in degrees to a compass point
fn compass_point(degrees: f64) -> &'static str {
    let sector = (degrees.rem_euclid(360.0) / 22.5).round() as usize % 16;
    COMPASS_POINTS[sector]
}

/// Renders the day detail screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
/// * `day_index` - Index of the day in date order
pub fn render(frame: &mut Frame, app: &App, day_index: usize) {
    let area = frame.area();

    let Some(day) = app.day(day_index) else {
        render_no_data(frame, area);
        return;
    };

    let title = format!(
        " {} \u{00B7} {} ",
        day.observation.date.format("%A, %B %-d, %Y"),
        app.location.name
    );
    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Line::from(vec![
            Span::styled(
                title,
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(refreshing_label(app), Style::default().fg(Color::Yellow)),
        ]));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content area (scrollable)
            Constraint::Length(1), // Help text (fixed)
        ])
        .split(inner_area);

    let lines = build_detail_lines(day);

    // Clamp scroll so the last line stays on screen
    let content_height = lines.len() as u16;
    let max_scroll = content_height.saturating_sub(chunks[0].height);
    let scroll_offset = app.detail_scroll_offset.min(max_scroll);

    frame.render_widget(Paragraph::new(lines).scroll((scroll_offset, 0)), chunks[0]);

    if scroll_offset > 0 {
        render_scroll_indicator(frame, chunks[0], "\u{25B2} more", false);
    }
    if scroll_offset < max_scroll {
        render_scroll_indicator(frame, chunks[0], "\u{25BC} more", true);
    }

    render_help_text(frame, chunks[1]);
}

/// Shown when the requested day no longer exists after a refresh
fn render_no_data(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            "No data for this day",
            Style::default().fg(colors::NEUTRAL),
        )),
        Line::from(Span::styled(
            "Press Esc to go back",
            Style::default().fg(colors::SECONDARY),
        )),
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}

/// Renders a "more" marker in the top or bottom right corner
fn render_scroll_indicator(frame: &mut Frame, area: Rect, text: &'static str, bottom: bool) {
    if area.width < 10 || area.height == 0 {
        return;
    }
    let y = if bottom {
        area.y + area.height - 1
    } else {
        area.y
    };
    let indicator_area = Rect {
        x: area.x + area.width.saturating_sub(8),
        y,
        width: 8,
        height: 1,
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(colors::SECONDARY),
    )));
    frame.render_widget(paragraph, indicator_area);
}

fn section_header(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    ))
}

/// A "label: value (note)" line used throughout the conditions section
fn field_line(label: &'static str, value: String, note: Option<String>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("  {:<14}", label), Style::default().fg(colors::SECONDARY)),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ];
    if let Some(note) = note {
        spans.push(Span::styled(
            format!("  {}", note),
            Style::default().fg(colors::SECONDARY),
        ));
    }
    Line::from(spans)
}

/// One row of the score breakdown, colored by the sign of the contribution
fn factor_line(label: &'static str, points: f64) -> Line<'static> {
    let color = if points > 0.0 {
        colors::POSITIVE
    } else if points < 0.0 {
        colors::NEGATIVE
    } else {
        colors::NEUTRAL
    };
    Line::from(vec![
        Span::styled(format!("  {:<14}", label), Style::default().fg(colors::SECONDARY)),
        Span::styled(format!("{:+.1}", points), Style::default().fg(color)),
    ])
}

/// Builds every line of the scrollable detail content
fn build_detail_lines(day: &DayForecast) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.extend(build_score_lines(day));
    lines.push(Line::from(""));
    lines.extend(build_tip_lines(day));
    lines.push(Line::from(""));
    lines.extend(build_moon_lines(day));
    lines.push(Line::from(""));
    lines.extend(build_conditions_lines(day));
    lines
}

fn build_score_lines(day: &DayForecast) -> Vec<Line<'static>> {
    let color = band_color(day.class.band);
    let breakdown = &day.breakdown;

    vec![
        Line::from(vec![
            Span::styled("Fishing Score: ", Style::default().fg(colors::PRIMARY)),
            Span::styled(
                format!("{}/10", day.score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", day.class.label.as_str()),
                Style::default().fg(color),
            ),
        ]),
        Line::from(""),
        section_header("SCORE BREAKDOWN"),
        Line::from(vec![
            Span::styled(format!("  {:<14}", "Base"), Style::default().fg(colors::SECONDARY)),
            Span::styled(format!("{:.1}", BASE_SCORE), Style::default().fg(colors::PRIMARY)),
        ]),
        factor_line("Moon", breakdown.moon),
        factor_line("Temperature", breakdown.temperature),
        factor_line("Wind", breakdown.wind),
        factor_line("Precipitation", breakdown.precipitation),
        factor_line("Waves", breakdown.waves),
        factor_line("Clouds", breakdown.clouds),
        Line::from(vec![
            Span::styled(format!("  {:<14}", "Total"), Style::default().fg(colors::SECONDARY)),
            Span::styled(
                format!("{:.1} -> {}", breakdown.raw(), day.score),
                Style::default().fg(color),
            ),
        ]),
    ]
}

fn build_tip_lines(day: &DayForecast) -> Vec<Line<'static>> {
    let mut lines = vec![section_header("TIPS")];
    let tips = day.tips();

    if tips.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nothing stands out today",
            Style::default().fg(colors::NEUTRAL),
        )));
    }

    for tip in tips {
        let (marker, color) = match tip.kind {
            TipKind::Success => ("\u{2713}", colors::POSITIVE), // ✓
            TipKind::Warning => ("\u{26A0}", colors::WARNING),  // ⚠
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", marker), Style::default().fg(color)),
            Span::styled(tip.message, Style::default().fg(colors::PRIMARY)),
        ]));
    }

    lines
}

fn build_moon_lines(day: &DayForecast) -> Vec<Line<'static>> {
    let moon = &day.moon;
    let moon_class = classify_score(moon.moon_score);

    vec![
        section_header("MOON"),
        Line::from(vec![
            Span::raw(format!("  {}  ", moon.icon)),
            Span::styled(
                moon.name,
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        field_line("Illumination", format!("{}%", moon.illumination_pct), None),
        Line::from(vec![
            Span::styled(
                format!("  {:<14}", "Moon score"),
                Style::default().fg(colors::SECONDARY),
            ),
            Span::styled(
                format!("{}/10 {}", moon.moon_score, moon_class.label.as_str()),
                Style::default().fg(band_color(moon_class.band)),
            ),
        ]),
    ]
}

fn build_conditions_lines(day: &DayForecast) -> Vec<Line<'static>> {
    let obs = &day.observation;

    vec![
        section_header("CONDITIONS"),
        field_line(
            "Temperature",
            format!("{:.0}\u{00B0}F", obs.temperature_f),
            Some(format!("feels like {:.0}\u{00B0}F", obs.apparent_temperature_f)),
        ),
        field_line(
            "Wind",
            format!("{:.0} kt", obs.wind_speed_kt),
            Some(format!(
                "from {} ({:.0}\u{00B0})",
                compass_point(obs.wind_direction_deg),
                obs.wind_direction_deg
            )),
        ),
        field_line(
            "Precipitation",
            format!("{:.2} in", obs.precipitation_in),
            None,
        ),
        field_line(
            "Rain chance",
            format!("{:.0}%", obs.precipitation_probability_pct),
            Some(describe_rain_probability(obs.precipitation_probability_pct).to_string()),
        ),
        field_line(
            "Humidity",
            format!("{:.0}%", obs.relative_humidity_pct),
            None,
        ),
        field_line(
            "Waves",
            format!("{:.1} ft", obs.wave_height_ft),
            Some(format!("period {:.0} s", obs.wave_period_s)),
        ),
        field_line(
            "Cloud cover",
            format!("{:.0}%", obs.cloud_cover_pct),
            Some(describe_cloud_cover(obs.cloud_cover_pct).to_string()),
        ),
        field_line(
            "Visibility",
            format!("{:.1} km", obs.visibility_m / 1000.0),
            Some(describe_visibility(obs.visibility_m).to_string()),
        ),
        field_line(
            "Pressure",
            format!("{:.0} hPa", obs.surface_pressure_hpa),
            Some(describe_pressure(obs.surface_pressure_hpa).to_string()),
        ),
    ]
}

/// Renders the fixed help text at the bottom
fn render_help_text(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
