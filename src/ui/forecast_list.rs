//! Forecast list screen rendering
//!
//! Renders the main view: one row per forecast day with its fishing score,
//! moon phase and headline conditions, under a header that names the location
//! and highlights the best day.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fishcast::forecast::DayForecast;

use crate::app::App;
use crate::ui::band_color;
use crate::ui::widgets::ScoreSparkline;

/// Color for air temperature in Fahrenheit
fn temperature_color(temp_f: f64) -> Color {
    if temp_f >= 90.0 {
        Color::Red
    } else if temp_f >= 80.0 {
        Color::LightRed
    } else if temp_f >= 60.0 {
        Color::Green
    } else if temp_f >= 50.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Header cue shown while a refresh runs over the current data
pub fn refreshing_label(app: &App) -> &'static str {
    if app.refreshing {
        "  \u{27F3} Refreshing\u{2026}"
    } else {
        ""
    }
}

/// Formats a day's date for the list, e.g. "Tue Jul 16"
fn format_day(day: &DayForecast) -> String {
    day.observation.date.format("%a %b %d").to_string()
}

/// Renders the forecast list screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing the forecast and selection
pub fn render_forecast_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(3),    // Day list
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_help(frame, chunks[2], app);
}

/// Renders the header with location, best day and the score trend
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let separator = "─".repeat(width.saturating_sub(2));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "FISHCAST",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(app.location.name, Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(
                app.location.coordinates_label(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(refreshing_label(app), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    match app.forecast.as_ref().and_then(|f| f.best_day()) {
        Some(best) => lines.push(Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled("Best day: ", Style::default().fg(Color::White)),
            Span::styled(
                format_day(best),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/10 {}", best.score, best.class.label.as_str()),
                Style::default().fg(band_color(best.class.band)),
            ),
            Span::styled(
                format!("  {} {}", best.moon.icon, best.moon.name),
                Style::default().fg(Color::Gray),
            ),
        ])),
        None => lines.push(Line::from(Span::styled(
            "No forecast days available",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(Span::styled(
        "Trend: ",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), area);

    // Sparkline sits after the "Trend: " label on the last header row
    if let Some(forecast) = &app.forecast {
        if area.height >= 4 && area.width > 7 {
            let scores = forecast.scores();
            let spark_area = Rect {
                x: area.x + 7,
                y: area.y + 3,
                width: area.width - 7,
                height: 1,
            };
            // Trend takes the color of the best day's band
            let trend_color = forecast
                .best_day()
                .map_or(Color::Cyan, |best| band_color(best.class.band));
            let mut sparkline =
                ScoreSparkline::new(&scores).style(Style::default().fg(trend_color));
            if let Some(index) = app.selected_day_index() {
                sparkline = sparkline.marker(index);
            }
            frame.render_widget(sparkline, spark_area);
        }
    }
}

/// Builds one list row for a forecast day
fn build_day_line(day: &DayForecast, is_selected: bool) -> Line<'static> {
    let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

    let date_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let score_color = band_color(day.class.band);
    let obs = &day.observation;

    // Format: "▸ Tue Jul 16 10/10 Excellent 🌔 Waxing Gibbous   36%  72°F   5 kt 0.00 in  1.0 ft"
    Line::from(vec![
        Span::styled(cursor, cursor_style),
        Span::styled(format!("{:<11}", format_day(day)), date_style),
        Span::styled(
            format!("{:>5}", format!("{}/10", day.score)),
            Style::default().fg(score_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:<10}", day.class.label.as_str()),
            Style::default().fg(score_color),
        ),
        Span::raw(format!("{} ", day.moon.icon)),
        Span::styled(
            format!("{:<16}", day.moon.name),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("{:>3}%", day.moon.illumination_pct),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:>4.0}\u{00B0}F", obs.temperature_f),
            Style::default().fg(temperature_color(obs.temperature_f)),
        ),
        Span::styled(
            format!("{:>4.0} kt", obs.wind_speed_kt),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:>5.2} in", obs.precipitation_in),
            Style::default().fg(Color::Blue),
        ),
        Span::styled(
            format!("{:>5.1} ft", obs.wave_height_ft),
            Style::default().fg(Color::Cyan),
        ),
    ])
}

/// Renders the day list content
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " {}-Day Forecast \u{00B7} {} ",
        app.day_count(),
        app.sort_mode.label()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(forecast) = &app.forecast else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let lines: Vec<Line> = app
        .ordered_days()
        .into_iter()
        .enumerate()
        .map(|(position, index)| {
            build_day_line(&forecast.days[index], position == app.selected_index)
        })
        .collect();

    // Keep the selection visible on short terminals
    let visible = area.height.saturating_sub(2) as usize;
    let offset = if visible > 0 && app.selected_index >= visible {
        (app.selected_index + 1 - visible) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

/// Renders the help text at the bottom of the screen with data freshness
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details  "),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::raw(" Sort  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Data: {}m ago", mins_ago)
        } else {
            format!(" │ Data: {}h ago", elapsed.num_hours())
        };
        help_spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use chrono::NaiveDate;
    use fishcast::data::DailyWeatherObservation;
    use fishcast::forecast::SortMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn observation(day: u32, wind: f64, waves: f64) -> DailyWeatherObservation {
        let mut obs =
            DailyWeatherObservation::with_defaults(NaiveDate::from_ymd_opt(2024, 7, day).unwrap());
        obs.temperature_f = 72.0;
        obs.wind_speed_kt = wind;
        obs.wave_height_ft = waves;
        obs
    }

    /// Helper to create an app with a small loaded forecast
    fn create_test_app() -> App {
        let mut app = App::new();
        app.apply_observations(vec![
            observation(15, 25.0, 6.0),
            observation(16, 5.0, 1.0),
            observation(17, 12.0, 2.5),
        ]);
        app
    }

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_forecast_list(frame, app))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_location_and_best_day() {
        let app = create_test_app();
        let content = render_to_string(&app, 100, 24);

        assert!(content.contains("FISHCAST"));
        assert!(content.contains("Miami, FL"));
        assert!(content.contains("Best day:"));
        assert!(content.contains("Tue Jul 16"));
    }

    #[test]
    fn test_rows_show_scores_and_labels() {
        let app = create_test_app();
        let content = render_to_string(&app, 100, 24);

        assert!(content.contains("10/10"));
        assert!(content.contains("Excellent"));
        assert!(content.contains("4/10"));
        assert!(content.contains("Fair"));
        assert!(content.contains("Waxing Gibbous"));
        // 2024-07-15 is 33% through the cycle
        assert!(content.contains(" 33%"));
    }

    #[test]
    fn test_selected_item_is_highlighted() {
        let app = create_test_app();
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("\u{25B8}"), "Selected row should have cursor");
    }

    #[test]
    fn test_title_shows_day_count_and_sort_mode() {
        let mut app = create_test_app();
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("3-Day Forecast"));
        assert!(content.contains("By date"));

        app.sort_mode = SortMode::Ranked;
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("Best first"));
    }

    #[test]
    fn test_sparkline_rendered_in_header() {
        let app = create_test_app();
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("Trend:"));
        assert!(content.contains('█'), "Best day should be a full block");
    }

    #[test]
    fn test_help_text_is_rendered() {
        let app = create_test_app();
        let content = render_to_string(&app, 120, 24);
        assert!(content.contains("Navigate"));
        assert!(content.contains("Sort"));
        assert!(content.contains("Data: just now"));
    }

    #[test]
    fn test_empty_app_renders_without_panic() {
        let app = App::new();
        let content = render_to_string(&app, 80, 24);
        assert!(content.contains("No forecast days available"));
    }

    #[test]
    fn test_short_terminal_keeps_selection_visible() {
        let mut app = create_test_app();
        app.selected_index = 2;
        // Room for a single list row
        let content = render_to_string(&app, 100, 8);
        assert!(content.contains("Wed Jul 17"));
        assert!(content.contains("\u{25B8}"));
    }

    #[test]
    fn test_temperature_colors() {
        assert_eq!(temperature_color(95.0), Color::Red);
        assert_eq!(temperature_color(85.0), Color::LightRed);
        assert_eq!(temperature_color(72.0), Color::Green);
        assert_eq!(temperature_color(55.0), Color::Cyan);
        assert_eq!(temperature_color(40.0), Color::Blue);
    }

    #[test]
    fn test_refreshing_cue_in_header() {
        let mut app = create_test_app();
        let content = render_to_string(&app, 100, 24);
        assert!(!content.contains("Refreshing"));

        app.begin_refresh();
        let content = render_to_string(&app, 100, 24);
        assert!(content.contains("Refreshing"));
    }

    #[test]
    fn test_sparkline_uses_best_day_color() {
        let app = create_test_app();
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_forecast_list(frame, &app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        // Trend cells start after "Trend: " on the last header row
        assert_eq!(buffer[(7, 3)].fg, Color::Yellow, "Selected day is marked");
        assert_eq!(buffer[(8, 3)].fg, Color::Green, "Best day is Excellent");
    }
}
