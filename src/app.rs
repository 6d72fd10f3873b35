//! Application state management for fishcast
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and state transitions between the forecast list and the
//! day detail view.

use chrono::{DateTime, Local, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use fishcast::cli::StartupConfig;
use fishcast::data::{DailyWeatherObservation, ForecastClient, Location};
use fishcast::forecast::{DayForecast, Forecast, SortMode};
use fishcast::refresh::RefreshMessage;

/// Maximum scroll offset for the detail view
const MAX_SCROLL: u16 = 40;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// List view showing every forecast day
    Forecast,
    /// Detail view for one day (index into the forecast's days)
    DayDetail(usize),
    /// Forecast data could not be fetched
    Unavailable(String),
}

/// Where a key binding applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The forecast list
    Forecast,
    /// The day detail view
    DayDetail,
    /// Both views
    Anywhere,
}

/// A documented key binding, shown in the help overlay
#[derive(Debug)]
pub struct KeyBinding {
    pub context: KeyContext,
    /// Key names as displayed
    pub label: &'static str,
    /// Key codes handled for this binding
    pub codes: &'static [KeyCode],
    pub description: &'static str,
}

/// Every key binding handled by [`App::handle_key`]
pub const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        context: KeyContext::Forecast,
        label: "↑/k, ↓/j",
        codes: &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Down, KeyCode::Char('j')],
        description: "Move selection up/down",
    },
    KeyBinding {
        context: KeyContext::Forecast,
        label: "Enter",
        codes: &[KeyCode::Enter],
        description: "Open day details",
    },
    KeyBinding {
        context: KeyContext::Forecast,
        label: "s",
        codes: &[KeyCode::Char('s')],
        description: "Sort by date / best first",
    },
    KeyBinding {
        context: KeyContext::DayDetail,
        label: "↑/k, ↓/j",
        codes: &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Down, KeyCode::Char('j')],
        description: "Scroll",
    },
    KeyBinding {
        context: KeyContext::DayDetail,
        label: "g",
        codes: &[KeyCode::Char('g')],
        description: "Back to top",
    },
    KeyBinding {
        context: KeyContext::DayDetail,
        label: "Esc",
        codes: &[KeyCode::Esc],
        description: "Back to the list",
    },
    KeyBinding {
        context: KeyContext::Anywhere,
        label: "r",
        codes: &[KeyCode::Char('r')],
        description: "Refresh forecast",
    },
    KeyBinding {
        context: KeyContext::Anywhere,
        label: "?",
        codes: &[KeyCode::Char('?')],
        description: "Toggle this help",
    },
    KeyBinding {
        context: KeyContext::Anywhere,
        label: "q",
        codes: &[KeyCode::Char('q')],
        description: "Quit application",
    },
];

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Location being forecast
    pub location: Location,
    /// Number of forecast days requested
    pub days: u8,
    /// Scored forecast, once loaded
    pub forecast: Option<Forecast>,
    /// Position of the selected row in the current ordering
    pub selected_index: usize,
    /// Ordering of the forecast list
    pub sort_mode: SortMode,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// A fetch is in flight while older data stays on screen
    pub refreshing: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Scroll offset for day detail view
    pub detail_scroll_offset: u16,
    /// Forecast API client
    client: ForecastClient,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self::with_startup_config(StartupConfig::default())
    }

    /// Creates a new App instance with the given startup configuration.
    ///
    /// # Arguments
    /// * `config` - The startup configuration derived from CLI arguments
    pub fn with_startup_config(config: StartupConfig) -> Self {
        Self {
            state: AppState::Loading,
            location: config.location,
            days: config.days,
            forecast: None,
            selected_index: 0,
            sort_mode: config.sort_mode,
            should_quit: false,
            last_refresh: None,
            refresh_requested: false,
            refreshing: false,
            show_help: false,
            detail_scroll_offset: 0,
            client: ForecastClient::new(),
        }
    }

    /// Returns a clone of the API client for background tasks
    pub fn client(&self) -> ForecastClient {
        self.client.clone()
    }

    /// Returns the number of forecast days loaded
    pub fn day_count(&self) -> usize {
        self.forecast.as_ref().map_or(0, Forecast::len)
    }

    /// Day indices in the current list order
    pub fn ordered_days(&self) -> Vec<usize> {
        self.forecast
            .as_ref()
            .map(|f| f.ordered(self.sort_mode))
            .unwrap_or_default()
    }

    /// Index into the forecast's days of the selected row
    pub fn selected_day_index(&self) -> Option<usize> {
        self.ordered_days().get(self.selected_index).copied()
    }

    /// Returns the day at `index` in date order
    pub fn day(&self, index: usize) -> Option<&DayForecast> {
        self.forecast.as_ref()?.days.get(index)
    }

    /// Fetches the forecast and moves to the list, or to the unavailable
    /// state if the data can't be fetched.
    pub async fn load_forecast(&mut self) {
        self.refresh_requested = false;
        match self
            .client
            .fetch_observations(&self.location, self.days)
            .await
        {
            Ok(observations) => self.apply_observations(observations),
            Err(e) => {
                tracing::warn!(error = %e, "forecast unavailable");
                self.refreshing = false;
                // Keep showing stale data if we have any
                if self.forecast.is_none() {
                    self.state = AppState::Unavailable(e.to_string());
                }
            }
        }
    }

    /// Replaces the forecast with freshly fetched observations.
    ///
    /// The selected row and an open detail view follow their date, since the
    /// forecast window moves forward a day after midnight. A detail view
    /// whose date is no longer in the forecast falls back to the list.
    pub fn apply_observations(&mut self, observations: Vec<DailyWeatherObservation>) {
        let selected_date = self
            .selected_day_index()
            .and_then(|index| self.day(index))
            .map(|day| day.observation.date);
        let detail_date = match self.state {
            AppState::DayDetail(index) => self.day(index).map(|day| day.observation.date),
            _ => None,
        };

        let forecast = Forecast::new(self.location, observations, Utc::now());
        tracing::info!(
            days = forecast.len(),
            best = forecast.best_day().map(|d| d.score),
            "forecast scored"
        );

        self.forecast = Some(forecast);
        self.last_refresh = Some(Local::now());
        self.refreshing = false;

        let count = self.day_count();
        let ordered = self.ordered_days();
        let selected_position = selected_date
            .and_then(|date| self.index_of_date(date))
            .and_then(|index| ordered.iter().position(|&i| i == index));
        self.selected_index = match selected_position {
            Some(position) => position,
            None => self.selected_index.min(count.saturating_sub(1)),
        };

        match detail_date.and_then(|date| self.index_of_date(date)) {
            Some(index) => self.state = AppState::DayDetail(index),
            None => {
                if matches!(self.state, AppState::DayDetail(_)) {
                    tracing::debug!("viewed day left the forecast window");
                    self.detail_scroll_offset = 0;
                }
                self.state = AppState::Forecast;
            }
        }
    }

    /// Index in date order of the day falling on `date`
    fn index_of_date(&self, date: NaiveDate) -> Option<usize> {
        self.forecast
            .as_ref()?
            .days
            .iter()
            .position(|day| day.observation.date == date)
    }

    /// Applies a message from the background refresh task
    pub fn handle_refresh_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::ForecastUpdated(observations) => self.apply_observations(observations),
            RefreshMessage::RefreshError(error) => {
                tracing::warn!(%error, "background refresh failed");
            }
            RefreshMessage::RefreshStarted => self.refreshing = self.forecast.is_some(),
            RefreshMessage::RefreshCompleted => self.refreshing = false,
        }
    }

    /// Marks the pending refresh as running so the views can say so.
    ///
    /// Call before awaiting [`App::load_forecast`] for a requested refresh.
    pub fn begin_refresh(&mut self) {
        self.refreshing = self.forecast.is_some();
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// The bindings are listed in [`KEY_BINDINGS`]. Esc also quits from the
    /// list, and only `q` works while loading.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Unavailable(_) => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.state = AppState::Loading;
                    self.refresh_requested = true;
                }
                _ => {}
            },
            AppState::Forecast => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    if let Some(index) = self.selected_day_index() {
                        self.state = AppState::DayDetail(index);
                    }
                }
                KeyCode::Char('s') => {
                    self.toggle_sort_mode();
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::DayDetail(_) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.detail_scroll_offset = 0;
                    self.state = AppState::Forecast;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.scroll_down();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.scroll_up();
                }
                KeyCode::Char('g') => {
                    self.detail_scroll_offset = 0;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Switches list ordering, keeping the same day selected
    fn toggle_sort_mode(&mut self) {
        let selected_day = self.selected_day_index();
        self.sort_mode = self.sort_mode.toggle();
        if let Some(day) = selected_day {
            if let Some(position) = self.ordered_days().iter().position(|&i| i == day) {
                self.selected_index = position;
            }
        }
    }

    /// Scrolls up in the detail view, stopping at 0
    pub fn scroll_up(&mut self) {
        self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
    }

    /// Scrolls down in the detail view, up to a fixed maximum
    pub fn scroll_down(&mut self) {
        if self.detail_scroll_offset < MAX_SCROLL {
            self.detail_scroll_offset += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
