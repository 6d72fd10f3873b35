//! Background data refresh system
//!
//! Periodically re-fetches the forecast in the background using tokio
//! channels to communicate updates to the main application.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::data::{DailyWeatherObservation, ForecastClient, Location};

/// Messages sent from background refresh to main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// Refresh started
    RefreshStarted,
    /// New observations were fetched
    ForecastUpdated(Vec<DailyWeatherObservation>),
    /// An error occurred during refresh
    RefreshError(String),
    /// Refresh completed
    RefreshCompleted,
}

/// Configuration for refresh intervals
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between forecast refreshes
    pub forecast_interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            forecast_interval: Duration::from_secs(1800), // 30 minutes
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Creates a new RefreshHandle and spawns the background refresh task
    ///
    /// # Arguments
    /// * `config` - Configuration for refresh intervals
    /// * `client` - Client used to fetch the forecast
    /// * `location` - Location to refresh
    /// * `days` - Number of forecast days to fetch
    ///
    /// # Returns
    /// A RefreshHandle that receives updates via the `receiver` channel
    pub fn spawn(
        config: RefreshConfig,
        client: ForecastClient,
        location: Location,
        days: u8,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            let forecast_interval = config.forecast_interval;
            let tx = msg_tx;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(forecast_interval);
                // Skip the first tick (immediate)
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            tracing::debug!(location = location.id, "background refresh tick");
                            let _ = tx.send(RefreshMessage::RefreshStarted).await;

                            let message = match client.fetch_observations(&location, days).await {
                                Ok(observations) => RefreshMessage::ForecastUpdated(observations),
                                Err(e) => {
                                    tracing::warn!(error = %e, "background refresh failed");
                                    RefreshMessage::RefreshError(e.to_string())
                                }
                            };
                            let _ = tx.send(message).await;

                            let _ = tx.send(RefreshMessage::RefreshCompleted).await;
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Checks for pending refresh messages without blocking
///
/// # Arguments
/// * `handle` - The RefreshHandle to check
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
