//! Background tasks
//!
//! Runs the periodic health check and the in-flight itinerary request off the
//! UI loop, using tokio channels to hand results back to the main application.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data::{ItineraryClient, ItineraryError, ItineraryResponse, TripRequest};

/// Default interval between health checks
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Reachability of the itinerary service as shown by the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// No health check has completed yet
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy {
            Connectivity::Connected
        } else {
            Connectivity::Disconnected
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Unknown => "Checking...",
            Connectivity::Connected => "Connected",
            Connectivity::Disconnected => "Disconnected",
        }
    }
}

/// Messages sent from background tasks to the main app
#[derive(Debug)]
pub enum BackgroundMessage {
    /// A health check completed
    Health(Connectivity),
    /// The itinerary request settled
    Itinerary(Result<ItineraryResponse, ItineraryError>),
}

/// Handle for the periodic health check task
///
/// The task stops on `shutdown` and is aborted when the handle is dropped.
pub struct HealthHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

/// Periodic health checker
pub struct HealthMonitor;

impl HealthMonitor {
    /// Spawns the health check task, reporting results on `sender`
    ///
    /// The first check runs immediately, then once per `interval`.
    pub fn spawn(
        client: ItineraryClient,
        interval: Duration,
        sender: mpsc::Sender<BackgroundMessage>,
    ) -> HealthHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let status = Connectivity::from_healthy(client.check_health().await);
                        tracing::debug!(status = status.label(), "Health check completed");
                        if sender.send(BackgroundMessage::Health(status)).await.is_err() {
                            break;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
            tracing::debug!("Health monitor stopped");
        });

        HealthHandle { shutdown_tx, task }
    }
}

impl HealthHandle {
    /// Stops the health check task and waits for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = (&mut self.task).await;
    }
}

impl Drop for HealthHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Runs a single itinerary request in the background
///
/// The result is delivered as `BackgroundMessage::Itinerary`. The request
/// cannot be cancelled; a retry issues a new one.
pub fn spawn_itinerary_request(
    client: ItineraryClient,
    request: TripRequest,
    sender: mpsc::Sender<BackgroundMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.request_itinerary(&request).await;
        if let Err(err) = &result {
            tracing::error!(city = %request.destination, error = %err, "Itinerary request failed");
        }
        if sender.send(BackgroundMessage::Itinerary(result)).await.is_err() {
            tracing::debug!("Itinerary result dropped; receiver closed");
        }
    })
}

/// Checks for a pending background message without blocking
pub fn try_recv(receiver: &mut mpsc::Receiver<BackgroundMessage>) -> Option<BackgroundMessage> {
    receiver.try_recv().ok()
}
