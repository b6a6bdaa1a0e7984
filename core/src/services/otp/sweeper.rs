//! Background sweep of expired passcode records
//!
//! The sweeper is owned by the process lifecycle: `start` spawns the
//! interval task and hands back a [`SweeperHandle`] whose `stop` shuts it
//! down, so tests and shutdown paths get a clean teardown instead of a
//! free-running timer. Sweep failures are logged and isolated; they never
//! take the host process down.

use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::repositories::otp::OtpStore;

use super::service::OtpService;
use super::traits::SmsChannel;

/// Configuration for the expiry sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300, // every 5 minutes
            enabled: true,
        }
    }
}

/// Periodic task purging expired records from the subject store
pub struct OtpSweeper<S: SmsChannel, R: OtpStore> {
    service: Arc<OtpService<S, R>>,
    config: SweeperConfig,
}

impl<S, R> OtpSweeper<S, R>
where
    S: SmsChannel + 'static,
    R: OtpStore + 'static,
{
    pub fn new(service: Arc<OtpService<S, R>>, config: SweeperConfig) -> Self {
        Self { service, config }
    }

    /// Spawn the sweep loop and return its lifecycle handle.
    ///
    /// The first tick fires immediately, then every `interval_seconds`.
    pub fn start(self) -> SweeperHandle {
        let shutdown = Arc::new(Notify::new());

        if !self.config.enabled {
            warn!("OTP expiry sweeper is disabled");
            return SweeperHandle {
                handle: None,
                shutdown,
            };
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);
        let stop_signal = Arc::clone(&shutdown);

        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "OTP expiry sweeper started"
            );

            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.service.sweep_expired().await {
                            Ok(0) => debug!("Sweep found no expired passcodes"),
                            Ok(removed) => info!(removed, "Purged expired passcodes"),
                            Err(e) => error!(error = %e, "Sweep cycle failed"),
                        }
                    }
                    _ = stop_signal.notified() => {
                        info!("OTP expiry sweeper stopping");
                        break;
                    }
                }
            }
        });

        SweeperHandle {
            handle: Some(handle),
            shutdown,
        }
    }
}

/// Handle for stopping a running sweeper
pub struct SweeperHandle {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<Notify>,
}

impl SweeperHandle {
    /// Signal the sweep loop to stop and wait for it to finish.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        if let Some(handle) = self.handle {
            let _ = handle.await;
        }
    }
}
