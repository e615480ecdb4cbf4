//! Background cleanup for the rate limiter store.
//!
//! Expired entries already read as absent, so this loop exists purely to
//! bound memory over long uptimes. It runs until shutdown is signaled.

use crate::limiter::FixedWindowLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

const DEFAULT_TICK_SECS: u64 = 300;

/// Maintenance loop configuration.
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    pub tick_every: Duration,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            tick_every: Duration::from_secs(DEFAULT_TICK_SECS),
        }
    }
}

impl MaintenanceConfig {
    /// Read configuration from the environment.
    ///
    /// `SANDCASTLE_CLEANUP_TICK_SECS` overrides the 5-minute default tick.
    pub fn from_env() -> Self {
        Self {
            tick_every: Duration::from_secs(
                read_env_u64("SANDCASTLE_CLEANUP_TICK_SECS", DEFAULT_TICK_SECS).max(1),
            ),
        }
    }
}

/// Spawn the cleanup loop until shutdown is signaled.
pub fn spawn(limiter: Arc<FixedWindowLimiter>, shutdown: Arc<Notify>) -> JoinHandle<()> {
    spawn_with_config(limiter, shutdown, MaintenanceConfig::from_env())
}

/// Spawn the cleanup loop with an explicit configuration.
pub fn spawn_with_config(
    limiter: Arc<FixedWindowLimiter>,
    shutdown: Arc<Notify>,
    config: MaintenanceConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            "limiter maintenance started: tick={}s",
            config.tick_every.as_secs()
        );
        let mut ticker = tokio::time::interval(config.tick_every);

        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    tracing::info!("limiter maintenance stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = limiter.remove_expired();
                    if removed > 0 {
                        tracing::info!("limiter maintenance removed {removed} expired key(s)");
                    }
                }
            }
        }
    })
}

/// Owned handle over a running maintenance loop.
///
/// Dropping the handle leaves the task running; call [`stop`] for a clean
/// shutdown. Without it a test harness cannot exit cleanly, which is why the
/// lifecycle is explicit rather than tied to process teardown.
///
/// [`stop`]: MaintenanceHandle::stop
pub struct MaintenanceHandle {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl MaintenanceHandle {
    /// Start maintenance for `limiter` using environment configuration.
    pub fn start(limiter: Arc<FixedWindowLimiter>) -> Self {
        Self::start_with_config(limiter, MaintenanceConfig::from_env())
    }

    /// Start maintenance for `limiter` with an explicit configuration.
    pub fn start_with_config(limiter: Arc<FixedWindowLimiter>, config: MaintenanceConfig) -> Self {
        let shutdown = Arc::new(Notify::new());
        let handle = spawn_with_config(limiter, shutdown.clone(), config);
        Self { shutdown, handle }
    }

    /// Signal the loop and wait for it to finish.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.handle.await;
    }
}

fn read_env_u64(name: &str, default_value: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_value)
}
