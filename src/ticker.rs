//! Periodic dashboard refresh on a background thread.
//!
//! The thread owns the [`DashboardState`]; consumers only ever see cloned
//! snapshots. Only the newest unread snapshot is kept: each tick replaces
//! whatever the consumer has not picked up yet. Dropping the ticker stops
//! and joins the thread.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dashboard::{DashboardRules, DashboardState};
use crate::traits::RandomSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    pub interval: Duration,
    pub rules: DashboardRules,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            rules: DashboardRules::default(),
        }
    }
}

/// State after `tick` refreshes, counting from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: DashboardState,
}

#[derive(Default)]
struct LatestSlot {
    snapshot: Mutex<Option<Snapshot>>,
    ready: Condvar,
}

impl LatestSlot {
    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.snapshot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, snapshot: Snapshot) {
        *self.lock() = Some(snapshot);
        self.ready.notify_all();
    }
}

pub struct RefreshTicker {
    slot: Arc<LatestSlot>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTicker {
    /// Starts ticking `state` every `config.interval`.
    pub fn start<R>(config: TickerConfig, state: DashboardState, mut rng: R) -> io::Result<Self>
    where
        R: RandomSource + Send + 'static,
    {
        let slot = Arc::new(LatestSlot::default());
        let (stop, stop_rx) = mpsc::channel::<()>();
        let interval = config.interval;

        let publisher = Arc::clone(&slot);
        let handle = thread::Builder::new()
            .name("dashboard-ticker".to_string())
            .spawn(move || {
                let mut state = state;
                let mut tick = 0u64;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            state.tick(&config.rules, &mut rng);
                            tick += 1;
                            publisher.publish(Snapshot {
                                tick,
                                state: state.clone(),
                            });
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!(ticks = tick, "dashboard ticker stopped");
            })?;

        info!(interval_ms = interval.as_millis() as u64, "dashboard ticker started");
        Ok(Self {
            slot,
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Takes the newest snapshot not yet consumed.
    pub fn latest(&self) -> Option<Snapshot> {
        self.slot.lock().take()
    }

    /// Waits up to `timeout` for a snapshot and takes it.
    pub fn wait_latest(&self, timeout: Duration) -> Option<Snapshot> {
        let guard = self.slot.lock();
        let (mut guard, _) = self
            .slot
            .ready
            .wait_timeout_while(guard, timeout, |snapshot| snapshot.is_none())
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.take()
    }

    /// Stops the thread and waits for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn every(millis: u64) -> TickerConfig {
        TickerConfig {
            interval: Duration::from_millis(millis),
            ..TickerConfig::default()
        }
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(TickerConfig::default().interval, Duration::from_secs(5));
    }

    #[test]
    fn test_publishes_snapshots() {
        let initial = DashboardState::default();
        let ticker =
            RefreshTicker::start(every(5), initial.clone(), StdRng::seed_from_u64(1)).unwrap();

        let snapshot = ticker.wait_latest(Duration::from_secs(5)).unwrap();
        assert!(snapshot.tick >= 1);
        let shifted = snapshot.tick.min(12) as usize;
        assert_eq!(
            snapshot.state.active_contracts[..12 - shifted],
            initial.active_contracts[shifted..]
        );
        ticker.stop();
    }

    #[test]
    fn test_unread_snapshots_are_replaced() {
        let rng = StdRng::seed_from_u64(3);
        let ticker = RefreshTicker::start(every(1), DashboardState::default(), rng).unwrap();
        thread::sleep(Duration::from_millis(300));

        let newest = ticker.latest().expect("a snapshot after 300ms");
        assert!(newest.tick > 1, "older snapshots should have been replaced");
        if let Some(next) = ticker.latest() {
            assert!(next.tick > newest.tick);
        }
        ticker.stop();
    }

    #[test]
    fn test_latest_is_empty_before_first_tick() {
        let ticker = RefreshTicker::start(
            TickerConfig::default(),
            DashboardState::default(),
            StdRng::seed_from_u64(4),
        )
        .unwrap();
        assert!(ticker.latest().is_none());
        assert!(ticker.wait_latest(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_drop_joins_promptly() {
        let ticker = RefreshTicker::start(
            TickerConfig::default(),
            DashboardState::default(),
            StdRng::seed_from_u64(2),
        )
        .unwrap();
        let started = Instant::now();
        drop(ticker);
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
