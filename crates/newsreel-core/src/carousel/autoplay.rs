//! L2 Organism Layer: Autoplay timer
//!
//! A tokio task that only *sends* ticks; the UI loop applies them to the
//! controller. Each timer carries a generation number so ticks still queued
//! from a cancelled timer can be recognised and dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// One autoplay period elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayTick {
    pub generation: u64,
}

/// Periodic tick source, cancelled deterministically on drop
#[derive(Debug)]
pub struct AutoplayTimer {
    generation: u64,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AutoplayTimer {
    /// Spawn a timer that sends a tick every `period` (first tick after one
    /// full period). Must be called inside a tokio runtime.
    pub fn start(period: Duration, ticks: mpsc::UnboundedSender<AutoplayTick>) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip the first tick (fires immediately)
            interval.tick().await;

            loop {
                tokio::select! {
                    biased;

                    result = shutdown_rx.changed() => {
                        if result.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }

                    _ = interval.tick() => {
                        if ticks.send(AutoplayTick { generation }).is_err() {
                            debug!(generation, "Autoplay receiver dropped");
                            break;
                        }
                    }
                }
            }

            debug!(generation, "Autoplay timer stopped");
        });

        debug!(generation, period_ms = period.as_millis() as u64, "Autoplay timer started");

        Self {
            generation,
            shutdown,
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `tick` came from this timer
    pub fn owns(&self, tick: &AutoplayTick) -> bool {
        tick.generation == self.generation && !self.is_cancelled()
    }

    /// Stop the timer; idempotent
    pub fn cancel(&self) {
        if !self.is_cancelled() {
            self.shutdown.send_replace(true);
            self.handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.shutdown.borrow()
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = AutoplayTimer::start(Duration::from_millis(5000), tx);

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let tick = rx.try_recv().unwrap();
        assert!(timer.owns(&tick));

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = AutoplayTimer::start(Duration::from_millis(100), tx);

        tokio::time::sleep(Duration::from_millis(150)).await;
        let queued = rx.try_recv().unwrap();

        timer.cancel();
        timer.cancel();
        assert!(timer.is_cancelled());
        assert!(!timer.owns(&queued));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(AutoplayTimer::start(Duration::from_millis(100), tx));

        tokio::time::sleep(Duration::from_millis(500)).await;
        // Task is gone, so the sender is dropped as well
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generations_differ() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = AutoplayTimer::start(Duration::from_secs(1), tx.clone());
        let b = AutoplayTimer::start(Duration::from_secs(1), tx);
        assert_ne!(a.generation(), b.generation());
        assert!(!b.owns(&AutoplayTick {
            generation: a.generation()
        }));
    }
}
