//! # Simulation: orchestrates lakes, spawners, and observer delivery.
//!
//! The [`Simulation`] owns the event bus, the lakes, and the configured
//! observers. It spawns one generator per species, forwards bus events to
//! the observer fan-out, handles OS termination signals, and performs a
//! graceful drain bounded by [`SimConfig::grace`].
//!
//! ## High-level architecture
//! ```text
//! Simulation::new(cfg, observers)
//!   ├─ validate cfg
//!   ├─ Bus::new(cfg.bus_capacity)
//!   └─ Lake::new(..) per cfg.lakes entry          (10 / 7 / 5 by default)
//!
//! Simulation::run():
//!   signal listener ──► token.cancel() on SIGINT/SIGTERM/Ctrl-C
//!   run_until(token):
//!     ├─ observer_listener(): Bus ─► ObserverSet::emit   (fire-and-forget)
//!     ├─ Spawner::run() per species  (JoinSet; children of `token`)
//!     ├─ await token.cancelled() ─► publish ShutdownRequested
//!     ├─ join spawners (no new animals from here on)
//!     └─ tracker.close() + wait within cfg.grace:
//!          ├─ Ok      ─► publish AllDrainedWithin
//!          └─ Timeout ─► publish GraceExceeded, Err(RuntimeError)
//! ```
//!
//! ## Rules
//! - Shutdown stops **spawning**; animals already dispatched finish their
//!   visits. There is no mid-protocol cancellation.
//! - Lakes are fully independent; the simulation never reaches into their
//!   state beyond construction and snapshots.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::animals::Species;
use crate::config::SimConfig;
use crate::error::{ConfigError, RuntimeError};
use crate::events::{Bus, Event, EventKind};
use crate::lake::Lake;
use crate::observers::{Observe, ObserverSet};
use crate::sim::spawner::Spawner;

/// Coordinates the lakes, the per-species spawners, and observer delivery.
pub struct Simulation {
    cfg: SimConfig,
    bus: Bus,
    lakes: Arc<[Arc<Lake>]>,
    observers: Vec<Arc<dyn Observe>>,
}

impl Simulation {
    /// Builds a simulation from a validated configuration.
    ///
    /// Misconfiguration (zero-capacity lake, species demand no lake can
    /// hold) surfaces here, before anything runs.
    pub fn new(cfg: SimConfig, observers: Vec<Arc<dyn Observe>>) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let bus = Bus::new(cfg.bus_capacity_clamped());
        let mut lakes = Vec::with_capacity(cfg.lakes.len());
        for (id, &capacity) in cfg.lakes.iter().enumerate() {
            lakes.push(Lake::new(id, capacity, bus.clone(), cfg.poll)?);
        }

        Ok(Self {
            cfg,
            bus,
            lakes: lakes.into(),
            observers,
        })
    }

    /// The lakes, in configuration order.
    ///
    /// Observers that render full boards hold these handles and call
    /// [`Lake::snapshot`].
    pub fn lakes(&self) -> &[Arc<Lake>] {
        &self.lakes
    }

    /// The event bus (for subscribing outside the observer machinery).
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Runs until the process receives a termination signal, then drains.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        let token = CancellationToken::new();
        let signal_token = token.clone();
        tokio::spawn(async move {
            if wait_for_shutdown_signal().await.is_ok() {
                signal_token.cancel();
            }
        });
        self.run_until(token).await
    }

    /// Runs until `token` is cancelled, then drains. Call once.
    ///
    /// Returns `Ok(())` when every in-flight animal departed within
    /// [`SimConfig::grace`], or [`RuntimeError::GraceExceeded`] otherwise.
    pub async fn run_until(&self, token: CancellationToken) -> Result<(), RuntimeError> {
        self.observer_listener();

        let tracker = TaskTracker::new();
        let mut spawners = JoinSet::new();
        for species in Species::ALL {
            let spawner = Spawner::new(
                species,
                *self.cfg.profile(species),
                Arc::clone(&self.lakes),
                self.bus.clone(),
                tracker.clone(),
            );
            spawners.spawn(spawner.run(token.child_token()));
        }

        token.cancelled().await;
        self.bus.publish(Event::new(EventKind::ShutdownRequested));

        // No animal is dispatched after this join completes.
        while spawners.join_next().await.is_some() {}

        tracker.close();
        match time::timeout(self.cfg.grace, tracker.wait()).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::AllDrainedWithin));
                Ok(())
            }
            Err(_elapsed) => {
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded {
                    grace: self.cfg.grace,
                    remaining: tracker.len(),
                })
            }
        }
    }

    /// Subscribes to the bus and forwards events to the observer set
    /// (fire-and-forget).
    fn observer_listener(&self) {
        if self.observers.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let set = ObserverSet::new(self.observers.clone());
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}

/// Completes when the process receives a termination signal.
///
/// Unix: SIGINT, SIGTERM, or Ctrl-C. Elsewhere: Ctrl-C only.
#[cfg(unix)]
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }
    Ok(())
}

/// Completes when the process receives a termination signal.
#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    fn fast_config() -> SimConfig {
        let mut cfg = SimConfig::default();
        cfg.lakes = vec![4, 3];
        // Everything at the sampling floor: arrivals every ~100ms,
        // visits ~100ms.
        for profile in [&mut cfg.flamingo, &mut cfg.zebra, &mut cfg.hippopotamus] {
            profile.mean_arrival = Duration::from_millis(1);
            profile.mean_service = Duration::from_millis(1);
        }
        cfg
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut cfg = SimConfig::default();
        cfg.lakes = vec![0];
        let err = Simulation::new(cfg, Vec::new()).err().expect("must reject");
        assert_eq!(err.as_label(), "config_zero_capacity");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_spawns_services_and_drains() {
        let sim = Arc::new(Simulation::new(fast_config(), Vec::new()).unwrap());
        let mut rx = sim.bus().subscribe();

        let token = CancellationToken::new();
        let handle = tokio::spawn({
            let sim = Arc::clone(&sim);
            let token = token.clone();
            async move { sim.run_until(token).await }
        });

        tokio::time::sleep(Duration::from_secs(2)).await;
        token.cancel();
        handle.await.unwrap().expect("drain within grace");

        let mut saw_placed = false;
        let mut saw_shutdown = false;
        let mut saw_drained = false;
        loop {
            match rx.try_recv() {
                Ok(ev) => match ev.kind {
                    EventKind::AnimalPlaced => saw_placed = true,
                    EventKind::ShutdownRequested => saw_shutdown = true,
                    EventKind::AllDrainedWithin => saw_drained = true,
                    _ => {}
                },
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        assert!(saw_placed, "two seconds of arrivals must admit someone");
        assert!(saw_shutdown && saw_drained);

        for lake in sim.lakes() {
            assert!(lake.snapshot().await.iter().all(Option::is_none));
            assert_eq!(lake.free_units(), lake.capacity());
        }
    }

    struct Counter {
        seen: AtomicUsize,
    }

    #[async_trait]
    impl Observe for Counter {
        async fn on_event(&self, _event: &Event) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_receive_events() {
        let counter = Arc::new(Counter {
            seen: AtomicUsize::new(0),
        });
        let sim = Arc::new(
            Simulation::new(fast_config(), vec![counter.clone() as Arc<dyn Observe>]).unwrap(),
        );

        let token = CancellationToken::new();
        let handle = tokio::spawn({
            let sim = Arc::clone(&sim);
            let token = token.clone();
            async move { sim.run_until(token).await }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
        handle.await.unwrap().expect("drain within grace");

        // Give the fan-out workers a beat to drain their queues.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(counter.seen.load(Ordering::SeqCst) > 0);
    }
}
