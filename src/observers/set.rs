//! # ObserverSet: non-blocking fan-out over multiple observers.
//!
//! [`ObserverSet`] distributes each [`Event`] to every registered observer
//! **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-observer FIFO (queue order).
//! - Panics inside observers are caught and reported (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different observers.
//! - No retries on queue overflow (the event is dropped for that observer).
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per observer)
//!        ├────────────────► [queue O1] ─► worker O1 ─► on_event()
//!        ├────────────────► [queue O2] ─► worker O2 ─► on_event()
//!        └────────────────► [queue ON] ─► worker ON ─► on_event()
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::Event;

use super::Observe;

/// Per-observer channel with metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Composite fan-out with per-observer bounded queues and worker tasks.
pub struct ObserverSet {
    channels: Vec<ObserverChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl ObserverSet {
    /// Creates a new set and spawns one worker per observer.
    ///
    /// Must be called within a tokio runtime.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        let mut channels = Vec::with_capacity(observers.len());
        let mut workers = Vec::with_capacity(observers.len());

        for obs in observers {
            let cap = obs.queue_capacity().max(1);
            let name = obs.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let o = Arc::clone(&obs);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = o.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!("[waterhole] observer '{}' panicked: {:?}", o.name(), panic_err);
                    }
                }
            });

            channels.push(ObserverChannel { name, sender: tx });
            workers.push(handle);
        }

        Self { channels, workers }
    }

    /// Fans one event out to all observers (non-blocking).
    ///
    /// If an observer's queue is **full** or **closed**, the event is
    /// dropped for it and a warning names the observer.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    eprintln!(
                        "[waterhole] observer '{}' dropped event: queue full",
                        channel.name
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    eprintln!(
                        "[waterhole] observer '{}' dropped event: worker closed",
                        channel.name
                    );
                }
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::events::EventKind;

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

    struct Grump;

    #[async_trait]
    impl Observe for Grump {
        async fn on_event(&self, _event: &Event) {
            panic!("deliberate");
        }

        fn name(&self) -> &'static str {
            "grump"
        }
    }

    #[tokio::test]
    async fn test_events_reach_every_observer() {
        let counter = Arc::new(Counter {
            seen: AtomicUsize::new(0),
        });
        let set = ObserverSet::new(vec![counter.clone() as Arc<dyn Observe>]);

        for _ in 0..3 {
            set.emit(&Event::new(EventKind::AnimalDeparted));
        }
        set.shutdown().await;

        assert_eq!(counter.seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_panicking_observer_does_not_poison_others() {
        let counter = Arc::new(Counter {
            seen: AtomicUsize::new(0),
        });
        let set = ObserverSet::new(vec![
            Arc::new(Grump) as Arc<dyn Observe>,
            counter.clone() as Arc<dyn Observe>,
        ]);

        set.emit(&Event::new(EventKind::AnimalPlaced));
        set.emit(&Event::new(EventKind::AnimalDeparted));
        set.shutdown().await;

        assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_len_and_is_empty() {
        let set = ObserverSet::new(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
