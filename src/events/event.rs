//! # Runtime events emitted by lakes, spawners, and the simulation.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Occupancy events**: a lake's slot state changed (placed, departed)
//! - **Admission events**: spawn/dispatch and retry visibility
//! - **Lifecycle events**: shutdown flow of the whole simulation
//!
//! The [`Event`] struct carries metadata: which lake, which animal, which
//! slots, and a human-readable reason where one applies.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Two events published by the same lake under its lock are
//! ordered by `seq` consistently with the occupancy changes they describe.
//!
//! ## Example
//! ```rust
//! use waterhole::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::AnimalDeparted).with_lake(2);
//!
//! assert_eq!(ev.kind, EventKind::AnimalDeparted);
//! assert_eq!(ev.lake, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::animals::{AnimalId, Species};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Admission events ===
    /// A spawner created an animal and dispatched it to a lake.
    ///
    /// Sets:
    /// - `lake`: target lake
    /// - `animal`, `species`
    AnimalSpawned,

    /// An admission attempt backed off and will retry.
    ///
    /// Sets:
    /// - `lake`, `animal`, `species`
    /// - `reason`: `"exclusive-pending"` or `"fragmented"`
    AdmissionRetry,

    // === Occupancy events ===
    /// An animal was placed; the listed slots now hold its identity.
    ///
    /// An exclusive visit lists every slot of the lake.
    ///
    /// Sets:
    /// - `lake`, `animal`, `species`
    /// - `slots`: assigned slot indices, ascending
    AnimalPlaced,

    /// An animal departed; its slots are empty again.
    ///
    /// Sets:
    /// - `lake`, `animal`, `species`
    AnimalDeparted,

    // === Lifecycle events ===
    /// Shutdown requested; spawners stop, in-flight animals finish.
    ShutdownRequested,

    /// Every in-flight animal departed within the grace window.
    AllDrainedWithin,

    /// Grace window elapsed with animals still being serviced.
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Lake the event concerns, if any.
    pub lake: Option<usize>,
    /// Animal the event concerns, if any.
    pub animal: Option<AnimalId>,
    /// Species of that animal, if any.
    pub species: Option<Species>,
    /// Slot indices assigned by a placement, ascending.
    pub slots: Option<Arc<[usize]>>,
    /// Human-readable reason (retry causes, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp
    /// and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            lake: None,
            animal: None,
            species: None,
            slots: None,
            reason: None,
        }
    }

    /// Attaches the lake identity.
    #[inline]
    pub fn with_lake(mut self, lake: usize) -> Self {
        self.lake = Some(lake);
        self
    }

    /// Attaches the animal identity and species.
    #[inline]
    pub fn with_animal(mut self, id: AnimalId, species: Species) -> Self {
        self.animal = Some(id);
        self.species = Some(species);
        self
    }

    /// Attaches the assigned slot indices.
    #[inline]
    pub fn with_slots(mut self, slots: impl Into<Arc<[usize]>>) -> Self {
        self.slots = Some(slots.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::animals::Animal;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::AnimalPlaced);
        let b = Event::new(EventKind::AnimalDeparted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let animal = Animal::new(Species::Zebra, Duration::from_secs(5));
        let ev = Event::new(EventKind::AnimalPlaced)
            .with_lake(1)
            .with_animal(animal.id(), animal.species())
            .with_slots(vec![2, 3])
            .with_reason("why not");

        assert_eq!(ev.lake, Some(1));
        assert_eq!(ev.animal, Some(animal.id()));
        assert_eq!(ev.species, Some(Species::Zebra));
        assert_eq!(ev.slots.as_deref(), Some(&[2, 3][..]));
        assert_eq!(ev.reason.as_deref(), Some("why not"));
    }
}
