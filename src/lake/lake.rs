//! # Lake: one independent pool of drinking slots.
//!
//! A [`Lake`] owns a fixed-length slot board, a counting semaphore holding
//! one permit per slot (the shared-capacity counter), the announced-hippo
//! flag, and the active shared-occupant count. Lakes share no state; each
//! is its own unit of synchronization.
//!
//! ## Admission protocols
//! ```text
//! Shared path (flamingo, zebra) — add():
//!
//! loop {
//!   ├─► announced hippo?        ── yes ─► sleep(poll), retry
//!   ├─► acquire slot_demand permits      (may block on the semaphore)
//!   ├─► lock board
//!   ├─► announced hippo now?    ── yes ─► drop permits+lock, sleep, retry
//!   ├─► placement policy        ── none ─► drop permits+lock, sleep, retry
//!   └─► write slots, active += 1, unlock ─► publish AnimalPlaced
//! }
//! sleep(service)                          (Gaussian, σ = 10 %, floored)
//! lock, clear slots, active -= 1, unlock ─► publish AnimalDeparted
//! drop permits                            (units return to the pool)
//!
//! Exclusive path (hippopotamus) — add():
//!
//! CAS announced flag            (serializes hippos; poll while taken)
//! lock board
//! while active > 0: unlock, sleep(poll), relock      (drain barrier)
//! claim every slot                       ─► publish AnimalPlaced
//! sleep(service) HOLDING THE LOCK        (whole-lake pause)
//! clear every slot                       ─► publish AnimalDeparted
//! unlock, clear announced flag
//! ```
//!
//! ## Rules
//! - `add` blocks until the visit completes; it never fails and returns
//!   nothing. Contention is resolved by retrying, not by erroring.
//! - The board and the active count are touched only under the lock; the
//!   semaphore is acquired and released outside it.
//! - Permits are RAII guards: every reservation is paired with exactly one
//!   release on every exit path.
//! - An exclusive claim bypasses the semaphore entirely. During a hippo
//!   visit the counter does not reflect true free capacity; the announced
//!   flag plus the drain barrier guarantee no shared animal is placed
//!   concurrently.
//! - Admission order among contending animals of the same species is
//!   race-determined, not FIFO.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Semaphore};
use tokio::time;

use crate::animals::Animal;
use crate::error::ConfigError;
use crate::events::{Bus, Event, EventKind};
use crate::lake::board::{Board, Occupant};
use crate::lake::placement;
use crate::timing;

/// One independent fixed-capacity watering hole.
pub struct Lake {
    id: usize,
    capacity: usize,
    /// Shared-capacity counter: one permit per slot.
    units: Arc<Semaphore>,
    /// Slot state plus the active shared-occupant count.
    board: Mutex<Board>,
    /// Set while an exclusive request is announced or being serviced.
    hippo_pending: AtomicBool,
    poll: Duration,
    bus: Bus,
}

impl Lake {
    /// Creates a lake with `capacity` slots.
    ///
    /// Capacity is fixed for the lake's lifetime; zero is rejected here so
    /// the admission protocol never sees an unsatisfiable pool.
    pub fn new(
        id: usize,
        capacity: usize,
        bus: Bus,
        poll: Duration,
    ) -> Result<Arc<Self>, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity { lake: id });
        }
        Ok(Arc::new(Self {
            id,
            capacity,
            units: Arc::new(Semaphore::new(capacity)),
            board: Mutex::new(Board::new(capacity)),
            hippo_pending: AtomicBool::new(false),
            poll,
            bus,
        }))
    }

    /// Identity of this lake (index within the simulation).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently available on the shared-capacity counter.
    ///
    /// During an exclusive visit this does not reflect true free capacity
    /// (the claim is accounted out-of-band).
    pub fn free_units(&self) -> usize {
        self.units.available_permits()
    }

    /// Copies the current slot state.
    ///
    /// Waits for the lake's lock, so during an exclusive visit this blocks
    /// until the hippo departs.
    pub async fn snapshot(&self) -> Box<[Option<Occupant>]> {
        self.board.lock().await.snapshot()
    }

    /// Number of shared occupants currently placed.
    pub async fn active(&self) -> usize {
        self.board.lock().await.active()
    }

    /// Admits `animal`, services it, and releases it.
    ///
    /// Blocks the calling task for the entire visit: admission (which may
    /// wait for capacity, contiguity, or an exclusive visit to end), the
    /// sampled drinking duration, and release. Returns nothing and has no
    /// failure mode; all contention is resolved by blocking and retrying.
    pub async fn add(&self, animal: Animal) {
        match animal.slot_demand() {
            Some(demand) => self.add_shared(animal, demand).await,
            None => self.add_exclusive(animal).await,
        }
    }

    async fn add_shared(&self, animal: Animal, demand: usize) {
        debug_assert!(
            demand <= self.capacity,
            "descriptor validated before dispatch"
        );
        let occupant = Occupant {
            id: animal.id(),
            species: animal.species(),
        };

        let (_permits, assignment) = loop {
            // An announced hippo has priority: do not even reserve units.
            if self.hippo_pending.load(Ordering::Acquire) {
                time::sleep(self.poll).await;
                continue;
            }

            let permits = match Arc::clone(&self.units)
                .acquire_many_owned(demand as u32)
                .await
            {
                Ok(permits) => permits,
                // The semaphore lives as long as the lake and is never closed.
                Err(_closed) => return,
            };

            let mut board = self.board.lock().await;

            // A hippo may have announced itself between the gate check and
            // the reservation; yield the reserved units to it.
            if self.hippo_pending.load(Ordering::Acquire) {
                drop(board);
                drop(permits);
                self.publish_retry(&animal, "exclusive-pending");
                time::sleep(self.poll).await;
                continue;
            }

            match placement::find_slots(board.slots(), animal.species()) {
                Some(assignment) => {
                    board.place(&assignment, occupant);
                    drop(board);
                    break (permits, assignment);
                }
                None => {
                    // Units were numerically available but not placeable
                    // (fragmented); give them back and retry.
                    drop(board);
                    drop(permits);
                    self.publish_retry(&animal, "fragmented");
                    time::sleep(self.poll).await;
                }
            }
        };

        self.bus.publish(
            Event::new(EventKind::AnimalPlaced)
                .with_lake(self.id)
                .with_animal(animal.id(), animal.species())
                .with_slots(assignment.indices().collect::<Vec<_>>()),
        );

        time::sleep(timing::sample_around(animal.mean_service())).await;

        let mut board = self.board.lock().await;
        let cleared = board.remove(animal.id());
        debug_assert_eq!(cleared, demand, "release must clear what was placed");
        drop(board);

        self.bus.publish(
            Event::new(EventKind::AnimalDeparted)
                .with_lake(self.id)
                .with_animal(animal.id(), animal.species()),
        );
        // `_permits` drops here: units return to the pool after departure.
    }

    async fn add_exclusive(&self, animal: Animal) {
        // Exclusive requests serialize among themselves: only one hippo
        // may hold the announced flag at a time.
        while self
            .hippo_pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            time::sleep(self.poll).await;
        }

        // Drain barrier: wait until every placed shared occupant departs.
        // New shared admissions are parked by the announced flag.
        let mut board = self.board.lock().await;
        while board.active() > 0 {
            drop(board);
            time::sleep(self.poll).await;
            board = self.board.lock().await;
        }

        board.claim(Occupant {
            id: animal.id(),
            species: animal.species(),
        });
        self.bus.publish(
            Event::new(EventKind::AnimalPlaced)
                .with_lake(self.id)
                .with_animal(animal.id(), animal.species())
                .with_slots((0..self.capacity).collect::<Vec<_>>()),
        );

        // The whole visit happens under the lock: shared-path re-checks
        // and snapshots stay parked until the hippo leaves.
        time::sleep(timing::sample_around(animal.mean_service())).await;

        board.clear_all();
        self.bus.publish(
            Event::new(EventKind::AnimalDeparted)
                .with_lake(self.id)
                .with_animal(animal.id(), animal.species()),
        );
        drop(board);
        self.hippo_pending.store(false, Ordering::Release);
    }

    fn publish_retry(&self, animal: &Animal, reason: &'static str) {
        self.bus.publish(
            Event::new(EventKind::AdmissionRetry)
                .with_lake(self.id)
                .with_animal(animal.id(), animal.species())
                .with_reason(reason),
        );
    }
}
