//! # Spawner: one generator task per species.
//!
//! A [`Spawner`] produces animals of a single species at randomized
//! intervals and dispatches each as an independent task calling
//! [`Lake::add`](crate::Lake::add) on a uniformly random lake. Which lake
//! an animal is routed to is not part of the synchronization problem; the
//! lakes are fully independent.
//!
//! ## Flow
//! ```text
//! loop {
//!   ├─► sleep Gaussian arrival delay   (cancellable)
//!   ├─► create Animal descriptor       (validated before dispatch)
//!   ├─► pick a lake uniformly at random
//!   ├─► publish AnimalSpawned
//!   └─► tracker.spawn(lake.add(animal))
//! }
//! ```
//!
//! ## Rules
//! - Cancellation stops **spawning** only: dispatched animals run to
//!   completion on the tracker (shutdown never interrupts a visit).
//! - The descriptor is consumed by exactly one `add` call.

use std::sync::Arc;

use tokio::time;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use rand::Rng;

use crate::animals::{Animal, Species};
use crate::config::SpeciesProfile;
use crate::events::{Bus, Event, EventKind};
use crate::lake::Lake;
use crate::timing;

/// Generator of one species' arrivals.
pub(crate) struct Spawner {
    species: Species,
    profile: SpeciesProfile,
    lakes: Arc<[Arc<Lake>]>,
    bus: Bus,
    tracker: TaskTracker,
}

impl Spawner {
    /// Creates a spawner for `species`.
    pub fn new(
        species: Species,
        profile: SpeciesProfile,
        lakes: Arc<[Arc<Lake>]>,
        bus: Bus,
        tracker: TaskTracker,
    ) -> Self {
        Self {
            species,
            profile,
            lakes,
            bus,
            tracker,
        }
    }

    /// Runs until `token` is cancelled.
    ///
    /// Each iteration sleeps a sampled arrival delay, then dispatches one
    /// animal. Cancellation during the sleep exits immediately without
    /// spawning.
    pub async fn run(self, token: CancellationToken) {
        loop {
            let delay = timing::sample_around(self.profile.mean_arrival);
            tokio::select! {
                _ = token.cancelled() => break,
                _ = time::sleep(delay) => {}
            }

            let animal = Animal::new(self.species, self.profile.mean_service);
            let lake = self.pick_lake();
            // Config validation runs before any spawner starts; a demand no
            // lake can hold never reaches `add`.
            if animal.validate_for(lake.id(), lake.capacity()).is_err() {
                continue;
            }

            self.bus.publish(
                Event::new(EventKind::AnimalSpawned)
                    .with_lake(lake.id())
                    .with_animal(animal.id(), animal.species()),
            );

            let lake = Arc::clone(lake);
            self.tracker.spawn(async move { lake.add(animal).await });
        }
    }

    fn pick_lake(&self) -> &Arc<Lake> {
        let idx = rand::rng().random_range(0..self.lakes.len());
        &self.lakes[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_spawner_dispatches_and_stops_on_cancel() {
        let bus = Bus::new(1024);
        let mut rx = bus.subscribe();
        let lake = Lake::new(0, 4, bus.clone(), Duration::from_millis(10)).unwrap();
        let lakes: Arc<[Arc<Lake>]> = Arc::from(vec![lake.clone()]);

        let tracker = TaskTracker::new();
        let profile = SpeciesProfile {
            // Both means sit at the sampling floor, so arrivals come
            // roughly every 100ms and visits are short.
            mean_arrival: Duration::from_millis(1),
            mean_service: Duration::from_millis(1),
        };
        let spawner = Spawner::new(
            Species::Flamingo,
            profile,
            lakes,
            bus.clone(),
            tracker.clone(),
        );

        let token = CancellationToken::new();
        let handle = tokio::spawn(spawner.run(token.clone()));

        time::sleep(Duration::from_secs(1)).await;
        token.cancel();
        handle.await.unwrap();

        let mut spawned = 0;
        while let Ok(ev) = rx.try_recv() {
            if ev.kind == EventKind::AnimalSpawned {
                spawned += 1;
            }
        }
        assert!(spawned > 0, "a second of arrivals must dispatch something");

        // Dispatched animals finish on their own; the tracker drains.
        tracker.close();
        tracker.wait().await;
        assert!(lake.snapshot().await.iter().all(Option::is_none));
        assert_eq!(lake.free_units(), 4);
    }
}
