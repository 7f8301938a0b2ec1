//! # Animal descriptor.
//!
//! An [`Animal`] is an immutable value created by a spawner just before
//! dispatch and consumed by exactly one [`Lake::add`](crate::Lake::add)
//! call. It bundles a process-unique [`AnimalId`], the [`Species`], and the
//! mean service duration its visit is sampled around.
//!
//! ## Rules
//! - No reuse: a descriptor describes one visit and is discarded after it.
//! - No shared mutable state: everything is fixed at creation.
//! - Validation happens before dispatch ([`Animal::validate_for`]), never
//!   inside the admission protocol.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::animals::Species;
use crate::error::ConfigError;

/// Global counter backing [`AnimalId`] allocation.
static ANIMAL_SEQ: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of one animal instance.
///
/// Written into every slot the animal occupies; release clears slots by
/// comparing against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimalId(u64);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable descriptor of one animal visit.
#[derive(Clone, Debug)]
pub struct Animal {
    id: AnimalId,
    species: Species,
    mean_service: Duration,
}

impl Animal {
    /// Creates a descriptor with a fresh identity.
    ///
    /// `mean_service` is the mean of the Gaussian the actual drinking
    /// duration is sampled from (σ = 10 % of the mean).
    pub fn new(species: Species, mean_service: Duration) -> Self {
        Self {
            id: AnimalId(ANIMAL_SEQ.fetch_add(1, Ordering::Relaxed)),
            species,
            mean_service,
        }
    }

    /// Returns the unique identity.
    pub fn id(&self) -> AnimalId {
        self.id
    }

    /// Returns the species.
    pub fn species(&self) -> Species {
        self.species
    }

    /// Returns the mean service duration.
    pub fn mean_service(&self) -> Duration {
        self.mean_service
    }

    /// Slots this animal reserves on the shared path (`None` = exclusive).
    pub fn slot_demand(&self) -> Option<usize> {
        self.species.shared_demand()
    }

    /// Checks that this animal can ever be admitted to a lake of
    /// `capacity` slots.
    ///
    /// Called by the spawner before dispatch; a demand the lake cannot
    /// satisfy would otherwise block `add` forever.
    pub fn validate_for(&self, lake: usize, capacity: usize) -> Result<(), ConfigError> {
        if let Some(demand) = self.slot_demand() {
            if demand > capacity {
                return Err(ConfigError::DemandExceedsCapacity {
                    species: self.species,
                    demand,
                    lake,
                    capacity,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Animal::new(Species::Flamingo, Duration::from_secs(1));
        let b = Animal::new(Species::Flamingo, Duration::from_secs(1));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_demand_follows_species() {
        let z = Animal::new(Species::Zebra, Duration::from_secs(5));
        assert_eq!(z.slot_demand(), Some(2));
        let h = Animal::new(Species::Hippopotamus, Duration::from_secs(5));
        assert_eq!(h.slot_demand(), None);
    }

    #[test]
    fn test_validate_rejects_oversized_demand() {
        let z = Animal::new(Species::Zebra, Duration::from_secs(5));
        let err = z.validate_for(0, 1).unwrap_err();
        assert_eq!(err.as_label(), "config_demand_exceeds_capacity");
        assert!(z.validate_for(0, 2).is_ok());
    }

    #[test]
    fn test_hippo_fits_any_positive_capacity() {
        let h = Animal::new(Species::Hippopotamus, Duration::from_secs(5));
        assert!(h.validate_for(0, 1).is_ok());
    }
}
