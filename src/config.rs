//! # Global simulation configuration.
//!
//! Provides [`SimConfig`], the centralized settings for a simulation run,
//! and [`SpeciesProfile`], the per-species timing tunables.
//!
//! The configuration surface is deliberately small: lake capacities,
//! per-species arrival/service means, the admission poll interval, the
//! shutdown grace window, and the event-bus capacity. Everything else is
//! protocol, not policy.
//!
//! ## Reference deployment
//! Three lakes of 10, 7, and 5 slots; flamingos arrive every ~2 s and drink
//! ~3.5 s, zebras every ~3 s for ~5 s, hippos every ~10 s for ~5 s.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use waterhole::SimConfig;
//!
//! let mut cfg = SimConfig::default();
//! cfg.lakes = vec![4, 4];
//! cfg.poll = Duration::from_millis(5);
//!
//! assert!(cfg.validate().is_ok());
//! ```

use std::time::Duration;

use crate::animals::Species;
use crate::error::ConfigError;

/// Timing profile of one species.
#[derive(Clone, Copy, Debug)]
pub struct SpeciesProfile {
    /// Mean interval between arrivals of this species.
    pub mean_arrival: Duration,
    /// Mean duration of one drinking visit.
    pub mean_service: Duration,
}

/// Global configuration for a simulation run.
///
/// ## Field semantics
/// - `lakes`: capacity of each independent lake; lakes share no state
/// - `poll`: sleep between failed admission attempts (the retry backoff)
/// - `grace`: maximum wait for in-flight animals after shutdown is requested
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Capacities of the independent lakes, one entry per lake.
    pub lakes: Vec<usize>,

    /// Timing profile for flamingos.
    pub flamingo: SpeciesProfile,

    /// Timing profile for zebras.
    pub zebra: SpeciesProfile,

    /// Timing profile for hippos.
    pub hippopotamus: SpeciesProfile,

    /// Sleep between failed admission attempts.
    ///
    /// Applied when an exclusive request is pending, when capacity is
    /// fragmented, and inside the exclusive drain barrier.
    pub poll: Duration,

    /// Maximum time to wait for in-flight animals during shutdown.
    ///
    /// Shutdown stops the spawners and lets admitted animals finish; this
    /// bounds how long the runtime waits before reporting
    /// [`RuntimeError::GraceExceeded`](crate::RuntimeError::GraceExceeded).
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Observers that lag behind more than `bus_capacity` events skip the
    /// oldest items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,
}

impl SimConfig {
    /// Returns the timing profile of the given species.
    pub fn profile(&self, species: Species) -> &SpeciesProfile {
        match species {
            Species::Flamingo => &self.flamingo,
            Species::Zebra => &self.zebra,
            Species::Hippopotamus => &self.hippopotamus,
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Validates the configuration.
    ///
    /// Rejects zero-capacity lakes and any lake too small for a species'
    /// slot demand. Runs before any lake is constructed so the admission
    /// protocol never observes a misconfiguration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (lake, &capacity) in self.lakes.iter().enumerate() {
            if capacity == 0 {
                return Err(ConfigError::ZeroCapacity { lake });
            }
            for species in Species::ALL {
                if let Some(demand) = species.shared_demand() {
                    if demand > capacity {
                        return Err(ConfigError::DemandExceedsCapacity {
                            species,
                            demand,
                            lake,
                            capacity,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    /// Reference deployment:
    ///
    /// - `lakes = [10, 7, 5]`
    /// - flamingo: arrival 2 s, service 3.5 s
    /// - zebra: arrival 3 s, service 5 s
    /// - hippopotamus: arrival 10 s, service 5 s
    /// - `poll = 10ms`
    /// - `grace = 30s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            lakes: vec![10, 7, 5],
            flamingo: SpeciesProfile {
                mean_arrival: Duration::from_secs_f64(2.0),
                mean_service: Duration::from_secs_f64(3.5),
            },
            zebra: SpeciesProfile {
                mean_arrival: Duration::from_secs_f64(3.0),
                mean_service: Duration::from_secs_f64(5.0),
            },
            hippopotamus: SpeciesProfile {
                mean_arrival: Duration::from_secs_f64(10.0),
                mean_service: Duration::from_secs_f64(5.0),
            },
            poll: Duration::from_millis(10),
            grace: Duration::from_secs(30),
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut cfg = SimConfig::default();
        cfg.lakes = vec![10, 0, 5];
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.as_label(), "config_zero_capacity");
    }

    #[test]
    fn test_lake_too_small_for_zebra_rejected() {
        let mut cfg = SimConfig::default();
        cfg.lakes = vec![1];
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.as_label(), "config_demand_exceeds_capacity");
    }

    #[test]
    fn test_profile_lookup() {
        let cfg = SimConfig::default();
        assert_eq!(
            cfg.profile(Species::Flamingo).mean_service,
            Duration::from_secs_f64(3.5)
        );
        assert_eq!(
            cfg.profile(Species::Hippopotamus).mean_arrival,
            Duration::from_secs_f64(10.0)
        );
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let mut cfg = SimConfig::default();
        cfg.bus_capacity = 0;
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
