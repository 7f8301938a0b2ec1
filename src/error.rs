//! Error types used by the waterhole runtime.
//!
//! This module defines two error enums:
//!
//! - [`ConfigError`] — misconfiguration detected while building lakes or
//!   validating animal descriptors. Always surfaces synchronously, before
//!   any admission protocol runs.
//! - [`RuntimeError`] — errors raised by the simulation runtime itself,
//!   such as a shutdown drain exceeding its grace period.
//!
//! Contention is never an error: admission is resolved by blocking and
//! retrying, and [`Lake::add`](crate::Lake::add) has no failure mode.
//! Both types provide `as_label` for stable log/metric identifiers.

use std::time::Duration;
use thiserror::Error;

use crate::animals::Species;

/// # Errors detected at construction or validation time.
///
/// A lake that fails construction is never created; an animal that fails
/// validation is never dispatched. The admission protocol itself cannot
/// observe these.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A lake was configured with zero slots.
    #[error("lake {lake} must have a positive capacity")]
    ZeroCapacity {
        /// Index of the offending lake in the configuration.
        lake: usize,
    },

    /// A species demands more slots than a configured lake provides.
    #[error("{species} demands {demand} slot(s) but lake {lake} holds {capacity}")]
    DemandExceedsCapacity {
        /// The species whose demand cannot be met.
        species: Species,
        /// Slots the species needs at once.
        demand: usize,
        /// Index of the offending lake.
        lake: usize,
        /// The lake's configured capacity.
        capacity: usize,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use waterhole::ConfigError;
    ///
    /// let err = ConfigError::ZeroCapacity { lake: 2 };
    /// assert_eq!(err.as_label(), "config_zero_capacity");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::ZeroCapacity { .. } => "config_zero_capacity",
            ConfigError::DemandExceedsCapacity { .. } => "config_demand_exceeds_capacity",
        }
    }
}

/// # Errors produced by the simulation runtime.
///
/// These represent failures of the orchestration layer, not of any single
/// animal's visit.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some animals were still being
    /// serviced when the runtime gave up waiting.
    #[error("shutdown grace {grace:?} exceeded; {remaining} animal(s) still in flight")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of in-flight animal tasks at the deadline.
        remaining: usize,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }
}
