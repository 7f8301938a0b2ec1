//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by lakes, spawners, and the
//! simulation runtime.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Lake` (occupancy changes, retries), `Spawner`
//!   (dispatches), `Simulation` (shutdown lifecycle).
//! - **Consumer**: `Simulation::observer_listener()`, which fans events out
//!   to the [`ObserverSet`](crate::ObserverSet).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
