//! # waterhole
//!
//! **Waterhole** simulates animals sharing a limited, spatially-structured
//! set of drinking slots at fixed-capacity lakes.
//!
//! Three species with different demands contend for slots:
//! - **Flamingos** take 1 slot and flock: they prefer a slot adjacent to a
//!   flamingo already drinking.
//! - **Zebras** take 2 contiguous slots.
//! - **Hippos** claim the entire lake, waiting for every current occupant
//!   to depart first (and keeping everyone else out while they drink).
//!
//! The interesting part is the admission protocol: a bounded slot pool
//! supporting concurrent partial occupation with placement constraints
//! *and* a privileged whole-pool consumer, without deadlock or unbounded
//! starvation on either side.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Spawner    │   │   Spawner    │   │   Spawner    │
//!     │ (flamingos)  │   │   (zebras)   │   │   (hippos)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ Animal           │ Animal           │ Animal
//!            ▼                  ▼                  ▼
//!       ─ uniformly random lake choice; one task per animal ─
//!            │                  │                  │
//!            ▼                  ▼                  ▼
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐
//! │  Lake (10 slots) │ │  Lake (7 slots)  │ │  Lake (5 slots)  │
//! │  - slot board    │ │                  │ │                  │
//! │  - unit semaphore│ │   (independent;  │ │   (independent;  │
//! │  - hippo flag    │ │    no shared     │ │    no shared     │
//! │  - board lock    │ │    state)        │ │    state)        │
//! └────────┬─────────┘ └────────┬─────────┘ └────────┬─────────┘
//!          │ Events: AnimalPlaced / AnimalDeparted / ...
//!          ▼                    ▼                    ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                  Bus (broadcast channel)                  │
//! └─────────────────────────────┬─────────────────────────────┘
//!                               ▼
//!                    ┌──────────────────────┐
//!                    │  observer_listener   │
//!                    │   (in Simulation)    │
//!                    └──────────┬───────────┘
//!                               ▼
//!                          ObserverSet
//!                       (per-observer queues)
//!                     ┌─────────┼─────────┐
//!                     ▼         ▼         ▼
//!                 renderer   metrics   LogWriter
//! ```
//!
//! ### One animal's visit (shared path)
//! ```text
//! Spawner ──► lake.add(animal)
//!
//! loop {
//!   ├─► hippo announced?  ─► back off, retry
//!   ├─► reserve slot_demand units        (semaphore; may block)
//!   ├─► lock board, re-check hippo flag  ─► yield units, retry
//!   ├─► placement policy                 ─► none: yield units, retry
//!   └─► occupy slots ─► publish AnimalPlaced
//! }
//! drink (Gaussian duration) ─► vacate slots ─► publish AnimalDeparted
//! ─► return units
//! ```
//! A hippo instead announces itself, waits for the lake to drain, claims
//! every slot, and holds the lake's lock for its entire visit.
//!
//! ## Features
//! | Area              | Description                                              | Key types                      |
//! |-------------------|----------------------------------------------------------|--------------------------------|
//! | **Lakes**         | Slot pools with shared and exclusive admission.          | [`Lake`], [`Occupant`]         |
//! | **Animals**       | Species behavior and immutable visit descriptors.        | [`Species`], [`Animal`]        |
//! | **Observer API**  | Hook into occupancy changes (rendering, metrics).        | [`Observe`], [`ObserverSet`]   |
//! | **Events**        | Broadcast occupancy/lifecycle events.                    | [`Event`], [`EventKind`], [`Bus`] |
//! | **Errors**        | Typed configuration and runtime errors.                  | [`ConfigError`], [`RuntimeError`] |
//! | **Configuration** | Lake capacities, species timing, poll, grace.            | [`SimConfig`], [`SpeciesProfile`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use waterhole::{Observe, SimConfig, Simulation};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = SimConfig::default(); // three lakes: 10, 7, 5 slots
//!
//!     let observers: Vec<Arc<dyn Observe>> = Vec::new();
//!     let sim = Simulation::new(cfg, observers)?;
//!
//!     // Runs until SIGINT/SIGTERM, then lets in-flight animals finish.
//!     sim.run().await?;
//!     Ok(())
//! }
//! ```

mod animals;
mod config;
mod error;
mod events;
mod lake;
mod observers;
mod sim;
mod timing;

// ---- Public re-exports ----

pub use animals::{Animal, AnimalId, Species};
pub use config::{SimConfig, SpeciesProfile};
pub use error::{ConfigError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use lake::{Lake, Occupant};
pub use observers::{Observe, ObserverSet};
pub use sim::Simulation;

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
