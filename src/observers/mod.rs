//! Occupancy observers: trait, fan-out set, and the built-in log writer.
//!
//! Lakes publish events to the [`Bus`](crate::events::Bus); the simulation
//! forwards them to an [`ObserverSet`], which fans out to user observers
//! through per-observer bounded queues and dedicated workers.
//!
//! ## Contents
//! - [`Observe`] — trait for implementing observers
//! - [`ObserverSet`] — non-blocking fan-out with panic isolation
//! - [`LogWriter`] — stdout printer (feature `logging`)

#[cfg(feature = "logging")]
mod log;
mod observer;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;
