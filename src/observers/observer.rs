//! # Occupancy observer trait.
//!
//! Provides [`Observe`], the extension point for plugging presentation and
//! telemetry layers into the simulation. The original system drove a GUI
//! from these notifications; the core neither knows nor cares what an
//! observer does with them.
//!
//! Each observer gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-observer bounded queue** (capacity via [`Observe::queue_capacity`])
//! - **Panic isolation** (a panicking observer never takes down a lake)
//!
//! ## Architecture
//! ```text
//! ObserverSet ──► [bounded queue] ──► worker task ──► observer.on_event()
//! ```
//!
//! ## Rules
//! - A slow observer only affects its own queue.
//! - Queue overflow drops the event **for this observer only**; other
//!   observers are unaffected.
//! - Events are processed sequentially (FIFO) per observer.
//! - Observers never block a lake: publication is fire-and-forget, so an
//!   `on_event` that dawdles delays nothing but its own queue.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use waterhole::{Event, EventKind, Observe};
//!
//! struct PlacementCounter;
//!
//! #[async_trait]
//! impl Observe for PlacementCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::AnimalPlaced) {
//!             // bump a metric, redraw a lake, ...
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "placement-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Observer of occupancy changes and runtime lifecycle.
///
/// Implementations needing the full slot state should hold the
/// [`Lake`](crate::Lake) handles and call
/// [`Lake::snapshot`](crate::Lake::snapshot); events carry identities and
/// assigned indices, not the whole board.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Return promptly — long work belongs in the observer's own tasks.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, never from a lake's context.
    /// Events arrive in FIFO order per observer.
    async fn on_event(&self, event: &Event);

    /// Returns the observer name used in overflow/panic diagnostics.
    ///
    /// Prefer short, descriptive names (e.g., "renderer", "metrics").
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this observer.
    ///
    /// On overflow the new event is dropped for this observer only. The
    /// runtime clamps capacity to a minimum of 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
