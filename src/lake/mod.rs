//! Lakes: the slot pools at the heart of the simulation.
//!
//! Internal modules:
//! - [`board`]: the slot array and active-occupant accounting;
//! - [`placement`]: the pure policy choosing slots for an admission;
//! - [`lake`]: the [`Lake`] manager running both admission protocols.
//!
//! Only [`Lake`] and the [`Occupant`] snapshot element are public; the
//! board and the placement rules are implementation detail exercised
//! through `Lake::add`.

mod board;
mod lake;
mod placement;

pub use board::Occupant;
pub use lake::Lake;
