//! Animal descriptors and species behavior.
//!
//! This module provides the animal-side data model:
//! - [`Species`] — tagged variant covering the three drinking behaviors
//! - [`Animal`] — immutable descriptor consumed by one lake visit
//! - [`AnimalId`] — process-unique identity written into occupied slots
//!
//! Behavior differences between species are fully captured by per-species
//! constants and the placement rules; there is no trait object hierarchy.

mod animal;
mod species;

pub use animal::{Animal, AnimalId};
pub use species::Species;
