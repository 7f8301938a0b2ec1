//! # Simple logging observer for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [spawned] lake=0 species=flamingo id=17
//! [placed] lake=0 species=flamingo id=17 slots=[0]
//! [retry] lake=0 species=zebra id=18 reason=fragmented
//! [departed] lake=0 species=flamingo id=17
//! [shutdown-requested]
//! [all-drained]
//! [grace-exceeded]
//! ```
//!
//! Not intended for production use — implement a custom [`Observe`] for
//! structured logging or metrics collection.

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Observe;

/// Stdout logging observer, enabled via the `logging` feature.
pub struct LogWriter;

impl LogWriter {
    fn describe(e: &Event) -> Option<String> {
        let tag = match e.kind {
            EventKind::AnimalSpawned => "spawned",
            EventKind::AnimalPlaced => "placed",
            EventKind::AdmissionRetry => "retry",
            EventKind::AnimalDeparted => "departed",
            EventKind::ShutdownRequested => return Some("[shutdown-requested]".into()),
            EventKind::AllDrainedWithin => return Some("[all-drained]".into()),
            EventKind::GraceExceeded => return Some("[grace-exceeded]".into()),
        };

        let (lake, id, species) = (e.lake?, e.animal?, e.species?);
        let mut line = format!("[{tag}] lake={lake} species={species} id={id}");
        if let Some(slots) = &e.slots {
            line.push_str(&format!(" slots={slots:?}"));
        }
        if let Some(reason) = &e.reason {
            line.push_str(&format!(" reason={reason}"));
        }
        Some(line)
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, event: &Event) {
        if let Some(line) = Self::describe(event) {
            println!("{line}");
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::animals::{Animal, Species};

    #[test]
    fn test_describe_placement() {
        let a = Animal::new(Species::Zebra, Duration::from_secs(5));
        let ev = Event::new(EventKind::AnimalPlaced)
            .with_lake(1)
            .with_animal(a.id(), a.species())
            .with_slots(vec![2, 3]);

        let line = LogWriter::describe(&ev).expect("line");
        assert!(line.starts_with("[placed] lake=1 species=zebra"));
        assert!(line.ends_with("slots=[2, 3]"));
    }

    #[test]
    fn test_describe_lifecycle_has_no_animal_fields() {
        let ev = Event::new(EventKind::AllDrainedWithin);
        assert_eq!(LogWriter::describe(&ev).as_deref(), Some("[all-drained]"));
    }

    #[test]
    fn test_describe_skips_incomplete_events() {
        // An occupancy event without its animal metadata prints nothing.
        let ev = Event::new(EventKind::AnimalPlaced);
        assert!(LogWriter::describe(&ev).is_none());
    }
}
