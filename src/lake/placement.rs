//! # Placement policy: which slots an animal may take.
//!
//! [`find_slots`] is a pure decision function over the current slot state
//! and a species. It is called only while the lake's lock is held, so the
//! slots it sees are the latest state; it has no side effects and the
//! caller applies the returned [`Assignment`].
//!
//! ## Rules
//! - **Flamingo** (1 slot): if any flamingo is on the board, scan
//!   left-to-right for a flamingo with an empty immediate neighbor,
//!   testing index−1 before index+1 — first match wins. If no flamingo is
//!   present anywhere, take the first empty slot left-to-right.
//! - **Zebra** (2 slots): first adjacent empty pair `(i, i + 1)`
//!   left-to-right.
//! - **Hippopotamus**: never placed here — whole-lake claims go through
//!   the exclusive path.
//!
//! A `None` result with free capacity still available is how fragmentation
//! shows up: the caller releases its reservation and retries later.

use crate::animals::Species;
use crate::lake::board::Occupant;

/// Slots chosen for one admission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Assignment {
    /// One slot.
    Single(usize),
    /// Two index-adjacent slots, ascending.
    Pair(usize, usize),
}

impl Assignment {
    /// The assigned indices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let (a, b) = match *self {
            Assignment::Single(i) => (i, None),
            Assignment::Pair(i, j) => (i, Some(j)),
        };
        std::iter::once(a).chain(b)
    }
}

/// Decides which slot(s) the given species may occupy, if any.
pub(crate) fn find_slots(slots: &[Option<Occupant>], species: Species) -> Option<Assignment> {
    match species {
        Species::Flamingo => place_flamingo(slots),
        Species::Zebra => place_zebra(slots),
        Species::Hippopotamus => None,
    }
}

fn place_flamingo(slots: &[Option<Occupant>]) -> Option<Assignment> {
    let flock_present = slots
        .iter()
        .flatten()
        .any(|o| o.species == Species::Flamingo);

    if !flock_present {
        return slots
            .iter()
            .position(Option::is_none)
            .map(Assignment::Single);
    }

    for (i, slot) in slots.iter().enumerate() {
        if !slot.is_some_and(|o| o.species == Species::Flamingo) {
            continue;
        }
        if i > 0 && slots[i - 1].is_none() {
            return Some(Assignment::Single(i - 1));
        }
        if i + 1 < slots.len() && slots[i + 1].is_none() {
            return Some(Assignment::Single(i + 1));
        }
    }
    None
}

fn place_zebra(slots: &[Option<Occupant>]) -> Option<Assignment> {
    slots
        .windows(2)
        .position(|pair| pair[0].is_none() && pair[1].is_none())
        .map(|i| Assignment::Pair(i, i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::animals::Animal;

    fn occupant(species: Species) -> Option<Occupant> {
        let a = Animal::new(species, Duration::from_secs(1));
        Some(Occupant {
            id: a.id(),
            species: a.species(),
        })
    }

    fn board(pattern: &str) -> Vec<Option<Occupant>> {
        pattern
            .chars()
            .map(|c| match c {
                '.' => None,
                'f' => occupant(Species::Flamingo),
                'z' => occupant(Species::Zebra),
                _ => panic!("unknown pattern char {c}"),
            })
            .collect()
    }

    #[test]
    fn test_first_flamingo_takes_lowest_empty_slot() {
        let slots = board(".....");
        assert_eq!(
            find_slots(&slots, Species::Flamingo),
            Some(Assignment::Single(0))
        );

        let slots = board("zz...");
        assert_eq!(
            find_slots(&slots, Species::Flamingo),
            Some(Assignment::Single(2))
        );
    }

    #[test]
    fn test_flamingo_joins_the_flock() {
        // Neighbor below the first flamingo is preferred...
        let slots = board(".f...");
        assert_eq!(
            find_slots(&slots, Species::Flamingo),
            Some(Assignment::Single(0))
        );

        // ...and index+1 is used when index-1 is taken or out of range.
        let slots = board("f....");
        assert_eq!(
            find_slots(&slots, Species::Flamingo),
            Some(Assignment::Single(1))
        );

        let slots = board("zf...");
        assert_eq!(
            find_slots(&slots, Species::Flamingo),
            Some(Assignment::Single(2))
        );
    }

    #[test]
    fn test_flamingo_first_neighborly_match_wins() {
        // Two flamingos with free neighbors: the leftmost flamingo's
        // own left neighbor wins.
        let slots = board(".f.f.");
        assert_eq!(
            find_slots(&slots, Species::Flamingo),
            Some(Assignment::Single(0))
        );
    }

    #[test]
    fn test_flamingo_flock_hemmed_in_yields_none() {
        // A flamingo is present but has no free neighbor: no placement,
        // even though slot 3 is empty. This is the fragmentation case the
        // retry loop exists for.
        let slots = board("fzz.");
        assert_eq!(find_slots(&slots, Species::Flamingo), None);
    }

    #[test]
    fn test_zebra_takes_first_contiguous_pair() {
        let slots = board(".....");
        assert_eq!(
            find_slots(&slots, Species::Zebra),
            Some(Assignment::Pair(0, 1))
        );

        let slots = board("ff...");
        assert_eq!(
            find_slots(&slots, Species::Zebra),
            Some(Assignment::Pair(2, 3))
        );
    }

    #[test]
    fn test_zebra_fragmented_capacity_yields_none() {
        // Three free slots, but never two adjacent.
        let slots = board(".f.f.");
        assert_eq!(find_slots(&slots, Species::Zebra), None);
    }

    #[test]
    fn test_full_board_yields_none_for_everyone() {
        let slots = board("fzzff");
        assert_eq!(find_slots(&slots, Species::Flamingo), None);
        assert_eq!(find_slots(&slots, Species::Zebra), None);
    }

    #[test]
    fn test_hippo_is_never_placed_here() {
        let slots = board(".....");
        assert_eq!(find_slots(&slots, Species::Hippopotamus), None);
    }

    #[test]
    fn test_assignment_indices() {
        assert_eq!(Assignment::Single(3).indices().collect::<Vec<_>>(), [3]);
        assert_eq!(
            Assignment::Pair(1, 2).indices().collect::<Vec<_>>(),
            [1, 2]
        );
    }
}
