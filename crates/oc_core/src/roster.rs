//! Roster derivation from lineup snapshots.

use crate::event::{GameLog, Side};

/// Distinct players that ever appear in `side`'s lineup slots, sorted
/// lexicographically with one entry each.
///
/// The log itself is the only source: a bench player who never stood on
/// the floor leaves no trace in any lineup snapshot and is deliberately
/// absent from the roster.
pub fn roster(log: &GameLog, side: Side) -> Vec<String> {
    let mut players: Vec<String> = log
        .events()
        .iter()
        .flat_map(|event| event.lineup(side).players().iter().cloned())
        .collect();
    players.sort_unstable();
    players.dedup();
    players
}
