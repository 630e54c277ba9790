//! On/off-court partitioning and the teammate-shot filter.
//!
//! Both operations borrow rows from the immutable [`GameLog`]; nothing here
//! copies or mutates the table.

use crate::event::{GameLog, PlayEvent, Side};

/// Split the log into the rows where `player` was on the floor for `side`
/// and the rows where they were not.
///
/// Membership is exact equality against the five lineup slots, so every
/// row lands in exactly one half and the two halves recover the full log.
/// Order within each half follows the log.
pub fn partition_by_presence<'a>(
    log: &'a GameLog,
    player: &str,
    side: Side,
) -> (Vec<&'a PlayEvent>, Vec<&'a PlayEvent>) {
    let mut on_court = Vec::new();
    let mut off_court = Vec::new();
    for event in log.events() {
        if event.lineup(side).contains(player) {
            on_court.push(event);
        } else {
            off_court.push(event);
        }
    }
    (on_court, off_court)
}

/// Field goal attempts taken by `player`'s teammates on `team`.
///
/// Keeps a row only when it is credited to `team`, is a made or missed
/// field goal (free throws never qualify), and was not taken by `player`
/// themselves. Excluding the subject's own attempts keeps their shot
/// making from confounding the "impact on teammates" reading.
pub fn teammate_shots<'a>(
    events: &[&'a PlayEvent],
    player: &str,
    team: &str,
) -> Vec<&'a PlayEvent> {
    events
        .iter()
        .filter(|event| {
            event.team == team && event.is_field_goal_attempt() && event.player != player
        })
        .copied()
        .collect()
}
