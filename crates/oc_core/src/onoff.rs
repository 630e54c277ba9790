//! Per-player on/off assembly and the whole-roster batch.
//!
//! [`player_split`] composes the partition, the teammate filter, and the
//! eFG% formula into one [`OnOffSplit`] row; [`team_report`] runs it over a
//! derived roster. Each player's computation reads only the shared
//! immutable log and writes only its own row, so the batch runs in
//! parallel with no coordination.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::efficiency::{credibility, efficiency_ratio, ShotTally};
use crate::error::{AnalysisError, Result};
use crate::event::{GameLog, Side};
use crate::roster::roster;
use crate::split::{partition_by_presence, teammate_shots};

/// One player's on/off comparison.
///
/// Every field is optional: an empty on- or off-court teammate sample
/// leaves its side of the comparison (and anything derived from it)
/// missing. Serialized as explicit `null`s so consumers cannot mistake
/// missing for zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnOffSplit {
    /// `on_efg / off_efg`; missing when either side is, or when `off_efg`
    /// is zero.
    pub ratio: Option<f64>,
    /// Teammate eFG% with the subject on the floor.
    pub on_efg: Option<f64>,
    /// Teammate eFG% with the subject off the floor.
    pub off_efg: Option<f64>,
    /// Teammate field goal attempts with the subject on the floor.
    pub on_attempts: Option<u32>,
    /// Teammate field goal attempts with the subject off the floor.
    pub off_attempts: Option<u32>,
    /// Square-root sample-balance weight over the two attempt counts.
    pub credibility: Option<f64>,
}

impl OnOffSplit {
    /// Whether any side of the comparison exists at all.
    pub fn has_data(&self) -> bool {
        self.on_attempts.is_some() || self.off_attempts.is_some()
    }
}

/// A full team's on/off table for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOnOffReport {
    pub side: Side,
    /// Team abbreviation the teammate filter ran against.
    pub team: String,
    /// Rows of the source log the analysis read.
    pub events_analyzed: usize,
    /// One row per roster member, keyed by player identifier.
    pub players: BTreeMap<String, OnOffSplit>,
}

/// Compute one player's [`OnOffSplit`].
///
/// `side` selects which lineup column decides presence; `team` is the
/// abbreviation whose shots count as teammate shots. Missing halves are
/// reported per field, never as an error, so a twelfth man with two
/// minutes of floor time yields a mostly-`None` row instead of failing
/// the batch.
pub fn player_split(log: &GameLog, player: &str, side: Side, team: &str) -> OnOffSplit {
    // 1. Partition the log by the player's presence in the side's lineup.
    let (on_events, off_events) = partition_by_presence(log, player, side);

    // 2. Keep teammate field goal attempts in each half.
    let on_shots = teammate_shots(&on_events, player, team);
    let off_shots = teammate_shots(&off_events, player, team);

    // 3. Tally the halves; an empty half stays missing from here on.
    let on_tally = ShotTally::from_events(&on_shots);
    let off_tally = ShotTally::from_events(&off_shots);
    let on_attempts = (on_tally.attempts > 0).then_some(on_tally.attempts);
    let off_attempts = (off_tally.attempts > 0).then_some(off_tally.attempts);
    // Expected for low-minute players, so this never rises above debug.
    if on_attempts.is_none() {
        debug!("No on-court teammate attempts for {} ({}, {} side)", player, team, side);
    }
    if off_attempts.is_none() {
        debug!("No off-court teammate attempts for {} ({}, {} side)", player, team, side);
    }

    // 4. Derive percentages, the ratio, and the balance weight.
    let on_efg = on_tally.efg();
    let off_efg = off_tally.efg();
    OnOffSplit {
        ratio: efficiency_ratio(on_efg, off_efg),
        on_efg,
        off_efg,
        on_attempts,
        off_attempts,
        credibility: credibility(on_attempts, off_attempts),
    }
}

/// Run [`player_split`] across the derived roster of `side`.
///
/// Every roster member gets a row, including players whose fields are all
/// missing. Fails up front with [`AnalysisError::UnknownTeam`] when the
/// abbreviation never appears in the log; a typo'd team would otherwise
/// produce a silently all-missing table.
pub fn team_report(log: &GameLog, side: Side, team: &str) -> Result<TeamOnOffReport> {
    if !log.has_team(team) {
        return Err(AnalysisError::UnknownTeam {
            team: team.to_string(),
            side,
        });
    }

    let players: BTreeMap<String, OnOffSplit> = roster(log, side)
        .into_par_iter()
        .map(|player| {
            let split = player_split(log, &player, side, team);
            (player, split)
        })
        .collect();

    Ok(TeamOnOffReport {
        side,
        team: team.to_string(),
        events_analyzed: log.len(),
        players,
    })
}
