//! Play-by-play data model.
//!
//! A game log is a flat table of [`PlayEvent`] rows in chronological order.
//! Every row carries a full snapshot of both five-man lineups at the moment
//! the event happened, which turns the on/off-court question into a plain
//! membership test instead of a stateful substitution replay.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Number of players a side has on the floor at any moment.
pub const LINEUP_SIZE: usize = 5;

/// Which bench a player belongs to within a single game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl FromStr for Side {
    type Err = AnalysisError;

    /// Case-insensitive parse of a side selector. Anything other than
    /// `home`/`away` fails fast instead of being coerced to one side.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Side::Home),
            "away" => Ok(Side::Away),
            _ => Err(AnalysisError::InvalidSide(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

/// Coarse classification of a play-by-play row.
///
/// Only field goal attempts feed the efficiency numbers; every other row
/// matters solely through the lineup snapshot it carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Made field goal.
    Shot,
    /// Missed field goal.
    Miss,
    /// Free throw, made or missed. Never an eFG% attempt.
    FreeThrow,
    /// Rebound, turnover, foul, timeout, anything else.
    Other,
}

impl EventKind {
    /// Parse a raw `event_type` label. Unrecognized labels fold into
    /// [`EventKind::Other`] so exotic rows still contribute their lineup
    /// snapshots to the partitions.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "shot" => EventKind::Shot,
            "miss" => EventKind::Miss,
            "free throw" | "free_throw" | "freethrow" => EventKind::FreeThrow,
            _ => EventKind::Other,
        }
    }

    /// Whether this row is a made or missed field goal.
    pub fn is_field_goal_attempt(self) -> bool {
        matches!(self, EventKind::Shot | EventKind::Miss)
    }
}

/// The five players a side had on the floor when an event happened.
///
/// Slot order follows the source columns and carries no meaning; only
/// membership does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lineup([String; LINEUP_SIZE]);

impl Lineup {
    pub fn new(players: [String; LINEUP_SIZE]) -> Self {
        Lineup(players)
    }

    /// Membership test against the five slots.
    pub fn contains(&self, player: &str) -> bool {
        self.0.iter().any(|slot| slot == player)
    }

    /// The slot values in column order.
    pub fn players(&self) -> &[String; LINEUP_SIZE] {
        &self.0
    }
}

impl From<[&str; LINEUP_SIZE]> for Lineup {
    fn from(players: [&str; LINEUP_SIZE]) -> Self {
        Lineup(players.map(String::from))
    }
}

/// One row of the play-by-play table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayEvent {
    /// Abbreviation of the team the event is credited to (e.g. `"DAL"`).
    pub team: String,
    #[serde(rename = "event_type")]
    pub kind: EventKind,
    /// Player the event is credited to. Empty for rows without a single
    /// actor (team rebounds, timeouts).
    pub player: String,
    /// Point value of the attempt: 2 or 3 for field goals, 1 for free
    /// throws, 0 when the source column is empty.
    pub points: u8,
    /// Home five on the floor when the event happened.
    pub home_lineup: Lineup,
    /// Away five on the floor when the event happened.
    pub away_lineup: Lineup,
}

impl PlayEvent {
    /// Lineup snapshot for the requested side.
    pub fn lineup(&self, side: Side) -> &Lineup {
        match side {
            Side::Home => &self.home_lineup,
            Side::Away => &self.away_lineup,
        }
    }

    pub fn is_field_goal_attempt(&self) -> bool {
        self.kind.is_field_goal_attempt()
    }

    /// Whether the attempt was from three-point range.
    pub fn is_three_pointer(&self) -> bool {
        self.points == 3
    }
}

/// A full game's play-by-play in chronological order.
///
/// Immutable after construction; every analysis borrows from it and derived
/// structures never write back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameLog {
    events: Vec<PlayEvent>,
}

impl GameLog {
    pub fn new(events: Vec<PlayEvent>) -> Self {
        GameLog { events }
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether any row is credited to `team`.
    pub fn has_team(&self, team: &str) -> bool {
        self.events.iter().any(|event| event.team == team)
    }

    /// Distinct team abbreviations in first-appearance order.
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = Vec::new();
        for event in &self.events {
            if !event.team.is_empty() && !teams.contains(&event.team.as_str()) {
                teams.push(&event.team);
            }
        }
        teams
    }
}
