//! # oc_core - On/Off-Court Efficiency Analysis
//!
//! Computes, from a single game's play-by-play log, how a team's shooting
//! efficiency (effective field goal percentage) with a given player on the
//! floor compares to its efficiency with that player off the floor.
//!
//! ## Pipeline
//! - derive a side's roster from the lineup snapshots ([`roster::roster`])
//! - partition the log by a player's presence ([`split::partition_by_presence`])
//! - keep teammate field goal attempts only ([`split::teammate_shots`])
//! - tally eFG%, the on/off ratio, and a sample-balance weight
//!   ([`efficiency`], [`onoff::player_split`])
//! - batch over the whole roster ([`onoff::team_report`])
//!
//! The log is immutable once built; every derived structure borrows from it
//! and per-player results never depend on each other, which is what lets
//! [`onoff::team_report`] fan out across a thread pool without changing any
//! number.

pub mod efficiency;
pub mod error;
pub mod event;
pub mod onoff;
pub mod roster;
pub mod split;

// Re-export the analysis surface
pub use efficiency::{credibility, efficiency_ratio, ShotTally};
pub use error::{AnalysisError, Result};
pub use event::{EventKind, GameLog, Lineup, PlayEvent, Side, LINEUP_SIZE};
pub use onoff::{player_split, team_report, OnOffSplit, TeamOnOffReport};
pub use roster::roster;
pub use split::{partition_by_presence, teammate_shots};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
