use thiserror::Error;

use crate::event::Side;

/// Structural failures that abort an analysis.
///
/// Missing data is not an error here: empty on/off subsets flow through as
/// `None` fields on [`OnOffSplit`](crate::onoff::OnOffSplit) so that one
/// low-minute player never aborts a whole-roster batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid side: '{0}' (expected 'home' or 'away')")]
    InvalidSide(String),

    #[error("Unknown team: '{team}' has no events in this game log ({side} side)")]
    UnknownTeam { team: String, side: Side },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
