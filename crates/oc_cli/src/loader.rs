//! Play-by-play CSV ingestion.
//!
//! Reads one game's event log from disk and turns it into an
//! [`oc_core::GameLog`]. Rows that cannot be trusted (truncated lineups,
//! shot rows without a shooter, impossible point values) are skipped
//! with a warning rather than aborting the whole run; the caller gets a
//! [`ParseStats`] alongside the log so it can report how lossy the
//! ingestion was.

use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Deserialize;

use oc_core::{EventKind, GameLog, Lineup, PlayEvent, LINEUP_SIZE};

/// One raw CSV row, field names matching the expected header:
///
/// ```text
/// team,event_type,player,points,home_1,...,home_5,away_1,...,away_5
/// ```
///
/// `points` is optional because non-scoring rows (rebounds, turnovers)
/// leave the column blank.
#[derive(Debug, Deserialize)]
struct RawRow {
    team: String,
    event_type: String,
    #[serde(default)]
    player: String,
    points: Option<u8>,
    home_1: String,
    home_2: String,
    home_3: String,
    home_4: String,
    home_5: String,
    away_1: String,
    away_2: String,
    away_3: String,
    away_4: String,
    away_5: String,
}

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub skipped: u32,
}

/// Loads a play-by-play CSV into a [`GameLog`].
///
/// Malformed rows are logged and skipped. Fails only when the file
/// cannot be read at all or when not a single row survives validation.
pub fn load_game_log(csv_path: &Path) -> Result<(GameLog, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open play-by-play CSV: {}", csv_path.display()))?;

    let mut events = Vec::new();
    let mut stats = ParseStats::default();

    for row in reader.deserialize::<RawRow>() {
        stats.total_rows += 1;
        // First data row sits on file line 2, after the header.
        let line = stats.total_rows + 1;

        let raw = match row {
            Ok(raw) => raw,
            Err(err) => {
                stats.skipped += 1;
                warn!("Line {}: unreadable row, skipping ({})", line, err);
                continue;
            }
        };

        match validate_row(raw) {
            Ok(event) => {
                stats.parsed += 1;
                events.push(event);
            }
            Err(reason) => {
                stats.skipped += 1;
                warn!("Line {}: {}, skipping", line, reason);
            }
        }
    }

    if stats.parsed == 0 {
        bail!(
            "No valid events in {} ({} rows, all skipped)",
            csv_path.display(),
            stats.total_rows
        );
    }

    info!(
        "Loaded {} events from {} ({} skipped)",
        stats.parsed,
        csv_path.display(),
        stats.skipped
    );

    Ok((GameLog::new(events), stats))
}

/// Checks one raw row and converts it into a [`PlayEvent`].
///
/// A row is only usable when both lineup snapshots are complete, and
/// field goal rows additionally need a shooter and a 2 or 3 point
/// value. Everything else rides along untouched: unknown event labels
/// become [`EventKind::Other`] and still carry their lineups.
fn validate_row(raw: RawRow) -> std::result::Result<PlayEvent, String> {
    let home: [String; LINEUP_SIZE] =
        [raw.home_1, raw.home_2, raw.home_3, raw.home_4, raw.home_5];
    let away: [String; LINEUP_SIZE] =
        [raw.away_1, raw.away_2, raw.away_3, raw.away_4, raw.away_5];

    if home.iter().chain(away.iter()).any(String::is_empty) {
        return Err("incomplete lineup snapshot".to_string());
    }
    if raw.team.is_empty() {
        return Err("missing team abbreviation".to_string());
    }

    let kind = EventKind::from_label(&raw.event_type);
    let points = raw.points.unwrap_or(0);

    if kind.is_field_goal_attempt() {
        if raw.player.is_empty() {
            return Err(format!("'{}' row without a shooter", raw.event_type));
        }
        if !matches!(points, 2 | 3) {
            return Err(format!("field goal attempt worth {} points", points));
        }
    }

    Ok(PlayEvent {
        team: raw.team,
        kind,
        player: raw.player,
        points,
        home_lineup: Lineup::new(home),
        away_lineup: Lineup::new(away),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "team,event_type,player,points,\
        home_1,home_2,home_3,home_4,home_5,\
        away_1,away_2,away_3,away_4,away_5";

    fn write_csv(rows: &[&str]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", HEADER)?;
        for row in rows {
            writeln!(file, "{}", row)?;
        }
        Ok(file)
    }

    #[test]
    fn test_load_valid_game() -> Result<()> {
        let file = write_csv(&[
            "DAL,shot,a1,2,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            "BOS,miss,b3,3,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
        ])?;

        let (log, stats) = load_game_log(file.path())?;

        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.skipped, 0);
        assert_eq!(log.len(), 2);

        let first = &log.events()[0];
        assert_eq!(first.team, "DAL");
        assert_eq!(first.kind, EventKind::Shot);
        assert_eq!(first.player, "a1");
        assert_eq!(first.points, 2);
        assert!(first.home_lineup.contains("a3"));
        assert!(first.away_lineup.contains("b5"));
        Ok(())
    }

    #[test]
    fn test_blank_points_on_non_scoring_rows() -> Result<()> {
        let file = write_csv(&[
            "DAL,rebound,a2,,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            "DAL,shot,a1,2,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
        ])?;

        let (log, stats) = load_game_log(file.path())?;

        assert_eq!(stats.parsed, 2);
        let rebound = &log.events()[0];
        assert_eq!(rebound.kind, EventKind::Other);
        assert_eq!(rebound.points, 0);
        Ok(())
    }

    #[test]
    fn test_free_throws_load_without_point_check() -> Result<()> {
        let file = write_csv(&[
            "BOS,free_throw,b1,1,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
        ])?;

        let (log, stats) = load_game_log(file.path())?;

        assert_eq!(stats.parsed, 1);
        assert_eq!(log.events()[0].kind, EventKind::FreeThrow);
        assert_eq!(log.events()[0].points, 1);
        Ok(())
    }

    #[test]
    fn test_skips_invalid_rows() -> Result<()> {
        let file = write_csv(&[
            // Valid.
            "DAL,shot,a1,2,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            // Missing one away lineup slot.
            "DAL,shot,a1,2,a1,a2,a3,a4,a5,b1,b2,b3,b4,",
            // Shot without a shooter.
            "DAL,shot,,2,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            // Shot worth 7 points.
            "DAL,shot,a1,7,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            // Miss with blank points.
            "BOS,miss,b1,,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            // Wrong column count, fails deserialization.
            "DAL,shot,a1,2,a1,a2,a3",
        ])?;

        let (log, stats) = load_game_log(file.path())?;

        assert_eq!(stats.total_rows, 6);
        assert_eq!(stats.parsed, 1);
        assert_eq!(stats.skipped, 5);
        assert_eq!(log.len(), 1);
        Ok(())
    }

    #[test]
    fn test_all_rows_invalid_is_an_error() -> Result<()> {
        let file = write_csv(&[
            "DAL,shot,,2,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
            "DAL,shot,a1,9,a1,a2,a3,a4,a5,b1,b2,b3,b4,b5",
        ])?;

        let result = load_game_log(file.path());

        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(
            message.contains("No valid events"),
            "unexpected error: {}",
            message
        );
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_game_log(Path::new("/nonexistent/game.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_whitespace_is_trimmed() -> Result<()> {
        let file = write_csv(&[
            "DAL , shot , a1 ,2, a1 ,a2,a3,a4,a5,b1,b2,b3,b4,b5",
        ])?;

        let (log, _) = load_game_log(file.path())?;

        assert_eq!(log.events()[0].team, "DAL");
        assert_eq!(log.events()[0].player, "a1");
        assert!(log.events()[0].home_lineup.contains("a1"));
        Ok(())
    }
}
