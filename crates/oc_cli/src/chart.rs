//! Terminal charts and result export.
//!
//! Renders one ranked horizontal bar chart per team: bar length is the
//! player's on/off eFG% ratio, bar color is the credibility weight of
//! that ratio. Players without a computable ratio sink to the bottom
//! and show `n/a` instead of a bar. A separate chart plots the
//! credibility curve itself so the color scale can be read.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use oc_core::{credibility, OnOffSplit, TeamOnOffReport};

/// Default bar width in terminal columns.
pub const DEFAULT_WIDTH: usize = 40;

/// Credibility at or above this renders green.
const CRED_SOLID: f64 = 0.7;
/// Credibility at or above this (but below solid) renders yellow.
const CRED_SHAKY: f64 = 0.4;

/// Renders one team's ranked on/off chart.
///
/// Rows are sorted by ratio, best first. Ratios are only comparable
/// within a chart: bars are scaled so the longest one fills `width`
/// columns.
pub fn render_team_chart(report: &TeamOnOffReport, width: usize) -> String {
    let mut rows: Vec<(&String, &OnOffSplit)> = report.players.iter().collect();
    rows.sort_by(|a, b| compare_by_ratio(a.1, b.1).then_with(|| a.0.cmp(b.0)));

    let max_ratio = rows
        .iter()
        .filter_map(|(_, split)| split.ratio)
        .fold(0.0_f64, f64::max);
    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!(
            "{} ({}) teammate eFG%: on court vs off court",
            report.team, report.side
        )
        .bold()
    ));
    out.push_str(&format!(
        "{} events analyzed, {} players\n\n",
        report.events_analyzed,
        rows.len()
    ));

    for (rank, (name, split)) in rows.iter().enumerate() {
        out.push_str(&render_row(rank + 1, name, split, name_width, max_ratio, width));
    }

    out.push_str(&format!(
        "\nbar = on/off ratio, color = credibility ({} >= {:.1}, {} >= {:.1}, {} below)\n",
        "green".green(),
        CRED_SOLID,
        "yellow".yellow(),
        CRED_SHAKY,
        "red".red()
    ));
    out
}

/// Renders the credibility weighting curve: sample balance on the x
/// axis (as `steps` even slices of min/max from 0 to 1), weight on the
/// y axis.
pub fn render_credibility_curve(width: usize, steps: usize) -> String {
    // Denominator for sampling the real weighting function. Large
    // enough that every step lands on a distinct numerator.
    const SCALE: u32 = 1000;

    let mut out = String::new();
    out.push_str(&format!("{}\n", "credibility weight = sqrt(min / max)".bold()));
    out.push_str("balance  weight\n");

    for i in 0..=steps {
        let balance = i as f64 / steps as f64;
        let numerator = (balance * f64::from(SCALE)).round() as u32;
        match credibility(Some(numerator), Some(SCALE)) {
            Some(weight) => {
                let bar_len = (weight * width as f64).round() as usize;
                let bar: String = "█".repeat(bar_len);
                out.push_str(&format!(
                    "  {:.2}   {:.2}  {}\n",
                    balance,
                    weight,
                    paint(&bar, weight)
                ));
            }
            None => {
                out.push_str(&format!("  {:.2}    n/a  (one side unseen)\n", balance));
            }
        }
    }
    out
}

/// Writes every (side, player) row of the given reports as CSV.
/// Missing values become empty cells.
pub fn export_reports_csv(reports: &[&TeamOnOffReport], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export CSV: {}", path.display()))?;

    writer.write_record([
        "side",
        "team",
        "player",
        "ratio",
        "on_efg",
        "off_efg",
        "on_attempts",
        "off_attempts",
        "credibility",
    ])?;

    for report in reports {
        for (player, split) in &report.players {
            writer.write_record([
                report.side.to_string(),
                report.team.clone(),
                player.clone(),
                float_cell(split.ratio),
                float_cell(split.on_efg),
                float_cell(split.off_efg),
                count_cell(split.on_attempts),
                count_cell(split.off_attempts),
                float_cell(split.credibility),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes the given reports as pretty-printed JSON. Missing values
/// become explicit `null`s.
pub fn export_reports_json(reports: &[&TeamOnOffReport], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write export JSON: {}", path.display()))?;
    Ok(())
}

/// Best ratio first; players without a ratio sort last.
fn compare_by_ratio(a: &OnOffSplit, b: &OnOffSplit) -> Ordering {
    match (a.ratio, b.ratio) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn render_row(
    rank: usize,
    name: &str,
    split: &OnOffSplit,
    name_width: usize,
    max_ratio: f64,
    width: usize,
) -> String {
    let detail = format!(
        "on {} ({}) / off {} ({})",
        efg_cell(split.on_efg),
        attempts_cell(split.on_attempts),
        efg_cell(split.off_efg),
        attempts_cell(split.off_attempts)
    );

    match (split.ratio, split.credibility) {
        (Some(ratio), Some(cred)) => {
            let bar_len = if max_ratio > 0.0 {
                (ratio / max_ratio * width as f64).round() as usize
            } else {
                0
            };
            let bar: String = "█".repeat(bar_len);
            format!(
                "{:>2}. {:<name_width$}  {:>5.2} {}  cred {:.2}  {}\n",
                rank,
                name,
                ratio,
                paint(&bar, cred),
                cred,
                detail
            )
        }
        // A computable ratio always has a credibility weight, so
        // anything else renders as a missing row.
        _ => format!(
            "{:>2}. {:<name_width$}  {:>5}  {}\n",
            rank, name, "n/a", detail
        ),
    }
}

fn paint(bar: &str, cred: f64) -> String {
    let painted = if cred >= CRED_SOLID {
        bar.green()
    } else if cred >= CRED_SHAKY {
        bar.yellow()
    } else {
        bar.red()
    };
    painted.to_string()
}

fn efg_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "-".to_string(),
    }
}

fn attempts_cell(value: Option<u32>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

fn float_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn count_cell(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_core::Side;
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    // Fixture values are chosen so the derived columns line up with
    // the raw ones: sqrt(81/100) = 0.9, sqrt(9/100) = 0.3.
    fn sample_report() -> TeamOnOffReport {
        let mut players = BTreeMap::new();
        players.insert(
            "anchor".to_string(),
            OnOffSplit {
                on_efg: Some(0.75),
                off_efg: Some(0.5),
                on_attempts: Some(100),
                off_attempts: Some(81),
                ratio: Some(1.5),
                credibility: Some(0.9),
            },
        );
        players.insert(
            "bench".to_string(),
            OnOffSplit {
                on_efg: Some(0.4),
                off_efg: Some(0.5),
                on_attempts: Some(9),
                off_attempts: Some(100),
                ratio: Some(0.8),
                credibility: Some(0.3),
            },
        );
        // Never left the floor: no off-court sample at all.
        players.insert(
            "claw".to_string(),
            OnOffSplit {
                on_efg: Some(0.6),
                off_efg: None,
                on_attempts: Some(60),
                off_attempts: None,
                ratio: None,
                credibility: None,
            },
        );
        TeamOnOffReport {
            side: Side::Home,
            team: "DAL".to_string(),
            events_analyzed: 120,
            players,
        }
    }

    #[test]
    fn test_chart_ranks_by_ratio_with_missing_last() {
        colored::control::set_override(false);
        let chart = render_team_chart(&sample_report(), 20);

        let anchor = chart.find("anchor").unwrap();
        let bench = chart.find("bench").unwrap();
        let claw = chart.find("claw").unwrap();
        assert!(anchor < bench, "best ratio should render first:\n{}", chart);
        assert!(bench < claw, "missing ratio should render last:\n{}", chart);

        let claw_line = chart
            .lines()
            .find(|line| line.contains("claw"))
            .unwrap();
        assert!(claw_line.contains("n/a"), "missing row: {}", claw_line);
        assert!(!claw_line.contains('█'), "missing row has no bar: {}", claw_line);
    }

    #[test]
    fn test_chart_scales_longest_bar_to_width() {
        colored::control::set_override(false);
        let chart = render_team_chart(&sample_report(), 20);

        let anchor_line = chart.lines().find(|l| l.contains("anchor")).unwrap();
        let bench_line = chart.lines().find(|l| l.contains("bench")).unwrap();
        let anchor_bar = anchor_line.chars().filter(|&c| c == '█').count();
        let bench_bar = bench_line.chars().filter(|&c| c == '█').count();

        assert_eq!(anchor_bar, 20, "top ratio fills the width: {}", anchor_line);
        // 0.8 / 1.5 * 20 rounds to 11.
        assert_eq!(bench_bar, 11, "others scale off the max: {}", bench_line);
    }

    #[test]
    fn test_chart_shows_event_count_and_details() {
        colored::control::set_override(false);
        let chart = render_team_chart(&sample_report(), 20);

        assert!(chart.contains("DAL (home)"));
        assert!(chart.contains("120 events analyzed, 3 players"));
        let anchor_line = chart.lines().find(|l| l.contains("anchor")).unwrap();
        assert!(anchor_line.contains("cred 0.90"), "line: {}", anchor_line);
        assert!(anchor_line.contains("on 75.0% (100)"), "line: {}", anchor_line);
        assert!(anchor_line.contains("off 50.0% (81)"), "line: {}", anchor_line);
        let claw_line = chart.lines().find(|l| l.contains("claw")).unwrap();
        assert!(claw_line.contains("off - (-)"), "line: {}", claw_line);
    }

    #[test]
    fn test_chart_with_no_computable_ratio_renders_no_bars() {
        colored::control::set_override(false);
        let mut players = BTreeMap::new();
        players.insert(
            "only".to_string(),
            OnOffSplit {
                on_efg: None,
                off_efg: Some(0.4),
                on_attempts: None,
                off_attempts: Some(3),
                ratio: None,
                credibility: None,
            },
        );
        let report = TeamOnOffReport {
            side: Side::Away,
            team: "BOS".to_string(),
            events_analyzed: 3,
            players,
        };

        let chart = render_team_chart(&report, 20);
        assert!(chart.contains("BOS (away)"));
        assert!(!chart.contains('█'));
    }

    #[test]
    fn test_curve_spans_zero_to_one() {
        colored::control::set_override(false);
        let curve = render_credibility_curve(10, 10);

        // Perfectly balanced samples weigh 1.00 and fill the width.
        assert!(curve.contains("1.00   1.00  ██████████"), "curve:\n{}", curve);
        // A completely one-sided comparison has no weight at all.
        assert!(curve.contains("0.00    n/a"), "curve:\n{}", curve);
        // sqrt(0.5) ~= 0.71.
        assert!(curve.contains("0.50   0.71"), "curve:\n{}", curve);
        assert_eq!(curve.lines().count(), 13, "header + 11 samples:\n{}", curve);
    }

    #[test]
    fn test_csv_export_round_trips_missing_as_empty() -> Result<()> {
        let file = NamedTempFile::new()?;
        let report = sample_report();
        export_reports_csv(&[&report], file.path())?;

        let content = fs::read_to_string(file.path())?;
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "side,team,player,ratio,on_efg,off_efg,on_attempts,off_attempts,credibility"
        );

        let anchor = lines.next().unwrap();
        assert_eq!(anchor, "home,DAL,anchor,1.5,0.75,0.5,100,81,0.9");

        // claw has no off-court sample: ratio, off_efg, off_attempts
        // and credibility all export as empty cells.
        let claw: Vec<&str> = content
            .lines()
            .find(|l| l.contains("claw"))
            .unwrap()
            .split(',')
            .collect();
        assert_eq!(claw, vec!["home", "DAL", "claw", "", "0.6", "", "60", "", ""]);
        Ok(())
    }

    #[test]
    fn test_json_export_parses_back() -> Result<()> {
        let file = NamedTempFile::new()?;
        let report = sample_report();
        export_reports_json(&[&report], file.path())?;

        let content = fs::read_to_string(file.path())?;
        let parsed: Vec<TeamOnOffReport> = serde_json::from_str(&content)?;
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].team, "DAL");
        assert_eq!(parsed[0].players["bench"].ratio, Some(0.8));
        assert_eq!(parsed[0].players["claw"].ratio, None);
        assert!(content.contains("\"ratio\": null"), "nulls are explicit");
        Ok(())
    }
}
