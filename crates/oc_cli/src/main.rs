//! oncourt CLI
//!
//! Play-by-play CSV → per-team ranked on/off eFG% charts

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use oc_cli::{chart, loader};
use oc_core::{team_report, Side, TeamOnOffReport};

#[derive(Parser)]
#[command(name = "oncourt")]
#[command(about = "On/off-court eFG% impact from a single game's play-by-play", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a game and render one ranked chart per team
    Analyze {
        /// Play-by-play CSV file
        #[arg(long)]
        csv: PathBuf,

        /// Home team abbreviation (e.g. DAL)
        #[arg(long)]
        home: String,

        /// Away team abbreviation (e.g. BOS)
        #[arg(long)]
        away: String,

        /// Only analyze one side (home or away)
        #[arg(long)]
        side: Option<Side>,

        /// Also write the result rows to a CSV file
        #[arg(long)]
        export_csv: Option<PathBuf>,

        /// Also write the full reports to a JSON file
        #[arg(long)]
        export_json: Option<PathBuf>,

        /// Bar width in terminal columns
        #[arg(long, default_value_t = chart::DEFAULT_WIDTH)]
        width: usize,
    },

    /// Render the credibility weighting curve
    Curve {
        /// Bar width in terminal columns
        #[arg(long, default_value_t = chart::DEFAULT_WIDTH)]
        width: usize,

        /// Number of balance steps between 0 and 1
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    info!("oncourt {} (core {})", env!("CARGO_PKG_VERSION"), oc_core::VERSION);

    match cli.command {
        Commands::Analyze {
            csv,
            home,
            away,
            side,
            export_csv,
            export_json,
            width,
        } => analyze(
            &csv,
            &home,
            &away,
            side,
            export_csv.as_deref(),
            export_json.as_deref(),
            width,
        ),
        Commands::Curve { width, steps } => {
            print!("{}", chart::render_credibility_curve(width, steps));
            Ok(())
        }
    }
}

fn analyze(
    csv: &Path,
    home: &str,
    away: &str,
    side: Option<Side>,
    export_csv: Option<&Path>,
    export_json: Option<&Path>,
    width: usize,
) -> Result<()> {
    println!("🏀 Reading play-by-play: {}", csv.display());

    let (log, stats) = loader::load_game_log(csv)?;
    println!(
        "   {} rows: {} parsed, {} skipped",
        stats.total_rows, stats.parsed, stats.skipped
    );

    let teams: Vec<(Side, &str)> = match side {
        Some(Side::Home) => vec![(Side::Home, home)],
        Some(Side::Away) => vec![(Side::Away, away)],
        None => vec![(Side::Home, home), (Side::Away, away)],
    };

    let mut reports = Vec::new();
    for (side, team) in teams {
        reports.push(team_report(&log, side, team)?);
    }

    for report in &reports {
        println!();
        print!("{}", chart::render_team_chart(report, width));
    }

    let refs: Vec<&TeamOnOffReport> = reports.iter().collect();
    if let Some(path) = export_csv {
        chart::export_reports_csv(&refs, path)?;
        println!("\n📄 Rows exported to: {}", path.display());
    }
    if let Some(path) = export_json {
        chart::export_reports_json(&refs, path)?;
        println!("\n📄 Reports exported to: {}", path.display());
    }

    Ok(())
}
