//! Ingestion and presentation layers for the `oncourt` binary.
//!
//! All the basketball lives in `oc_core`; this crate only knows how to
//! read a play-by-play CSV and how to draw the results.

pub mod chart;
pub mod loader;

pub use chart::{
    export_reports_csv, export_reports_json, render_credibility_curve, render_team_chart,
};
pub use loader::{load_game_log, ParseStats};
