pub mod config;
pub mod error;
pub mod github;
pub mod mutants;
pub mod output;
pub mod report;
pub mod reporter;
pub mod score;

pub use error::{Error, Result};

/// Read the report at `path` and score it against `threshold`.
pub fn run_pipeline(path: &std::path::Path, threshold: u32) -> Result<score::ScoreResult> {
    let records = report::read_report(path)?;
    Ok(score::compute_score(&records, threshold))
}
