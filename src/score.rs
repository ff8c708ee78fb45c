use serde::{Deserialize, Serialize};

use crate::mutants::{MutantStatus, MutationRecord};

/// An undetected mutant, as shown to reviewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    pub class: String,
    pub method: String,
    pub line: u32,
    pub status: MutantStatus,
    pub info: String,
}

impl From<&MutationRecord> for Finding {
    fn from(record: &MutationRecord) -> Self {
        Finding {
            file: record.source_file.clone(),
            class: record.mutated_class.clone(),
            method: record.mutated_method.clone(),
            line: record.line_number,
            status: record.status.clone(),
            info: record.description.clone(),
        }
    }
}

/// Aggregate result of one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub count: usize,
    pub killed: usize,
    pub survived: usize,
    pub no_coverage: usize,
    /// Percentage of covered mutants that were killed, rounded to the nearest integer.
    pub test_strength: u32,
    pub threshold: u32,
    pub pass: bool,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// Score a set of mutation records against `threshold` (a percentage).
///
/// Statuses other than killed, survived and no-coverage count towards the
/// total and towards the covered denominator, but not towards any bucket.
pub fn compute_score(records: &[MutationRecord], threshold: u32) -> ScoreResult {
    let count = records.len();
    let killed = count_status(records, &MutantStatus::Killed);
    let survived = count_status(records, &MutantStatus::Survived);
    let no_coverage = count_status(records, &MutantStatus::NoCoverage);

    let test_strength = test_strength(killed, count - no_coverage);
    let pass = test_strength >= threshold;

    let findings: Vec<Finding> = records
        .iter()
        .filter(|r| !r.detected)
        .map(Finding::from)
        .collect();

    tracing::debug!(
        count,
        killed,
        survived,
        no_coverage,
        test_strength,
        threshold,
        pass,
        "computed score"
    );

    ScoreResult {
        count,
        killed,
        survived,
        no_coverage,
        test_strength,
        threshold,
        pass,
        findings,
    }
}

fn count_status(records: &[MutationRecord], status: &MutantStatus) -> usize {
    records.iter().filter(|r| &r.status == status).count()
}

/// `round(killed / covered * 100)`, half away from zero, in integer math.
/// No covered mutants means no strength.
pub fn test_strength(killed: usize, covered: usize) -> u32 {
    if covered == 0 {
        return 0;
    }
    let killed = killed as u64;
    let covered = covered as u64;
    ((killed * 200 + covered) / (covered * 2)) as u32
}
