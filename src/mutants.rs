use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single mutant as recorded by the report.
///
/// Only the three statuses the score depends on get their own variant. Any
/// other value (`TIMED_OUT`, `NON_VIABLE`, `MEMORY_ERROR`, ...) is carried
/// through verbatim so it still shows up in findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MutantStatus {
    Killed,
    Survived,
    NoCoverage,
    Other(String),
}

impl MutantStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "KILLED" => MutantStatus::Killed,
            "SURVIVED" => MutantStatus::Survived,
            "NO_COVERAGE" => MutantStatus::NoCoverage,
            other => MutantStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MutantStatus::Killed => "KILLED",
            MutantStatus::Survived => "SURVIVED",
            MutantStatus::NoCoverage => "NO_COVERAGE",
            MutantStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for MutantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MutantStatus {
    fn from(raw: String) -> Self {
        MutantStatus::parse(&raw)
    }
}

impl From<MutantStatus> for String {
    fn from(status: MutantStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One mutated code location and whether the test suite noticed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub source_file: String,
    pub mutated_class: String,
    pub mutated_method: String,
    pub line_number: u32,
    pub status: MutantStatus,
    pub detected: bool,
    pub description: String,
}
