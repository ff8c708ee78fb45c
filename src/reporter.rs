//! Turns a [`ScoreResult`] into a check run and hands it to a publisher.
//!
//! The effectful edges are traits so the reporting logic runs unchanged
//! against the real GitHub collaborators and against test fakes:
//! [`StatusPublisher`] creates the check, [`ActionHost`] receives log lines,
//! named outputs and failure messages.

use serde::Serialize;

use crate::error::Result;
use crate::output::{self, SummaryStyle};
use crate::score::{Finding, ScoreResult};

pub const CHECK_NAME: &str = "Mutation testing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    pub fn from_pass(pass: bool) -> Self {
        if pass { Conclusion::Success } else { Conclusion::Failure }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
        }
    }
}

/// Findings are always reported as warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    pub message: String,
}

impl From<&Finding> for Annotation {
    fn from(finding: &Finding) -> Self {
        Annotation {
            path: finding.file.clone(),
            start_line: finding.line,
            end_line: finding.line,
            annotation_level: AnnotationLevel::Warning,
            message: format!(
                "Mutation status: {}\n\n  Class:       {}\n  Method:      {}\n  Description: {}",
                finding.status, finding.class, finding.method, finding.info
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutput {
    pub title: String,
    pub summary: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// Where the check is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTarget {
    pub owner: String,
    pub repo: String,
    pub head_sha: String,
}

/// Body of a check-run creation. Owner and repo travel in the URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRequest {
    #[serde(skip)]
    pub owner: String,
    #[serde(skip)]
    pub repo: String,
    pub name: String,
    pub head_sha: String,
    pub status: String,
    pub conclusion: Conclusion,
    pub output: CheckOutput,
}

pub trait StatusPublisher {
    /// Create a completed check run, returning its id.
    fn create_check(&self, request: &CheckRequest) -> Result<u64>;
}

pub trait ActionHost {
    fn info(&mut self, message: &str);
    fn set_output(&mut self, name: &str, value: &str);
    fn set_failed(&mut self, message: &str);
}

/// First `max` findings as single-line warnings, in report order.
pub fn annotations(result: &ScoreResult, max: usize) -> Vec<Annotation> {
    result.findings.iter().take(max).map(Annotation::from).collect()
}

pub fn check_output(result: &ScoreResult, max_annotations: usize) -> CheckOutput {
    let conclusion = Conclusion::from_pass(result.pass);
    let summary = format!(
        "Required: {}%, actual: {}%",
        result.threshold, result.test_strength
    );
    let strength_badge = format!(
        "![Test strength](https://img.shields.io/badge/Tests_strength-{}%25-lightgrey)",
        result.test_strength
    );
    let result_badge = match conclusion {
        Conclusion::Success => {
            "![Mutation test success](https://img.shields.io/badge/Mutation_test-success-brightgreen)"
        }
        Conclusion::Failure => {
            "![Mutation test failure](https://img.shields.io/badge/Mutation_test-failure-red)"
        }
    };
    let text = format!(
        "{} {}\n\n---\n\n{}",
        strength_badge,
        result_badge,
        output::render_summary(result, SummaryStyle::Markdown)
    );

    match conclusion {
        Conclusion::Success => CheckOutput {
            title: "Test strength is good".to_string(),
            summary,
            text,
            annotations: Vec::new(),
        },
        Conclusion::Failure => CheckOutput {
            title: "Test strength is too low".to_string(),
            summary,
            text,
            annotations: annotations(result, max_annotations),
        },
    }
}

pub fn check_request(
    result: &ScoreResult,
    max_annotations: usize,
    target: &CheckTarget,
) -> CheckRequest {
    CheckRequest {
        owner: target.owner.clone(),
        repo: target.repo.clone(),
        name: CHECK_NAME.to_string(),
        head_sha: target.head_sha.clone(),
        status: "completed".to_string(),
        conclusion: Conclusion::from_pass(result.pass),
        output: check_output(result, max_annotations),
    }
}

/// Log the summary, expose `test-strength` and `result` as outputs, then
/// publish the check. A failed publish is reported through the host rather
/// than returned. Returns the created check id.
pub fn report(
    result: &ScoreResult,
    max_annotations: usize,
    target: &CheckTarget,
    publisher: &dyn StatusPublisher,
    host: &mut dyn ActionHost,
) -> Option<u64> {
    host.info(&output::render_summary(result, SummaryStyle::Plain));
    host.set_output("test-strength", &result.test_strength.to_string());
    host.set_output("result", Conclusion::from_pass(result.pass).as_str());

    let request = check_request(result, max_annotations, target);
    if let Ok(json) = serde_json::to_string(&request) {
        tracing::debug!(
            owner = %request.owner,
            repo = %request.repo,
            params = %json,
            "creating check"
        );
    }

    match publisher.create_check(&request) {
        Ok(id) => {
            host.info(&format!(
                "Check {} successfully created with conclusion {}",
                id,
                request.conclusion.as_str()
            ));
            Some(id)
        }
        Err(e) => {
            host.set_failed(&format!("Error creating check: {}", e));
            None
        }
    }
}
