//! GitHub-side collaborators: event context, the checks API client, and the
//! Actions runner host.

use serde::Deserialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::reporter::{ActionHost, CheckRequest, CheckTarget, StatusPublisher};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("mutation-check/", env!("CARGO_PKG_VERSION"));

/// The triggering workflow event.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub event_name: String,
    pub sha: String,
    pub payload: Value,
}

impl EventContext {
    /// Load the event payload from `event_path`. A missing path or file
    /// leaves the payload empty; an unreadable or non-JSON file is an error.
    pub fn load(event_name: &str, sha: &str, event_path: Option<&Path>) -> Result<Self> {
        let payload = match event_path {
            Some(path) if path.exists() => {
                let data = std::fs::read_to_string(path).map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&data).map_err(|e| Error::Event {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
            }
            Some(path) => {
                tracing::warn!(path = %path.display(), "event payload file does not exist");
                Value::Null
            }
            None => Value::Null,
        };
        Ok(Self {
            event_name: event_name.to_string(),
            sha: sha.to_string(),
            payload,
        })
    }

    /// Commit the check should be attached to: the pull request head for
    /// `pull_request`, the run's head for `workflow_run`, otherwise the
    /// event's own commit.
    pub fn head_sha(&self) -> &str {
        let from_payload = match self.event_name.as_str() {
            "pull_request" => self.payload.pointer("/pull_request/head/sha"),
            "workflow_run" => self.payload.pointer("/workflow_run/head_sha"),
            _ => None,
        };
        from_payload
            .and_then(Value::as_str)
            .unwrap_or(self.sha.as_str())
    }
}

/// Split `owner/repo`.
pub fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "Repository must be given as owner/repo. Invalid value: {:?}",
            repository
        ))),
    }
}

pub fn check_target(repository: &str, event: &EventContext) -> Result<CheckTarget> {
    let (owner, repo) = split_repository(repository)?;
    Ok(CheckTarget {
        owner,
        repo,
        head_sha: event.head_sha().to_string(),
    })
}

/// Creates check runs through the REST API. One attempt per call.
pub struct ChecksClient {
    api_url: String,
    token: String,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct CreatedCheck {
    id: u64,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl ChecksClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
            agent: make_agent(),
        }
    }

    fn check_runs_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/check-runs",
            self.api_url.trim_end_matches('/'),
            owner,
            repo
        )
    }
}

impl StatusPublisher for ChecksClient {
    fn create_check(&self, request: &CheckRequest) -> Result<u64> {
        let url = self.check_runs_url(&request.owner, &request.repo);

        let response = self
            .agent
            .post(url.as_str())
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
            .send_json(request)
            .map_err(|e| Error::Publish {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let error_text = response.into_body().read_to_string().unwrap_or_default();
            return Err(Error::Publish {
                status,
                message: error_text,
            });
        }

        let created: CreatedCheck = response
            .into_body()
            .read_json()
            .map_err(|e| Error::Publish {
                status,
                message: format!("unreadable response: {}", e),
            })?;
        tracing::debug!(id = created.id, status, "check run created");
        Ok(created.id)
    }
}

/// Host side of a workflow step: logs go to stdout, outputs are appended to
/// the `GITHUB_OUTPUT` file, failures become `::error::` commands.
pub struct ActionsHost {
    output_file: Option<PathBuf>,
    failed: bool,
}

impl ActionsHost {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            failed: false,
        }
    }

    pub fn failed(&self) -> bool {
        self.failed
    }
}

impl ActionHost for ActionsHost {
    fn info(&mut self, message: &str) {
        println!("{}", message);
    }

    fn set_output(&mut self, name: &str, value: &str) {
        match &self.output_file {
            Some(path) => {
                if let Err(e) = append_output(path, name, value) {
                    tracing::warn!(
                        path = %path.display(),
                        name,
                        error = %e,
                        "failed to write step output"
                    );
                }
            }
            None => {
                tracing::debug!(name, value, "no output file configured, output not exported")
            }
        }
    }

    fn set_failed(&mut self, message: &str) {
        self.failed = true;
        println!("::error::{}", escape_data(message));
    }
}

fn append_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}={}", name, value)
}

/// Escape a workflow command message so it stays on one line.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
