pub mod gitlab;
pub mod jira;

use std::fmt;

use tracing::{debug, warn};

use crate::comment::CommentBody;
use crate::error::Result;

/// Status substrings that mark an issue as being in peer review.
pub const REVIEW_MARKERS: [&str; 2] = ["review", "ревью"];

/// Exact status name of issues waiting to be moved to deploy.
pub const DEPLOY_STATUS: &str = "Deploy";

/// Raw value of the tracker's rework field. Jira may deliver it as a number
/// or a string depending on the field type.
#[derive(Debug, Clone, PartialEq)]
pub struct ReworkCount(pub serde_json::Value);

impl ReworkCount {
    /// Numeric value, if the field holds a number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ReworkCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub body: CommentBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub rework_count: Option<ReworkCount>,
    pub comments: Vec<Comment>,
}

impl Issue {
    pub fn is_in_review(&self) -> bool {
        is_review_status(&self.status)
    }

    /// Rework value when numeric and strictly above `threshold`.
    pub fn rework_above(&self, threshold: f64) -> Option<&ReworkCount> {
        self.rework_count
            .as_ref()
            .filter(|count| count.as_f64().is_some_and(|n| n > threshold))
    }
}

pub fn is_review_status(status: &str) -> bool {
    let lower = status.to_lowercase();
    REVIEW_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    pub name: String,
    pub start_date: Option<String>,
    /// Archived versions are left out of lists and summaries.
    pub archived: bool,
}

/// Sort versions newest first by start date; versions without one go last.
pub fn sort_newest_first(versions: &mut [Version]) {
    versions.sort_by(|a, b| b.start_date.cmp(&a.start_date));
}

pub trait IssueTracker {
    /// Fetch every issue whose fix version is `release`.
    fn search_release(&self, release: &str) -> Result<Vec<Issue>>;

    /// Fetch the versions of the configured project.
    fn project_versions(&self) -> Result<Vec<Version>>;

    /// Canonical browser URL of an issue.
    fn browse_url(&self, key: &str) -> String;
}

/// Fetch release issues, collapsing any failure to an empty list.
pub fn fetch_issues(tracker: &dyn IssueTracker, release: &str) -> Vec<Issue> {
    match tracker.search_release(release) {
        Ok(issues) => {
            debug!(release, count = issues.len(), "fetched release issues");
            issues
        }
        Err(e) => {
            warn!(release, error = %e, "issue fetch failed, treating release as empty");
            Vec::new()
        }
    }
}

/// Fetch project versions, collapsing any failure to an empty list.
pub fn fetch_versions(tracker: &dyn IssueTracker) -> Vec<Version> {
    match tracker.project_versions() {
        Ok(versions) => {
            debug!(count = versions.len(), "fetched project versions");
            versions
        }
        Err(e) => {
            warn!(error = %e, "version fetch failed");
            Vec::new()
        }
    }
}
