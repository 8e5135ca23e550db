#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use relwatch::comment::CommentBody;
use relwatch::config::Config;
use relwatch::error::{Error, Result};
use relwatch::rules::default_rules;
use relwatch::sources::gitlab::BranchResolver;
use relwatch::sources::{Comment, Issue, IssueTracker, ReworkCount, Version};

pub fn make_issue(key: &str, status: &str, comments: &[&str]) -> Issue {
    Issue {
        key: key.to_string(),
        summary: format!("{key} summary"),
        status: status.to_string(),
        rework_count: None,
        comments: comments
            .iter()
            .map(|c| Comment {
                body: CommentBody::PlainText((*c).to_string()),
            })
            .collect(),
    }
}

pub fn with_rework(mut issue: Issue, value: serde_json::Value) -> Issue {
    issue.rework_count = Some(ReworkCount(value));
    issue
}

pub fn version(name: &str, start_date: Option<&str>) -> Version {
    Version {
        name: name.to_string(),
        start_date: start_date.map(str::to_string),
        archived: false,
    }
}

/// In-memory tracker keyed by release name. Every search is recorded.
#[derive(Default)]
pub struct MockTracker {
    pub versions: Option<Vec<Version>>,
    pub issues: HashMap<String, Vec<Issue>>,
    pub failing_releases: Vec<String>,
    searches: Arc<Mutex<Vec<String>>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self {
            versions: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn with_release(mut self, version: Version, issues: Vec<Issue>) -> Self {
        self.issues.insert(version.name.clone(), issues);
        self.versions.get_or_insert_with(Vec::new).push(version);
        self
    }

    /// Make `project_versions` fail.
    pub fn without_versions(mut self) -> Self {
        self.versions = None;
        self
    }

    pub fn failing(mut self, release: &str) -> Self {
        self.failing_releases.push(release.to_string());
        self
    }

    /// Shared handle on the releases searched so far; stays valid after
    /// the tracker is moved into an orchestrator.
    pub fn search_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.searches)
    }
}

impl IssueTracker for MockTracker {
    fn search_release(&self, release: &str) -> Result<Vec<Issue>> {
        self.searches.lock().unwrap().push(release.to_string());
        if self.failing_releases.iter().any(|r| r == release) {
            return Err(Error::Tracker("HTTP 500".to_string()));
        }
        Ok(self.issues.get(release).cloned().unwrap_or_default())
    }

    fn project_versions(&self) -> Result<Vec<Version>> {
        self.versions
            .clone()
            .ok_or_else(|| Error::Tracker("HTTP 401".to_string()))
    }

    fn browse_url(&self, key: &str) -> String {
        format!("https://jira.example.com/browse/{key}")
    }
}

/// Resolver giving the same answer for every link.
pub struct FixedResolver(pub bool);

impl BranchResolver for FixedResolver {
    fn targets_branch(&self, _review_url: &str, _target_branch: &str) -> bool {
        self.0
    }
}

/// Sensible default `Config` for tests. Callers can override fields via struct update syntax.
pub fn default_test_config() -> Config {
    Config {
        jira_url: "https://jira.example.com".to_string(),
        project_key: "BACK".to_string(),
        jira_email_env: "JIRA_EMAIL".to_string(),
        jira_token_env: "JIRA_API_TOKEN".to_string(),
        rework_field: "customfield_11087".to_string(),
        max_results: 100,
        gitlab_host: "gitlab.com".to_string(),
        gitlab_token_env: "GITLAB_PRIVATE_TOKEN".to_string(),
        target_branch: "main".to_string(),
        chunk_size: 4000,
        pace_ms: 0,
        release_limit: 20,
        summary_limit: 10,
        interval: None,
        rules: default_rules("main"),
    }
}
