use std::collections::VecDeque;
use std::sync::Mutex;

use crate::comment::CommentBody;
use crate::config::Config;
use crate::rules::default_rules;
use crate::sources::gitlab::BranchResolver;
use crate::sources::{Comment, Issue, ReworkCount};

/// Create an `Issue` with plain-text comments and no rework value.
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

/// Resolver that answers from a fixed script and records every URL it is asked about.
/// Once the script is exhausted the last answer repeats.
pub struct StaticResolver {
    answers: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl StaticResolver {
    pub fn new(answer: bool) -> Self {
        Self::sequence(&[answer])
    }

    pub fn sequence(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            last: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl BranchResolver for StaticResolver {
    fn targets_branch(&self, review_url: &str, _target_branch: &str) -> bool {
        self.calls.lock().unwrap().push(review_url.to_string());
        let mut last = self.last.lock().unwrap();
        if let Some(answer) = self.answers.lock().unwrap().pop_front() {
            *last = answer;
        }
        *last
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
