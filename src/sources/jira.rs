use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::debug;

use crate::comment::CommentBody;
use crate::config::{Config, resolve_env};
use crate::error::{Error, Result};

use super::{Comment, Issue, IssueTracker, ReworkCount, Version};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Client abstraction (for testability)
// ---------------------------------------------------------------------------

pub trait JiraClient {
    fn get(&self, path: &str) -> Result<serde_json::Value>;
    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value>;
}

struct DefaultJiraClient {
    api_url: String,
    authorization: String,
    agent: ureq::Agent,
}

impl DefaultJiraClient {
    fn new(base_url: &str, email: &str, token: &str) -> Self {
        let credentials = STANDARD.encode(format!("{email}:{token}"));
        Self {
            api_url: format!("{base_url}/rest/api/3"),
            authorization: format!("Basic {credentials}"),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn finish(
        response: std::result::Result<ureq::Response, ureq::Error>,
    ) -> Result<serde_json::Value> {
        match response {
            Ok(response) => response
                .into_json()
                .map_err(|e| Error::Tracker(format!("failed to parse Jira response: {e}"))),
            Err(ureq::Error::Status(code, _)) => {
                Err(Error::Tracker(format!("Jira returned status {code}")))
            }
            Err(e) => Err(Error::Tracker(format!("Jira request failed: {e}"))),
        }
    }
}

impl JiraClient for DefaultJiraClient {
    fn get(&self, path: &str) -> Result<serde_json::Value> {
        Self::finish(
            self.agent
                .get(&format!("{}{path}", self.api_url))
                .set("Authorization", &self.authorization)
                .set("Accept", "application/json")
                .call(),
        )
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        Self::finish(
            self.agent
                .post(&format!("{}{path}", self.api_url))
                .set("Authorization", &self.authorization)
                .set("Accept", "application/json")
                .send_json(body),
        )
    }
}

// ---------------------------------------------------------------------------
// REST response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    key: String,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct VersionNode {
    name: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(default)]
    archived: bool,
}

// ---------------------------------------------------------------------------
// JiraSource
// ---------------------------------------------------------------------------

pub struct JiraSource {
    base_url: String,
    project_key: String,
    rework_field: String,
    max_results: u32,
    client: Box<dyn JiraClient + Send + Sync>,
}

impl JiraSource {
    pub fn new(config: &Config) -> Result<Self> {
        let email = resolve_env(&config.jira_email_env)?;
        let token = resolve_env(&config.jira_token_env)?;
        let client = DefaultJiraClient::new(&config.jira_url, &email, &token);
        Ok(Self::with_client(config, Box::new(client)))
    }

    pub fn with_client(config: &Config, client: Box<dyn JiraClient + Send + Sync>) -> Self {
        Self {
            base_url: config.jira_url.clone(),
            project_key: config.project_key.clone(),
            rework_field: config.rework_field.clone(),
            max_results: config.max_results,
            client,
        }
    }

    fn parse_issue(&self, node: IssueNode) -> Issue {
        let fields = &node.fields;
        let text = |name: &str| fields.get(name).and_then(|v| v.as_str()).map(str::to_string);

        let status = fields
            .get("status")
            .and_then(|s| s.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or_default()
            .to_string();

        let rework_count = fields
            .get(&self.rework_field)
            .filter(|v| !v.is_null())
            .cloned()
            .map(ReworkCount);

        let comments = fields
            .get("comment")
            .and_then(|c| c.get("comments"))
            .and_then(|c| c.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|c| Comment {
                        body: c
                            .get("body")
                            .map(CommentBody::from_json)
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Issue {
            key: node.key,
            summary: text("summary").unwrap_or_default(),
            status,
            rework_count,
            comments,
        }
    }
}

impl IssueTracker for JiraSource {
    fn search_release(&self, release: &str) -> Result<Vec<Issue>> {
        let payload = serde_json::json!({
            "jql": format!("fixVersion = \"{}\"", release.replace('"', "\\\"")),
            "maxResults": self.max_results,
            "fields": ["key", "summary", "status", self.rework_field, "comment"],
        });

        let data = self.client.post("/search/jql", payload)?;
        let response: SearchResponse = serde_json::from_value(data)
            .map_err(|e| Error::Tracker(format!("failed to parse Jira issues: {e}")))?;

        let issues: Vec<Issue> = response
            .issues
            .into_iter()
            .map(|node| self.parse_issue(node))
            .collect();

        debug!(release, count = issues.len(), "fetched Jira issues");
        Ok(issues)
    }

    fn project_versions(&self) -> Result<Vec<Version>> {
        let data = self
            .client
            .get(&format!("/project/{}/versions", self.project_key))?;
        let nodes: Vec<VersionNode> = serde_json::from_value(data)
            .map_err(|e| Error::Tracker(format!("failed to parse Jira versions: {e}")))?;

        Ok(nodes
            .into_iter()
            .map(|v| Version {
                name: v.name.unwrap_or_else(|| "Untitled".to_string()),
                start_date: v.start_date,
                archived: v.archived,
            })
            .collect())
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
