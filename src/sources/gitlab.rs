use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Config, resolve_env};
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergeRequest {
    pub target_branch: String,
}

/// Abstraction over the GitLab REST API for testability.
pub trait GitLabClient {
    /// Fetch merge request `id` of the project at `project_path` (not encoded).
    fn get_merge_request(&self, project_path: &str, id: u64) -> Result<MergeRequest>;
}

struct DefaultGitLabClient {
    host: String,
    token: String,
    agent: ureq::Agent,
}

impl GitLabClient for DefaultGitLabClient {
    fn get_merge_request(&self, project_path: &str, id: u64) -> Result<MergeRequest> {
        match self
            .agent
            .get(&merge_request_api_url(&self.host, project_path, id))
            .set("PRIVATE-TOKEN", &self.token)
            .call()
        {
            Ok(response) => response
                .into_json()
                .map_err(|e| Error::Review(format!("failed to parse merge request: {e}"))),
            Err(ureq::Error::Status(code, _)) => {
                Err(Error::Review(format!("GitLab returned status {code}")))
            }
            Err(e) => Err(Error::Review(format!("GitLab request failed: {e}"))),
        }
    }
}

fn merge_request_api_url(host: &str, project_path: &str, id: u64) -> String {
    format!(
        "https://{host}/api/v4/projects/{}/merge_requests/{id}",
        urlencoding::encode(project_path)
    )
}

/// Answers whether a review link targets a given branch.
pub trait BranchResolver {
    fn targets_branch(&self, review_url: &str, target_branch: &str) -> bool;
}

/// A merge-request link split into its project path and numeric id.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRequestRef {
    pub project_path: String,
    pub id: u64,
}

/// Resolves merge-request links on a GitLab host. Fails closed: unparseable
/// links and any lookup failure report `false`.
pub struct GitLabResolver {
    link_re: Regex,
    client: Box<dyn GitLabClient + Send + Sync>,
}

impl GitLabResolver {
    pub fn new(config: &Config) -> Result<Self> {
        let token = resolve_env(&config.gitlab_token_env)?;
        let client = DefaultGitLabClient {
            host: config.gitlab_host.clone(),
            token,
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        };
        Ok(Self::with_client(&config.gitlab_host, Box::new(client)))
    }

    pub fn with_client(host: &str, client: Box<dyn GitLabClient + Send + Sync>) -> Self {
        // Host names are case-insensitive; the project path is kept as written.
        let pattern = format!(
            r"(?i:https://{})/(.+?)/-/merge_requests/(\d+)",
            regex::escape(host)
        );
        Self {
            link_re: Regex::new(&pattern).unwrap(),
            client,
        }
    }

    pub fn parse_link(&self, review_url: &str) -> Option<MergeRequestRef> {
        let caps = self.link_re.captures(review_url)?;
        let id = caps[2].parse::<u64>().ok()?;
        Some(MergeRequestRef {
            project_path: caps[1].to_string(),
            id,
        })
    }
}

impl BranchResolver for GitLabResolver {
    fn targets_branch(&self, review_url: &str, target_branch: &str) -> bool {
        let Some(mr) = self.parse_link(review_url) else {
            debug!(review_url, "not a merge request link");
            return false;
        };

        match self.client.get_merge_request(&mr.project_path, mr.id) {
            Ok(found) => {
                debug!(
                    project = %mr.project_path,
                    id = mr.id,
                    target = %found.target_branch,
                    "resolved merge request target"
                );
                found.target_branch == target_branch
            }
            Err(e) => {
                warn!(
                    review_url,
                    error = %e,
                    "merge request lookup failed, treating as not matching"
                );
                false
            }
        }
    }
}
