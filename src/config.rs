use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::{Cli, CliCommand};
use crate::error::{Error, Result};
use crate::rules::{RawRule, Rule, compile_rules, default_rules};

pub const DEFAULT_CONFIG_PATH: &str = ".relwatch/config.toml";

/// Longest accepted `watch` interval: one week.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub jira_url: Option<String>,
    pub project_key: Option<String>,
    pub jira_email_env: Option<String>,
    pub jira_token_env: Option<String>,
    pub rework_field: Option<String>,
    pub max_results: Option<u32>,
    pub gitlab_host: Option<String>,
    pub gitlab_token_env: Option<String>,
    pub target_branch: Option<String>,
    pub chunk_size: Option<usize>,
    pub pace_ms: Option<u64>,
    pub release_limit: Option<usize>,
    pub summary_limit: Option<usize>,
    pub interval: Option<u64>,
    pub rules: Option<Vec<RawRule>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub jira_url: String,
    pub project_key: String,
    pub jira_email_env: String,
    pub jira_token_env: String,
    pub rework_field: String,
    pub max_results: u32,
    pub gitlab_host: String,
    pub gitlab_token_env: String,
    pub target_branch: String,
    pub chunk_size: usize,
    pub pace_ms: u64,
    pub release_limit: usize,
    pub summary_limit: usize,
    /// Minutes between `watch` summaries.
    pub interval: Option<u64>,
    pub rules: Vec<Rule>,
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = Path::new(cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));
        let file_config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            parse_config(&content)?
        } else {
            return Err(Error::ConfigNotFound(config_path.to_path_buf()));
        };

        merge(file_config, cli)
    }

    /// Time between `watch` summaries.
    pub fn watch_period(&self) -> Result<Duration> {
        let minutes = self.interval.ok_or_else(|| {
            Error::ConfigValidation(
                "watch needs an interval (--interval or `interval` in config)".to_string(),
            )
        })?;
        check_interval(Some(minutes))?;
        minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| Error::ConfigValidation(format!("interval too large: {minutes}")))
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref url) = config.jira_url
        && !(url.starts_with("https://") || url.starts_with("http://"))
    {
        return Err(Error::ConfigValidation(format!(
            "jira_url must be an http(s) URL, got: {url}"
        )));
    }
    if config.chunk_size == Some(0) {
        return Err(Error::ConfigValidation("chunk_size must be > 0".to_string()));
    }
    if config.max_results == Some(0) {
        return Err(Error::ConfigValidation(
            "max_results must be > 0".to_string(),
        ));
    }
    check_interval(config.interval)?;
    if let Some(ref rules) = config.rules {
        compile_rules(rules.clone())?;
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Result<Config> {
    let jira_url = cli
        .jira_url
        .clone()
        .or(file.jira_url)
        .map(|url| url.trim_end_matches('/').to_string())
        .ok_or_else(|| {
            Error::ConfigValidation("jira_url is required (config file or --jira-url)".to_string())
        })?;

    let target_branch = cli
        .target_branch
        .clone()
        .or(file.target_branch)
        .unwrap_or_else(|| "main".to_string());

    let rules = match file.rules {
        Some(raw) => compile_rules(raw)?,
        None => default_rules(&target_branch),
    };

    let interval = match &cli.command {
        CliCommand::Watch { interval } => interval.or(file.interval),
        _ => file.interval,
    };
    check_interval(interval)?;

    let chunk_size = cli.chunk_size.or(file.chunk_size).unwrap_or(4000);
    if chunk_size == 0 {
        return Err(Error::ConfigValidation("chunk_size must be > 0".to_string()));
    }

    Ok(Config {
        jira_url,
        project_key: cli
            .project
            .clone()
            .or(file.project_key)
            .unwrap_or_else(|| "BACK".to_string()),
        jira_email_env: file
            .jira_email_env
            .unwrap_or_else(|| "JIRA_EMAIL".to_string()),
        jira_token_env: file
            .jira_token_env
            .unwrap_or_else(|| "JIRA_API_TOKEN".to_string()),
        rework_field: file
            .rework_field
            .unwrap_or_else(|| "customfield_11087".to_string()),
        max_results: file.max_results.unwrap_or(100),
        gitlab_host: file
            .gitlab_host
            .unwrap_or_else(|| "gitlab.com".to_string()),
        gitlab_token_env: file
            .gitlab_token_env
            .unwrap_or_else(|| "GITLAB_PRIVATE_TOKEN".to_string()),
        target_branch,
        chunk_size,
        pace_ms: file.pace_ms.unwrap_or(500),
        release_limit: file.release_limit.unwrap_or(20),
        summary_limit: file.summary_limit.unwrap_or(10),
        interval,
        rules,
    })
}

fn check_interval(interval: Option<u64>) -> Result<()> {
    match interval {
        Some(0) => Err(Error::ConfigValidation("interval must be > 0".to_string())),
        Some(minutes) if minutes > MAX_INTERVAL_MINUTES => Err(Error::ConfigValidation(format!(
            "interval must be at most {MAX_INTERVAL_MINUTES} minutes, got {minutes}"
        ))),
        _ => Ok(()),
    }
}

/// Read a required credential from the environment.
pub fn resolve_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::ConfigValidation(format!(
            "environment variable ${name} is not set"
        ))),
    }
}
