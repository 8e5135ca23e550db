use clap::{Parser, Subcommand};

/// relwatch: release readiness reports from Jira and GitLab
#[derive(Parser, Debug, Clone)]
#[command(name = "relwatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Path to config file (default: .relwatch/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Jira base URL
    #[arg(long, global = true)]
    pub jira_url: Option<String>,

    /// Jira project key whose versions are listed
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Branch that branch-based rules compare merge requests against
    #[arg(long, global = true)]
    pub target_branch: Option<String>,

    /// Maximum characters per report chunk
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// List releases that have issues
    Releases,

    /// Show the service report for a release
    Report {
        /// Release (fix version) name
        release: String,

        /// Only include issues in review status
        #[arg(long)]
        review_only: bool,
    },

    /// Print links to the release's issues in review status
    Links {
        /// Release (fix version) name
        release: String,
    },

    /// Summarize the most recent releases
    Summary,

    /// Count issues in review status across recent releases
    ReviewSummary,

    /// Print the summary periodically
    Watch {
        /// Minutes between summaries
        #[arg(long)]
        interval: Option<u64>,
    },
}
