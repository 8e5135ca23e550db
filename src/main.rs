use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relwatch::cli::{Cli, CliCommand};
use relwatch::config::Config;
use relwatch::error::{Error, Result};
use relwatch::orchestrator::{Orchestrator, run_watch, timestamp_now};
use relwatch::report::ReportOutcome;
use relwatch::sink::{StdoutSink, deliver_outcome, stdout_sink};
use relwatch::sources::gitlab::GitLabResolver;
use relwatch::sources::jira::JiraSource;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    info!("relwatch starting");

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli)?;
    info!(
        jira_url = %config.jira_url,
        project = %config.project_key,
        target_branch = %config.target_branch,
        rules = config.rules.len(),
        "config loaded"
    );

    let tracker = JiraSource::new(&config)?;
    let resolver = GitLabResolver::new(&config)?;
    let orchestrator = Arc::new(Orchestrator::new(
        Box::new(tracker),
        Box::new(resolver),
        config,
    ));
    let sink = stdout_sink();
    let pace = orchestrator.pace();

    let command = match cli.command {
        CliCommand::Watch { .. } => return watch(orchestrator, &sink).await,
        other => other,
    };

    let orch = Arc::clone(&orchestrator);
    let outcome = tokio::task::spawn_blocking(move || render(&orch, command))
        .await
        .map_err(|e| Error::Delivery(format!("report task failed: {e}")))?;

    deliver_outcome(&sink, &outcome, pace).await
}

fn render(orch: &Orchestrator, command: CliCommand) -> ReportOutcome {
    match command {
        CliCommand::Releases => orch.releases(),
        CliCommand::Report {
            release,
            review_only,
        } => orch.report(&release, review_only),
        CliCommand::Links { release } => orch.links(&release),
        // A single watch tick is a summary.
        CliCommand::Summary | CliCommand::Watch { .. } => orch.summary(&timestamp_now()),
        CliCommand::ReviewSummary => orch.review_summary(),
    }
}

async fn watch(orchestrator: Arc<Orchestrator>, sink: &StdoutSink) -> Result<()> {
    let every = orchestrator.config().watch_period()?;

    let (tx, rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });

    info!(minutes = every.as_secs() / 60, "watching releases");
    run_watch(orchestrator, sink, every, rx).await
}
