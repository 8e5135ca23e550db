use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::classify::Classifier;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::{
    DisplayMode, ReleaseStats, ReportOptions, ReportOutcome, build_link_report, build_report,
    into_chunks, render_release_list, render_review_summary, render_summary,
};
use crate::sink::{ReportSink, deliver_all};
use crate::sources::gitlab::BranchResolver;
use crate::sources::{IssueTracker, Version, fetch_issues, fetch_versions, sort_newest_first};

const FETCH_FAILED: &str = "❌ Failed to fetch the release list";

/// Local time in the format used by summaries.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M %d.%m.%Y").to_string()
}

/// Ties the tracker, the branch resolver and the config together for each
/// kind of report. Every method fetches fresh data; nothing is cached.
pub struct Orchestrator {
    tracker: Box<dyn IssueTracker + Send + Sync>,
    resolver: Box<dyn BranchResolver + Send + Sync>,
    config: Config,
}

impl Orchestrator {
    pub fn new(
        tracker: Box<dyn IssueTracker + Send + Sync>,
        resolver: Box<dyn BranchResolver + Send + Sync>,
        config: Config,
    ) -> Self {
        Self {
            tracker,
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.config.pace_ms)
    }

    fn classifier(&self) -> Classifier<'_> {
        Classifier::new(
            &self.config.rules,
            self.resolver.as_ref(),
            &self.config.target_branch,
        )
    }

    /// Full (or review-only) service report for one release.
    pub fn report(&self, release: &str, review_only: bool) -> ReportOutcome {
        let issues = fetch_issues(self.tracker.as_ref(), release);
        info!(release, count = issues.len(), review_only, "building report");
        build_report(
            release,
            &issues,
            &self.classifier(),
            ReportOptions {
                review_only,
                chunk_size: self.config.chunk_size,
            },
        )
    }

    /// Links to the release's issues in review status.
    pub fn links(&self, release: &str) -> ReportOutcome {
        let issues = fetch_issues(self.tracker.as_ref(), release);
        info!(release, count = issues.len(), "building link report");
        build_link_report(
            release,
            &issues,
            |key| self.tracker.browse_url(key),
            self.config.chunk_size,
        )
    }

    /// Unarchived releases that have issues, in tracker order.
    pub fn releases(&self) -> ReportOutcome {
        let versions = fetch_versions(self.tracker.as_ref());
        if versions.is_empty() {
            return ReportOutcome::Notice(FETCH_FAILED.to_string());
        }
        let active = versions.iter().filter(|v| !v.archived);
        let stats = self.stats_for(active.take(self.config.release_limit));
        render_release_list(&stats, self.config.chunk_size)
    }

    /// Overview of the most recent releases.
    pub fn summary(&self, timestamp: &str) -> ReportOutcome {
        let Some(stats) = self.recent_stats() else {
            return ReportOutcome::Notice(FETCH_FAILED.to_string());
        };
        match render_summary(&stats, timestamp) {
            Some(lines) => ReportOutcome::Chunks(into_chunks(
                &lines,
                self.config.chunk_size,
                DisplayMode::Markup,
            )),
            None => ReportOutcome::Notice("❌ No recent release has issues".to_string()),
        }
    }

    /// Review counts of the most recent releases.
    pub fn review_summary(&self) -> ReportOutcome {
        match self.recent_stats() {
            Some(stats) => render_review_summary(&stats, self.config.chunk_size),
            None => ReportOutcome::Notice(FETCH_FAILED.to_string()),
        }
    }

    fn recent_stats(&self) -> Option<Vec<ReleaseStats>> {
        let mut versions = fetch_versions(self.tracker.as_ref());
        if versions.is_empty() {
            return None;
        }
        versions.retain(|v| !v.archived);
        sort_newest_first(&mut versions);
        Some(self.stats_for(versions.iter().take(self.config.summary_limit)))
    }

    fn stats_for<'v>(&self, versions: impl Iterator<Item = &'v Version>) -> Vec<ReleaseStats> {
        versions
            .map(|v| {
                let issues = fetch_issues(self.tracker.as_ref(), &v.name);
                ReleaseStats::from_issues(&v.name, &issues)
            })
            .collect()
    }
}

/// Deliver a summary every `every`, starting immediately, until `shutdown`
/// flips or its sender is dropped. Ticks with nothing to report are skipped.
pub async fn run_watch(
    orchestrator: Arc<Orchestrator>,
    sink: &(dyn ReportSink + Sync),
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => {
                info!("watch stopped");
                return Ok(());
            }
        }

        let orch = Arc::clone(&orchestrator);
        let outcome = tokio::task::spawn_blocking(move || orch.summary(&timestamp_now()))
            .await
            .map_err(|e| Error::Delivery(format!("summary task failed: {e}")))?;

        match outcome {
            ReportOutcome::Chunks(chunks) => {
                if let Err(e) = deliver_all(sink, &chunks, orchestrator.pace()).await {
                    warn!(error = %e, "failed to deliver summary");
                }
            }
            other => {
                info!(
                    notice = %other.message().unwrap_or_default(),
                    "nothing to report this tick"
                );
            }
        }
    }
}
