use crate::classify::{Classification, Classifier};
use crate::sources::{DEPLOY_STATUS, Issue};

/// Issues whose numeric rework count is strictly above this are flagged.
pub const REWORK_THRESHOLD: f64 = 3.0;

pub const DEFAULT_CHUNK_SIZE: usize = 4000;

const REVIEW_ICON: &str = "👁‍🗨";
const PLAIN_ICON: &str = "📋";
const WARNING_ICON: &str = "⚠️";
const SEPARATOR_WIDTH: usize = 40;

/// How a chunk should be displayed by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Preformatted block.
    Monospace,
    /// HTML markup with links.
    Markup,
}

/// A run of whole lines that fits the chunk budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub mode: DisplayMode,
    pub lines: Vec<String>,
}

impl Chunk {
    /// Serialized form: every line followed by `\n`.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.len());
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Serialized length in characters.
    pub fn len(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count() + 1).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// What a report request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The release has no issues at all.
    NoIssues(String),
    /// The release has issues, but none in review status.
    NoReviewIssues(String),
    /// Any other single informational message.
    Notice(String),
    Chunks(Vec<Chunk>),
}

impl ReportOutcome {
    /// Text for the informational outcomes; `None` for chunked output.
    pub fn message(&self) -> Option<String> {
        match self {
            ReportOutcome::NoIssues(release) => Some(format!("❌ Release '{release}' has no issues")),
            ReportOutcome::NoReviewIssues(release) => Some(format!(
                "📭 Release '{release}' has no issues in review status"
            )),
            ReportOutcome::Notice(text) => Some(text.clone()),
            ReportOutcome::Chunks(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub review_only: bool,
    pub chunk_size: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            review_only: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Split lines into chunks whose serialized length (line + `\n` each) stays
/// within `max_chars`. A line is never split; a single line longer than the
/// budget gets a chunk of its own.
pub fn paginate(lines: &[String], max_chars: usize) -> Vec<Vec<String>> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0;

    for line in lines {
        let line_len = line.chars().count() + 1;
        if !current.is_empty() && current_len + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(line.clone());
        current_len += line_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

pub fn into_chunks(lines: &[String], max_chars: usize, mode: DisplayMode) -> Vec<Chunk> {
    paginate(lines, max_chars)
        .into_iter()
        .map(|lines| Chunk { mode, lines })
        .collect()
}

fn review_issues(issues: &[Issue]) -> Vec<Issue> {
    issues.iter().filter(|i| i.is_in_review()).cloned().collect()
}

/// Filter, classify and render the service report for one release.
pub fn build_report(
    release: &str,
    issues: &[Issue],
    classifier: &Classifier<'_>,
    options: ReportOptions,
) -> ReportOutcome {
    if issues.is_empty() {
        return ReportOutcome::NoIssues(release.to_string());
    }

    let selected = if options.review_only {
        let filtered = review_issues(issues);
        if filtered.is_empty() {
            return ReportOutcome::NoReviewIssues(release.to_string());
        }
        filtered
    } else {
        issues.to_vec()
    };

    let classification = Classification::build(classifier, &selected);
    let lines = render_report(release, &selected, &classification, options.review_only);
    ReportOutcome::Chunks(into_chunks(
        &lines,
        options.chunk_size,
        DisplayMode::Monospace,
    ))
}

/// Render the full report as lines. `issues` is the already-filtered set
/// that `classification` was built from.
pub fn render_report(
    release: &str,
    issues: &[Issue],
    classification: &Classification<'_>,
    review_only: bool,
) -> Vec<String> {
    let title_suffix = if review_only {
        " (review issues only)"
    } else {
        ""
    };
    let mut lines = vec![
        format!("📊 Release: {release}{title_suffix}"),
        format!("Issues found: {}", issues.len()),
        String::new(),
    ];

    for group in &classification.by_service {
        lines.push(group.service.clone());
        for issue in &group.issues {
            let icon = if issue.is_in_review() {
                REVIEW_ICON
            } else {
                PLAIN_ICON
            };
            lines.push(format!(
                "{icon} {} - {} - QA attempts: {}",
                issue.key,
                issue.summary,
                rework_label(issue)
            ));
        }
        lines.push(String::new());
    }

    if review_only {
        return lines;
    }

    lines.push("HIGH REWORK COUNT".to_string());
    for issue in issues {
        if let Some(count) = issue.rework_above(REWORK_THRESHOLD) {
            lines.push(format!(
                "{WARNING_ICON} {} - {} - QA attempts: {count}",
                issue.key, issue.summary
            ));
        }
    }
    lines.push(String::new());
    lines.push("─".repeat(SEPARATOR_WIDTH));
    lines.push(String::new());

    let deploy_lines: Vec<String> = classification
        .by_issue
        .iter()
        .filter(|(issue, _)| issue.status == DEPLOY_STATUS)
        .filter_map(|(issue, services)| {
            services
                .last()
                .map(|service| format!("{} move to deploy for service {service}", issue.key))
        })
        .collect();
    if !deploy_lines.is_empty() {
        lines.extend(deploy_lines);
        lines.push(String::new());
    }

    lines
}

fn rework_label(issue: &Issue) -> String {
    issue
        .rework_count
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "None".to_string())
}

/// Escape text for HTML markup output.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render HTML links to the release's issues in review status.
pub fn build_link_report(
    release: &str,
    issues: &[Issue],
    browse_url: impl Fn(&str) -> String,
    chunk_size: usize,
) -> ReportOutcome {
    if issues.is_empty() {
        return ReportOutcome::NoIssues(release.to_string());
    }
    let review = review_issues(issues);
    if review.is_empty() {
        return ReportOutcome::NoReviewIssues(release.to_string());
    }

    let mut lines = vec![
        format!(
            "🔗 <b>Links to issues in review (release: {})</b>",
            escape_html(release)
        ),
        String::new(),
    ];
    for issue in &review {
        let summary = if issue.summary.is_empty() {
            "Untitled"
        } else {
            issue.summary.as_str()
        };
        lines.push(format!(
            "• <a href='{}'>{}</a> - {}",
            escape_html(&browse_url(&issue.key)),
            escape_html(&issue.key),
            escape_html(summary)
        ));
    }
    lines.push(String::new());
    lines.push(format!("📊 Total in review: {}", review.len()));

    ReportOutcome::Chunks(into_chunks(&lines, chunk_size, DisplayMode::Markup))
}

/// Per-release counters shown in the release list and summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseStats {
    pub name: String,
    pub total: usize,
    pub in_review: usize,
    pub high_rework: usize,
}

impl ReleaseStats {
    pub fn from_issues(name: &str, issues: &[Issue]) -> Self {
        Self {
            name: name.to_string(),
            total: issues.len(),
            in_review: issues.iter().filter(|i| i.is_in_review()).count(),
            high_rework: issues
                .iter()
                .filter(|i| i.rework_above(REWORK_THRESHOLD).is_some())
                .count(),
        }
    }
}

/// One line per release: `<name> (<n> issues[, <r> in review])`.
pub fn render_release_list(stats: &[ReleaseStats], chunk_size: usize) -> ReportOutcome {
    let with_issues: Vec<&ReleaseStats> = stats.iter().filter(|s| s.total > 0).collect();
    if with_issues.is_empty() {
        return ReportOutcome::Notice("❌ No release has issues yet".to_string());
    }

    let mut lines = vec!["📋 Releases:".to_string()];
    for s in with_issues {
        let mut line = format!("{} ({} issues", s.name, s.total);
        if s.in_review > 0 {
            line.push_str(&format!(", {} in review", s.in_review));
        }
        line.push(')');
        lines.push(line);
    }
    ReportOutcome::Chunks(into_chunks(&lines, chunk_size, DisplayMode::Monospace))
}

/// Overview of recent releases. `None` when no release has issues.
pub fn render_summary(stats: &[ReleaseStats], timestamp: &str) -> Option<Vec<String>> {
    let shown: Vec<&ReleaseStats> = stats.iter().filter(|s| s.total > 0).collect();
    if shown.is_empty() {
        return None;
    }

    let mut lines = vec!["<b>📊 RELEASE SUMMARY</b>".to_string(), String::new()];
    for s in &shown {
        lines.push(format!("<b>{}</b>", escape_html(&s.name)));
        let mut line = format!("{PLAIN_ICON} {} issues", s.total);
        if s.in_review > 0 {
            line.push_str(&format!(" | {REVIEW_ICON} {} in review", s.in_review));
        }
        if s.high_rework > 0 {
            line.push_str(&format!(" | {WARNING_ICON} {} with rework", s.high_rework));
        }
        lines.push(line);
        lines.push(String::new());
    }

    let total: usize = shown.iter().map(|s| s.total).sum();
    let in_review: usize = shown.iter().map(|s| s.in_review).sum();
    let mut footer = format!("<b>📈 TOTAL:</b> {} releases, {total} issues", shown.len());
    if in_review > 0 {
        footer.push_str(&format!(", {in_review} in review"));
    }
    lines.push(footer);
    lines.push(format!("<b>⏰ Time:</b> {timestamp}"));
    Some(lines)
}

/// Review counts of recent releases.
pub fn render_review_summary(stats: &[ReleaseStats], chunk_size: usize) -> ReportOutcome {
    let reviewed: Vec<&ReleaseStats> = stats.iter().filter(|s| s.in_review > 0).collect();
    if reviewed.is_empty() {
        return ReportOutcome::Notice("📭 No issues in review status".to_string());
    }

    let mut lines = vec!["<b>👁‍🗨 ISSUES IN REVIEW</b>".to_string(), String::new()];
    for s in &reviewed {
        lines.push(format!("<b>{}</b> - {} issues", escape_html(&s.name), s.in_review));
    }
    let total: usize = reviewed.iter().map(|s| s.in_review).sum();
    lines.push(String::new());
    lines.push(format!("<b>📊 Total in review:</b> {total}"));
    ReportOutcome::Chunks(into_chunks(&lines, chunk_size, DisplayMode::Markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use crate::test_helpers::{StaticResolver, make_issue, with_rework};
    use serde_json::json;

    fn rules() -> Vec<Rule> {
        vec![
            Rule::static_service("fundist", "Fundist"),
            Rule::static_service("softswiss", "Softswiss"),
        ]
    }

    fn full_options() -> ReportOptions {
        ReportOptions::default()
    }

    fn lines_of(outcome: &ReportOutcome) -> Vec<String> {
        match outcome {
            ReportOutcome::Chunks(chunks) => chunks.iter().flat_map(|c| c.lines.clone()).collect(),
            other => panic!("expected chunks, got {other:?}"),
        }
    }

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    // --- pagination ---

    #[test]
    fn test_paginate_single_chunk_when_fits() {
        let lines = strings(&["a", "bb", "", "ccc"]);
        assert_eq!(paginate(&lines, 100), vec![lines.clone()]);
    }

    #[test]
    fn test_paginate_exact_budget_stays_in_chunk() {
        // "aaaa\n" + "bbbb\n" = 10
        let lines = strings(&["aaaa", "bbbb", "c"]);
        let chunks = paginate(&lines, 10);
        assert_eq!(chunks, vec![strings(&["aaaa", "bbbb"]), strings(&["c"])]);
    }

    #[test]
    fn test_paginate_round_trip_and_budget() {
        let lines: Vec<String> = (0..500)
            .map(|i| {
                if i % 7 == 0 {
                    String::new()
                } else {
                    format!("line {i} {}", "x".repeat(i % 53))
                }
            })
            .collect();
        let chunks = into_chunks(&lines, 400, DisplayMode::Monospace);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 400, "chunk of {} chars", chunk.len());
            assert_eq!(chunk.text().chars().count(), chunk.len());
        }
        let flattened: Vec<String> = chunks.iter().flat_map(|c| c.lines.clone()).collect();
        assert_eq!(flattened, lines);
        let joined: String = chunks.iter().map(Chunk::text).collect();
        assert_eq!(joined, format!("{}\n", lines.join("\n")));
    }

    #[test]
    fn test_paginate_counts_characters_not_bytes() {
        let lines = strings(&["ЖЖЖЖ", "ЖЖЖЖ"]);
        assert_eq!(paginate(&lines, 10).len(), 1);
    }

    #[test]
    fn test_paginate_keeps_trailing_empty_lines() {
        let lines = strings(&["a", "", ""]);
        let chunks = paginate(&lines, 3);
        let flattened: Vec<String> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, lines);
    }

    #[test]
    fn test_paginate_oversized_line_gets_own_chunk() {
        let long = "x".repeat(20);
        let lines = vec!["a".to_string(), long.clone(), "b".to_string()];
        let chunks = paginate(&lines, 10);
        assert_eq!(
            chunks,
            vec![vec!["a".to_string()], vec![long], vec!["b".to_string()]]
        );
    }

    #[test]
    fn test_paginate_empty_input() {
        assert!(paginate(&[], 10).is_empty());
    }

    // --- full report ---

    #[test]
    fn test_empty_issues_short_circuits() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let outcome = build_report("1.0", &[], &classifier, full_options());
        assert_eq!(outcome, ReportOutcome::NoIssues("1.0".to_string()));
        assert_eq!(
            outcome.message().as_deref(),
            Some("❌ Release '1.0' has no issues")
        );
    }

    #[test]
    fn test_review_only_without_review_issues() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let issues = vec![make_issue("BACK-1", "In Progress", &["fundist"])];
        let outcome = build_report(
            "1.0",
            &issues,
            &classifier,
            ReportOptions {
                review_only: true,
                ..full_options()
            },
        );
        assert_eq!(outcome, ReportOutcome::NoReviewIssues("1.0".to_string()));
    }

    #[test]
    fn test_full_report_layout() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let issues = vec![
            with_rework(make_issue("BACK-1", "Code Review", &["softswiss"]), json!(4)),
            with_rework(make_issue("BACK-2", "Deploy", &["fundist"]), json!("3")),
            with_rework(make_issue("BACK-3", "Open", &["nothing"]), json!("abc")),
            make_issue("BACK-4", "Deploy", &["unmapped"]),
        ];

        let outcome = build_report("1.10.2", &issues, &classifier, full_options());
        assert_eq!(
            lines_of(&outcome),
            strings(&[
                "📊 Release: 1.10.2",
                "Issues found: 4",
                "",
                "Softswiss",
                "👁‍🗨 BACK-1 - BACK-1 summary - QA attempts: 4",
                "",
                "Fundist",
                "📋 BACK-2 - BACK-2 summary - QA attempts: 3",
                "",
                "HIGH REWORK COUNT",
                "⚠️ BACK-1 - BACK-1 summary - QA attempts: 4",
                "",
                "────────────────────────────────────────",
                "",
                "BACK-2 move to deploy for service Fundist",
                "",
            ])
        );
    }

    #[test]
    fn test_review_only_report_skips_warning_and_deploy_blocks() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let issues = vec![
            with_rework(make_issue("BACK-1", "На ревью", &["fundist"]), json!(9)),
            make_issue("BACK-2", "Deploy", &["fundist"]),
        ];
        let outcome = build_report(
            "1.0",
            &issues,
            &classifier,
            ReportOptions {
                review_only: true,
                ..full_options()
            },
        );
        assert_eq!(
            lines_of(&outcome),
            strings(&[
                "📊 Release: 1.0 (review issues only)",
                "Issues found: 1",
                "",
                "Fundist",
                "👁‍🗨 BACK-1 - BACK-1 summary - QA attempts: 9",
                "",
            ])
        );
    }

    #[test]
    fn test_issue_listed_under_every_service() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let issues = vec![make_issue("BACK-1", "Deploy", &["fundist + softswiss"])];
        let lines = lines_of(&build_report("1.0", &issues, &classifier, full_options()));
        let occurrences = lines.iter().filter(|l| l.contains("BACK-1 - ")).count();
        assert_eq!(occurrences, 2);
        assert!(lines.contains(&"BACK-1 move to deploy for service Softswiss".to_string()));
    }

    #[test]
    fn test_no_deploy_block_without_deploy_issues() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let issues = vec![make_issue("BACK-1", "deploy", &["fundist"])];
        let lines = lines_of(&build_report("1.0", &issues, &classifier, full_options()));
        assert_eq!(lines.last().map(String::as_str), Some(""));
        assert!(!lines.iter().any(|l| l.contains("move to deploy")));
        assert_eq!(lines[lines.len() - 2], "─".repeat(40));
    }

    #[test]
    fn test_report_is_chunked() {
        let rules = rules();
        let resolver = StaticResolver::new(false);
        let classifier = Classifier::new(&rules, &resolver, "main");
        let issues: Vec<Issue> = (0..200)
            .map(|i| make_issue(&format!("BACK-{i}"), "Open", &["fundist"]))
            .collect();
        let outcome = build_report(
            "1.0",
            &issues,
            &classifier,
            ReportOptions {
                chunk_size: 500,
                ..full_options()
            },
        );
        match outcome {
            ReportOutcome::Chunks(chunks) => {
                assert!(chunks.len() > 1);
                assert!(chunks.iter().all(|c| c.len() <= 500));
                assert!(chunks.iter().all(|c| c.mode == DisplayMode::Monospace));
            }
            other => panic!("expected chunks, got {other:?}"),
        }
    }

    // --- link report ---

    fn browse(key: &str) -> String {
        format!("https://jira.example.com/browse/{key}")
    }

    #[test]
    fn test_link_report() {
        let mut untitled = make_issue("BACK-3", "Review", &[]);
        untitled.summary = String::new();
        let mut tagged = make_issue("BACK-1", "Code Review", &[]);
        tagged.summary = "Fix <b> & co".to_string();
        let issues = vec![tagged, make_issue("BACK-2", "Open", &[]), untitled];

        let outcome = build_link_report("1.0", &issues, browse, DEFAULT_CHUNK_SIZE);
        let chunks = match &outcome {
            ReportOutcome::Chunks(chunks) => chunks,
            other => panic!("expected chunks, got {other:?}"),
        };
        assert!(chunks.iter().all(|c| c.mode == DisplayMode::Markup));
        assert_eq!(
            lines_of(&outcome),
            strings(&[
                "🔗 <b>Links to issues in review (release: 1.0)</b>",
                "",
                "• <a href='https://jira.example.com/browse/BACK-1'>BACK-1</a> - Fix &lt;b&gt; &amp; co",
                "• <a href='https://jira.example.com/browse/BACK-3'>BACK-3</a> - Untitled",
                "",
                "📊 Total in review: 2",
            ])
        );
    }

    #[test]
    fn test_link_report_short_circuits() {
        assert_eq!(
            build_link_report("1.0", &[], browse, DEFAULT_CHUNK_SIZE),
            ReportOutcome::NoIssues("1.0".to_string())
        );
        let issues = vec![make_issue("BACK-1", "Open", &[])];
        let outcome = build_link_report("1.0", &issues, browse, DEFAULT_CHUNK_SIZE);
        assert_eq!(outcome, ReportOutcome::NoReviewIssues("1.0".to_string()));
        assert_eq!(
            outcome.message().as_deref(),
            Some("📭 Release '1.0' has no issues in review status")
        );
    }

    // --- summaries ---

    fn stats(name: &str, total: usize, in_review: usize, high_rework: usize) -> ReleaseStats {
        ReleaseStats {
            name: name.to_string(),
            total,
            in_review,
            high_rework,
        }
    }

    #[test]
    fn test_release_stats_from_issues() {
        let issues = vec![
            with_rework(make_issue("BACK-1", "Code Review", &[]), json!(5)),
            with_rework(make_issue("BACK-2", "ревью", &[]), json!("2")),
            with_rework(make_issue("BACK-3", "Open", &[]), json!("x")),
        ];
        assert_eq!(
            ReleaseStats::from_issues("1.0", &issues),
            stats("1.0", 3, 2, 1)
        );
    }

    #[test]
    fn test_release_list() {
        let outcome = render_release_list(
            &[
                stats("1.2", 4, 1, 0),
                stats("1.1", 0, 0, 0),
                stats("1.0", 2, 0, 0),
            ],
            DEFAULT_CHUNK_SIZE,
        );
        assert_eq!(
            lines_of(&outcome),
            strings(&["📋 Releases:", "1.2 (4 issues, 1 in review)", "1.0 (2 issues)"])
        );
    }

    #[test]
    fn test_release_list_empty() {
        let outcome = render_release_list(&[stats("1.1", 0, 0, 0)], DEFAULT_CHUNK_SIZE);
        assert_eq!(
            outcome,
            ReportOutcome::Notice("❌ No release has issues yet".to_string())
        );
    }

    #[test]
    fn test_summary() {
        let lines = render_summary(
            &[stats("1.2", 4, 1, 2), stats("1.1", 0, 0, 0), stats("1.0", 2, 0, 0)],
            "09:30 19.10.2026",
        )
        .unwrap();
        assert_eq!(
            lines,
            strings(&[
                "<b>📊 RELEASE SUMMARY</b>",
                "",
                "<b>1.2</b>",
                "📋 4 issues | 👁‍🗨 1 in review | ⚠️ 2 with rework",
                "",
                "<b>1.0</b>",
                "📋 2 issues",
                "",
                "<b>📈 TOTAL:</b> 2 releases, 6 issues, 1 in review",
                "<b>⏰ Time:</b> 09:30 19.10.2026",
            ])
        );
    }

    #[test]
    fn test_summary_without_issues() {
        assert!(render_summary(&[stats("1.0", 0, 0, 0)], "now").is_none());
        assert!(render_summary(&[], "now").is_none());
    }

    #[test]
    fn test_review_summary() {
        let outcome = render_review_summary(
            &[stats("1.2", 4, 3, 0), stats("1.1", 5, 0, 0)],
            DEFAULT_CHUNK_SIZE,
        );
        assert_eq!(
            lines_of(&outcome),
            strings(&[
                "<b>👁‍🗨 ISSUES IN REVIEW</b>",
                "",
                "<b>1.2</b> - 3 issues",
                "",
                "<b>📊 Total in review:</b> 3",
            ])
        );
    }

    #[test]
    fn test_review_summary_empty() {
        assert_eq!(
            render_review_summary(&[stats("1.1", 5, 0, 0)], DEFAULT_CHUNK_SIZE),
            ReportOutcome::Notice("📭 No issues in review status".to_string())
        );
    }

    #[test]
    fn test_release_list_respects_chunk_size() {
        let many: Vec<ReleaseStats> = (0..20)
            .map(|i| stats(&format!("1.{i}"), 3, 1, 0))
            .collect();
        let ReportOutcome::Chunks(chunks) = render_release_list(&many, 40) else {
            panic!("expected chunks");
        };
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 40), "{chunks:?}");
        assert_eq!(chunks.iter().map(|c| c.lines.len()).sum::<usize>(), 21);
    }

    #[test]
    fn test_review_summary_respects_chunk_size() {
        let many: Vec<ReleaseStats> = (0..20)
            .map(|i| stats(&format!("1.{i}"), 3, 2, 0))
            .collect();
        let ReportOutcome::Chunks(chunks) = render_review_summary(&many, 40) else {
            panic!("expected chunks");
        };
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 40), "{chunks:?}");
    }
}
