use regex::Regex;
use tracing::debug;

use crate::rules::{Rule, RuleKind};
use crate::sources::Issue;
use crate::sources::gitlab::BranchResolver;

/// Insertion-ordered set of service labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSet(Vec<String>);

impl ServiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `label` unless already present. Returns whether it was added.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Maps issues to service labels using an ordered rule table.
pub struct Classifier<'a> {
    rules: &'a [Rule],
    resolver: &'a dyn BranchResolver,
    target_branch: &'a str,
    url_re: Regex,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a [Rule], resolver: &'a dyn BranchResolver, target_branch: &'a str) -> Self {
        Self {
            rules,
            resolver,
            target_branch,
            url_re: Regex::new(r"https?://\S+").unwrap(),
        }
    }

    /// Labels for one issue, in first-match order across its comments.
    pub fn classify(&self, issue: &Issue) -> ServiceSet {
        let mut services = ServiceSet::new();
        for comment in &issue.comments {
            let raw = comment.body.extract();
            self.classify_text(&raw, &raw.to_lowercase(), &mut services);
        }
        debug!(key = %issue.key, services = ?services.as_slice(), "classified issue");
        services
    }

    /// `lower` is `raw` lower-cased. Patterns match against `lower`; links are
    /// taken from `raw` so the resolver sees them as written.
    fn classify_text(&self, raw: &str, lower: &str, services: &mut ServiceSet) {
        for rule in self.rules {
            if !lower.contains(&rule.pattern) {
                continue;
            }

            match &rule.kind {
                RuleKind::Static { service } => {
                    services.insert(service);
                }
                RuleKind::BranchBased {
                    branch_map,
                    default_service,
                } => {
                    for url in self.url_re.find_iter(raw).map(|m| m.as_str()) {
                        if !url.to_lowercase().contains(&rule.pattern) {
                            continue;
                        }
                        let service = if self.resolver.targets_branch(url, self.target_branch) {
                            branch_map.get(self.target_branch).unwrap_or(default_service)
                        } else {
                            default_service
                        };
                        services.insert(service);
                    }
                }
            }
        }
    }
}

/// Issues of one service, in the order they were classified.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceGroup<'i> {
    pub service: String,
    pub issues: Vec<&'i Issue>,
}

/// Result of classifying a batch of issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification<'i> {
    /// Labels per issue, in input order. Issues with no labels are kept.
    pub by_issue: Vec<(&'i Issue, ServiceSet)>,
    /// Issues per service, services in first-encountered order.
    pub by_service: Vec<ServiceGroup<'i>>,
}

impl<'i> Classification<'i> {
    pub fn build(classifier: &Classifier<'_>, issues: &'i [Issue]) -> Self {
        let mut classification = Classification::default();
        for issue in issues {
            let services = classifier.classify(issue);
            for service in services.iter() {
                match classification
                    .by_service
                    .iter_mut()
                    .find(|g| g.service == service)
                {
                    Some(group) => group.issues.push(issue),
                    None => classification.by_service.push(ServiceGroup {
                        service: service.to_string(),
                        issues: vec![issue],
                    }),
                }
            }
            classification.by_issue.push((issue, services));
        }
        classification
    }

    pub fn services_of(&self, key: &str) -> Option<&ServiceSet> {
        self.by_issue
            .iter()
            .find(|(issue, _)| issue.key == key)
            .map(|(_, services)| services)
    }
}
