use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};

/// A rule record as written in the config file. Exactly one of `service` or
/// the branch-based fields must be set; see [`Rule::from_raw`].
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    pub pattern: String,
    pub service: Option<String>,
    #[serde(default)]
    pub branch_based: bool,
    #[serde(default)]
    pub branch_map: BTreeMap<String, String>,
    pub default_service: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// Always yields the same label.
    Static { service: String },
    /// Label depends on the target branch of a linked merge request.
    BranchBased {
        branch_map: BTreeMap<String, String>,
        default_service: String,
    },
}

/// A validated detection rule. `pattern` is stored lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub pattern: String,
    pub kind: RuleKind,
}

impl Rule {
    pub fn static_service(pattern: &str, service: &str) -> Self {
        Self {
            pattern: pattern.to_lowercase(),
            kind: RuleKind::Static {
                service: service.to_string(),
            },
        }
    }

    pub fn branch_based(
        pattern: &str,
        branch_map: BTreeMap<String, String>,
        default_service: &str,
    ) -> Self {
        Self {
            pattern: pattern.to_lowercase(),
            kind: RuleKind::BranchBased {
                branch_map,
                default_service: default_service.to_string(),
            },
        }
    }

    pub fn from_raw(index: usize, raw: RawRule) -> Result<Self> {
        let invalid = |msg: &str| {
            Error::ConfigValidation(format!("rules[{index}] ({:?}): {msg}", raw.pattern))
        };

        if raw.pattern.trim().is_empty() {
            return Err(invalid("pattern must not be empty"));
        }

        let branch_fields =
            raw.branch_based || !raw.branch_map.is_empty() || raw.default_service.is_some();
        match (&raw.service, branch_fields) {
            (Some(_), true) => Err(invalid(
                "set either `service` or the branch-based fields, not both",
            )),
            (None, false) => Err(invalid(
                "missing `service` (or `branch_based = true` with `default_service`)",
            )),
            (Some(service), false) => Ok(Rule::static_service(&raw.pattern, service)),
            (None, true) => {
                if !raw.branch_based {
                    return Err(invalid("branch fields require `branch_based = true`"));
                }
                let default_service = raw
                    .default_service
                    .as_deref()
                    .ok_or_else(|| invalid("branch-based rule requires `default_service`"))?;
                Ok(Rule::branch_based(
                    &raw.pattern,
                    raw.branch_map.clone(),
                    default_service,
                ))
            }
        }
    }
}

/// Validate a whole table, keeping its order.
pub fn compile_rules(raw: Vec<RawRule>) -> Result<Vec<Rule>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| Rule::from_raw(i, r))
        .collect()
}

/// Rule table used when the config file does not define `[[rules]]`.
pub fn default_rules(target_branch: &str) -> Vec<Rule> {
    let mut rules = vec![Rule::branch_based(
        "gitlab.com/your-organization/backend",
        BTreeMap::from([(target_branch.to_string(), "Cote".to_string())]),
        "Django",
    )];
    rules.extend(
        [
            ("microbackend/integrations/fundist", "Fundist"),
            ("multyprojectadmin", "Multyprojectadmin"),
            ("microbackend/integrations/digitainslots", "DigitainSlots"),
            ("microbackend/integrations/evointegrationservice", "Kelt"),
            ("microbackend/integrations/outcomeintegrationservice", "Outcome"),
            ("microbackend/integrations/pragmatic", "Pragmatic"),
            ("microbackend/integrations/softswiss", "Softswiss"),
            ("microbackend/backendbetslibrary", "BettingLibrary"),
            ("microbackend/bettingservice/", "BettingService"),
            ("microbackend/paymentsystems/", "Paymentsystems"),
            ("backend/crypto-pay/", "CryptoPay"),
            ("cps", "Copi"),
            ("fortunewheelservice/", "FortuneWheelService"),
            ("softionsport/", "Softionsport"),
        ]
        .into_iter()
        .map(|(pattern, service)| Rule::static_service(pattern, service)),
    );
    rules
}
