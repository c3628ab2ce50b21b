mod config;

pub use config::RuleFile;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{PathShiftError, Result};

/// A literal old-prefix to new-prefix substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacementRule {
    /// Literal text to search for
    pub from: String,

    /// Literal text to put in its place (may be empty)
    pub to: String,
}

impl ReplacementRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse a command-line rule of the form `OLD=NEW`.
    ///
    /// Splits at the first `=`, so `NEW` may itself contain `=` or be empty.
    pub fn parse(spec: &str) -> Result<Self> {
        match spec.split_once('=') {
            Some((from, to)) if !from.is_empty() => Ok(Self::new(from, to)),
            _ => Err(PathShiftError::InvalidRuleSpec(spec.to_string())),
        }
    }
}

impl fmt::Display for ReplacementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A static problem with the ordering of a rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleIssue {
    /// `later` contains the pattern of `earlier`, which consumes its matches first
    Shadowed { earlier: usize, later: usize },

    /// The substitution of `rule` contains the pattern of `pattern_of` (same or earlier rule)
    Reintroduces { rule: usize, pattern_of: usize },
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleIssue::Shadowed { earlier, later } => write!(
                f,
                "rule #{} can never match: rule #{} rewrites its pattern first",
                later + 1,
                earlier + 1
            ),
            RuleIssue::Reintroduces { rule, pattern_of } => write!(
                f,
                "rule #{} reintroduces the pattern of rule #{}; a rerun may change files again",
                rule + 1,
                pattern_of + 1
            ),
        }
    }
}

/// Ordered list of replacement rules.
///
/// Rules run in sequence over the whole text, each one seeing the output of
/// the rules before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ReplacementRule>) -> Result<Self> {
        if let Some(index) = rules.iter().position(|r| r.from.is_empty()) {
            return Err(PathShiftError::EmptyPattern { index: index + 1 });
        }
        Ok(Self { rules })
    }

    /// Import moves for the feature-folder reorganization
    pub fn builtin() -> Self {
        let rules = [
            ("@/presentation/components/ui/", "@/components/"),
            ("@/presentation/components/", "@/components/"),
            ("@/application/ZyncContext", "@/context/ZyncContext"),
            ("@/application/CartContext", "@/features/wallet/context/CartContext"),
            ("@/infrastructure/spotify-service", "@/features/music/services/spotify-service"),
            ("@/presentation/components/TicketCard", "@/features/dashboard/components/TicketCard"),
            (
                "@/presentation/components/ui/PaymentCard",
                "@/features/wallet/components/PaymentCard",
            ),
            ("../../presentation/components/", "@/components/"),
            ("../presentation/components/", "@/components/"),
        ];

        Self {
            rules: rules
                .iter()
                .map(|(from, to)| ReplacementRule::new(*from, *to))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order, returning the new text and the number of
    /// occurrences replaced
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut output = text.to_string();
        let mut replacements = 0;

        for rule in &self.rules {
            let hits = output.matches(rule.from.as_str()).count();
            if hits > 0 {
                output = output.replace(rule.from.as_str(), &rule.to);
                replacements += hits;
            }
        }

        (output, replacements)
    }

    /// Find ordering problems without touching any file
    pub fn lint(&self) -> Vec<RuleIssue> {
        let mut issues = Vec::new();

        for (later, rule) in self.rules.iter().enumerate() {
            for (earlier, prior) in self.rules[..later].iter().enumerate() {
                if rule.from.contains(prior.from.as_str()) {
                    issues.push(RuleIssue::Shadowed { earlier, later });
                }
            }
        }

        for (index, rule) in self.rules.iter().enumerate() {
            for (pattern_of, prior) in self.rules[..=index].iter().enumerate() {
                if rule.to.contains(prior.from.as_str()) {
                    issues.push(RuleIssue::Reintroduces {
                        rule: index,
                        pattern_of,
                    });
                }
            }
        }

        issues
    }
}
