// rules.rs - Survival and reproduction rules parsed from comma separated text

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;
use tracing::warn;

/// A token that could not be read as a non-negative integer.
///
/// Rejected tokens stay in the list as diagnostics and never match a
/// neighbour count.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("rule token {index} ({token:?}) is not a non-negative integer")]
pub struct RuleTokenError {
    pub index: usize,
    pub token: String,
}

/// One parsed rule field, e.g. `"2, 3,4"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleList {
    tokens: Vec<Result<u32, RuleTokenError>>,
}

impl RuleList {
    pub fn parse(text: &str) -> Self {
        let tokens = text
            .split(',')
            .enumerate()
            .map(|(index, raw)| {
                let token = raw.trim();
                token.parse::<u32>().map_err(|_| RuleTokenError {
                    index,
                    token: token.to_string(),
                })
            })
            .collect();
        Self { tokens }
    }

    pub fn from_values(values: &[u32]) -> Self {
        Self { tokens: values.iter().copied().map(Ok).collect() }
    }

    /// The valid values as a set.
    pub fn values(&self) -> BTreeSet<u32> {
        self.tokens.iter().filter_map(|t| t.as_ref().ok().copied()).collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &RuleTokenError> {
        self.tokens.iter().filter_map(|t| t.as_ref().err())
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// The first token as a scalar threshold; `None` when it failed to parse.
    pub fn threshold(&self) -> Option<u32> {
        self.tokens.first().and_then(|t| t.as_ref().ok().copied())
    }

    pub fn contains(&self, neighbors: u32) -> bool {
        self.tokens.iter().any(|t| matches!(t, Ok(value) if *value == neighbors))
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .tokens
            .iter()
            .map(|t| match t {
                Ok(value) => value.to_string(),
                Err(err)  => err.token.clone(),
            })
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

/// The three rule predicates applied by the transition engine.
///
/// `survival_lower` and `survival_upper` are scalar thresholds taken from
/// the first token of their field; a field whose first token is malformed
/// never triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub survival_lower: RuleList,
    pub survival_upper: RuleList,
    pub reproduction: RuleList,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            survival_lower: RuleList::from_values(&[2]),
            survival_upper: RuleList::from_values(&[3]),
            reproduction: RuleList::from_values(&[3]),
        }
    }
}

impl RuleSet {
    pub fn parse(survival_lower: &str, survival_upper: &str, reproduction: &str) -> Self {
        let rules = Self {
            survival_lower: RuleList::parse(survival_lower),
            survival_upper: RuleList::parse(survival_upper),
            reproduction: RuleList::parse(reproduction),
        };
        for (field, list) in rules.fields() {
            for err in list.errors() {
                warn!(field, %err, "ignoring malformed rule token");
            }
        }
        rules
    }

    fn fields(&self) -> [(&'static str, &RuleList); 3] {
        [
            ("survival-lower", &self.survival_lower),
            ("survival-upper", &self.survival_upper),
            ("reproduction", &self.reproduction),
        ]
    }

    /// Living cell dies of loneliness.
    pub fn is_survival_lower_breach(&self, neighbors: u32) -> bool {
        self.survival_lower.threshold().is_some_and(|min| neighbors < min)
    }

    /// Living cell dies of overpopulation.
    pub fn is_survival_upper_breach(&self, neighbors: u32) -> bool {
        self.survival_upper.threshold().is_some_and(|max| neighbors > max)
    }

    pub fn is_reproduction_match(&self, neighbors: u32) -> bool {
        self.reproduction.contains(neighbors)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &RuleTokenError> {
        self.survival_lower
            .errors()
            .chain(self.survival_upper.errors())
            .chain(self.reproduction.errors())
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "die below {}, die above {}, born on {}",
            self.survival_lower, self.survival_upper, self.reproduction
        )
    }
}
