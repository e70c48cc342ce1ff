//! Query classification
//!
//! Turns a raw search string into a [`QueryPlan`]:
//! - empty or blank input lists everything
//! - input shorter than [`FULL_QUERY_MIN_LEN`] characters is a basic
//!   name/ssn substring search
//! - anything longer is tokenized on whitespace; a single token may hit the
//!   identifier or email shortcut, several tokens are split into name words
//!   and ssn fragments

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trimmed length at which the full strategy takes over
pub const FULL_QUERY_MIN_LEN: usize = 3;

static ALL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// Classified search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Original raw query
    pub raw: String,
    /// Resolution strategy
    pub strategy: Strategy,
}

/// How a query is resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// List every record
    MatchAll,
    /// Short input: one pattern against names and ssn
    Basic { pattern: String },
    /// Exactly one token
    Single(SingleToken),
    /// Two or more tokens, split by shape
    Multi {
        /// Tokens without digits, in query order
        names: Vec<String>,
        /// Tokens carrying at least one digit, in query order
        ssns: Vec<String>,
    },
}

/// A lone search token with its shortcut candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleToken {
    pub token: String,
    /// Set when the token is all digits and fits an identifier
    pub id: Option<i64>,
    /// Set when the token contains `@`
    pub email: bool,
}

impl SingleToken {
    fn classify(token: &str) -> Self {
        let id = if ALL_DIGITS.is_match(token) {
            token.parse().ok()
        } else {
            None
        };

        Self {
            token: token.to_string(),
            id,
            email: id.is_none() && token.contains('@'),
        }
    }
}

impl QueryPlan {
    /// Classify a raw query string
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        let strategy = if trimmed.is_empty() {
            Strategy::MatchAll
        } else if trimmed.chars().count() < FULL_QUERY_MIN_LEN {
            Strategy::Basic {
                pattern: trimmed.to_string(),
            }
        } else {
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            if tokens.len() == 1 {
                Strategy::Single(SingleToken::classify(tokens[0]))
            } else {
                let (ssns, names): (Vec<&str>, Vec<&str>) =
                    tokens.into_iter().partition(|t| is_numeric_bearing(t));
                Strategy::Multi {
                    names: names.into_iter().map(String::from).collect(),
                    ssns: ssns.into_iter().map(String::from).collect(),
                }
            }
        };

        Self {
            raw: raw.to_string(),
            strategy,
        }
    }

    /// Whether this plan lists every record
    pub fn is_match_all(&self) -> bool {
        matches!(self.strategy, Strategy::MatchAll)
    }
}

/// A token with at least one digit is treated as an ssn fragment
pub fn is_numeric_bearing(token: &str) -> bool {
    HAS_DIGIT.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert!(QueryPlan::parse("").is_match_all());
        assert!(QueryPlan::parse("   \t ").is_match_all());
    }

    #[test]
    fn test_short_query_is_basic() {
        let plan = QueryPlan::parse("  12 ");
        assert_eq!(
            plan.strategy,
            Strategy::Basic {
                pattern: "12".to_string()
            }
        );

        let plan = QueryPlan::parse("a@");
        assert!(matches!(plan.strategy, Strategy::Basic { .. }));
    }

    #[test]
    fn test_length_uses_trimmed_input() {
        let plan = QueryPlan::parse("  ab  ");
        assert!(matches!(plan.strategy, Strategy::Basic { .. }));

        let plan = QueryPlan::parse("abc");
        assert!(matches!(plan.strategy, Strategy::Single(_)));
    }

    #[test]
    fn test_numeric_token() {
        let plan = QueryPlan::parse("123");
        match plan.strategy {
            Strategy::Single(token) => {
                assert_eq!(token.id, Some(123));
                assert!(!token.email);
            }
            other => panic!("unexpected strategy {:?}", other),
        }
    }

    #[test]
    fn test_oversized_numeric_token_has_no_id() {
        let plan = QueryPlan::parse("99999999999999999999999");
        match plan.strategy {
            Strategy::Single(token) => assert_eq!(token.id, None),
            other => panic!("unexpected strategy {:?}", other),
        }
    }

    #[test]
    fn test_email_token() {
        let plan = QueryPlan::parse("john@example.com");
        match plan.strategy {
            Strategy::Single(token) => {
                assert!(token.email);
                assert_eq!(token.id, None);
            }
            other => panic!("unexpected strategy {:?}", other),
        }
    }

    #[test]
    fn test_multi_token_split() {
        let plan = QueryPlan::parse("John 123-45 Doe a1");
        assert_eq!(
            plan.strategy,
            Strategy::Multi {
                names: vec!["John".to_string(), "Doe".to_string()],
                ssns: vec!["123-45".to_string(), "a1".to_string()],
            }
        );
    }

    #[test]
    fn test_internal_whitespace_collapses() {
        let plan = QueryPlan::parse(" John \t  Doe ");
        assert_eq!(
            plan.strategy,
            Strategy::Multi {
                names: vec!["John".to_string(), "Doe".to_string()],
                ssns: vec![],
            }
        );
    }
}
