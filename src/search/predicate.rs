//! Structured search predicates
//!
//! Predicates are plain data: user input only ever lands in a value or a
//! pattern slot, never in anything that is parsed again.

use crate::catalog::User;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Separator stripped from ssn values before comparison
pub const SSN_SEPARATOR: char = '-';

/// Searchable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    FirstName,
    LastName,
    Email,
    Ssn,
    /// "firstName lastName"
    FullName,
    /// "lastName firstName"
    ReversedFullName,
}

impl Field {
    /// Textual value of this field on a user
    pub fn text<'a>(&self, user: &'a User) -> Cow<'a, str> {
        match self {
            Field::Id => Cow::Owned(user.id.to_string()),
            Field::FirstName => Cow::Borrowed(&user.first_name),
            Field::LastName => Cow::Borrowed(&user.last_name),
            Field::Email => Cow::Borrowed(&user.email),
            Field::Ssn => Cow::Borrowed(&user.ssn),
            Field::FullName => Cow::Owned(user.full_name()),
            Field::ReversedFullName => Cow::Owned(user.reversed_full_name()),
        }
    }
}

/// Literal operand of an equality predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

/// Transformation applied to both sides of a normalized comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalizer {
    StripSeparator(char),
}

impl Normalizer {
    pub fn ssn() -> Self {
        Normalizer::StripSeparator(SSN_SEPARATOR)
    }

    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match self {
            Normalizer::StripSeparator(sep) => {
                if input.contains(*sep) {
                    Cow::Owned(input.chars().filter(|c| c != sep).collect())
                } else {
                    Cow::Borrowed(input)
                }
            }
        }
    }
}

/// Composable predicate over a user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every record
    All,
    /// Exact match
    Equals(Field, Value),
    /// Exact match ignoring case
    EqualsCI(Field, String),
    /// Case-insensitive substring match
    ContainsCI(Field, String),
    /// Substring match after normalizing both sides
    ContainsNormalized(Field, String, Normalizer),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(field: Field, value: Value) -> Self {
        Predicate::Equals(field, value)
    }

    pub fn equals_ci(field: Field, value: impl Into<String>) -> Self {
        Predicate::EqualsCI(field, value.into())
    }

    pub fn contains_ci(field: Field, pattern: impl Into<String>) -> Self {
        Predicate::ContainsCI(field, pattern.into())
    }

    pub fn contains_normalized(
        field: Field,
        pattern: impl Into<String>,
        normalizer: Normalizer,
    ) -> Self {
        Predicate::ContainsNormalized(field, pattern.into(), normalizer)
    }

    /// Conjunction; a single operand is returned unwrapped
    pub fn and(mut predicates: Vec<Predicate>) -> Self {
        if predicates.len() == 1 {
            predicates.remove(0)
        } else {
            Predicate::And(predicates)
        }
    }

    /// Disjunction; a single operand is returned unwrapped
    pub fn or(mut predicates: Vec<Predicate>) -> Self {
        if predicates.len() == 1 {
            predicates.remove(0)
        } else {
            Predicate::Or(predicates)
        }
    }

    /// Evaluate against one record
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Equals(field, value) => match (field, value) {
                (Field::Id, Value::Int(id)) => user.id == *id,
                (_, Value::Int(n)) => field.text(user) == n.to_string(),
                (_, Value::Text(text)) => field.text(user) == text.as_str(),
            },
            Predicate::EqualsCI(field, value) => {
                field.text(user).to_lowercase() == value.to_lowercase()
            }
            Predicate::ContainsCI(field, pattern) => field
                .text(user)
                .to_lowercase()
                .contains(&pattern.to_lowercase()),
            Predicate::ContainsNormalized(field, pattern, normalizer) => {
                let text = field.text(user);
                normalizer
                    .apply(&text)
                    .contains(normalizer.apply(pattern).as_ref())
            }
            Predicate::And(predicates) => predicates.iter().all(|p| p.matches(user)),
            Predicate::Or(predicates) => predicates.iter().any(|p| p.matches(user)),
        }
    }
}
