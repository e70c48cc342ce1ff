//! Translation of query plans into predicates

use super::predicate::{Field, Normalizer, Predicate, Value};
use crate::query::{QueryPlan, SingleToken, Strategy};
use serde::{Deserialize, Serialize};

/// Ordered predicate stages.
///
/// The executor runs stages in order and returns the first one with at least
/// one match. The last stage is the answer even when it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlan {
    pub stages: Vec<Predicate>,
}

impl SearchPlan {
    fn single(predicate: Predicate) -> Self {
        Self {
            stages: vec![predicate],
        }
    }
}

/// Builds predicates from classified queries
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Build the stages for a query plan
    pub fn build(plan: &QueryPlan) -> SearchPlan {
        match &plan.strategy {
            Strategy::MatchAll => SearchPlan::single(Predicate::All),
            Strategy::Basic { pattern } => SearchPlan::single(Self::basic(pattern)),
            Strategy::Single(token) => Self::single_token(token),
            Strategy::Multi { names, ssns } => SearchPlan::single(Self::multi(names, ssns)),
        }
    }

    fn basic(pattern: &str) -> Predicate {
        Predicate::or(vec![
            Predicate::contains_ci(Field::FirstName, pattern),
            Predicate::contains_ci(Field::LastName, pattern),
            Self::ssn(pattern),
        ])
    }

    fn single_token(token: &SingleToken) -> SearchPlan {
        let mut stages = Vec::with_capacity(2);

        if let Some(id) = token.id {
            stages.push(Predicate::equals(Field::Id, Value::Int(id)));
        } else if token.email {
            stages.push(Predicate::equals_ci(Field::Email, token.token.as_str()));
        }

        let pattern = token.token.as_str();
        stages.push(Predicate::or(vec![
            Predicate::contains_ci(Field::FirstName, pattern),
            Predicate::contains_ci(Field::LastName, pattern),
            Predicate::contains_ci(Field::Email, pattern),
            Self::ssn(pattern),
        ]));

        SearchPlan { stages }
    }

    fn multi(names: &[String], ssns: &[String]) -> Predicate {
        match (names.is_empty(), ssns.is_empty()) {
            (false, false) => Predicate::and(vec![Self::every_name(names), Self::any_ssn(ssns)]),
            (false, true) => Predicate::or(vec![Self::every_name(names), Self::phrase(names)]),
            (true, false) => Self::any_ssn(ssns),
            (true, true) => Predicate::All,
        }
    }

    /// Each word hits firstName or lastName
    fn every_name(names: &[String]) -> Predicate {
        Predicate::and(
            names
                .iter()
                .map(|word| {
                    Predicate::or(vec![
                        Predicate::contains_ci(Field::FirstName, word.as_str()),
                        Predicate::contains_ci(Field::LastName, word.as_str()),
                    ])
                })
                .collect(),
        )
    }

    /// All words, in query order, inside either name ordering
    fn phrase(names: &[String]) -> Predicate {
        let phrase = names.join(" ");
        Predicate::or(vec![
            Predicate::contains_ci(Field::FullName, phrase.as_str()),
            Predicate::contains_ci(Field::ReversedFullName, phrase),
        ])
    }

    fn any_ssn(ssns: &[String]) -> Predicate {
        Predicate::or(ssns.iter().map(|s| Self::ssn(s)).collect())
    }

    fn ssn(pattern: &str) -> Predicate {
        Predicate::contains_normalized(Field::Ssn, pattern, Normalizer::ssn())
    }
}
