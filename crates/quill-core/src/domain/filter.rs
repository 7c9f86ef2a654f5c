//! List filters expressed as a predicate list.
//!
//! Storage adapters translate each [`Predicate`] into a bound parameter;
//! user-supplied values never end up inside statement text.

use std::collections::HashMap;

/// Columns a list query may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostColumn {
    Category,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateValue {
    Text(String),
    Bool(bool),
}

/// One `column <op> $n` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: PostColumn,
    pub op: Operator,
    pub value: PredicateValue,
}

impl Predicate {
    pub fn eq(column: PostColumn, value: PredicateValue) -> Self {
        Self {
            column,
            op: Operator::Eq,
            value,
        }
    }
}

/// Category value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Filters for the list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub category: Option<String>,
    /// Restrict to published posts. `false` lifts the restriction entirely;
    /// it does not select unpublished posts.
    pub published_only: bool,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            category: None,
            published_only: true,
        }
    }
}

impl ListFilter {
    /// Build from query-string parameters (`category`, `published`).
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let category = params
            .get("category")
            .filter(|c| !c.is_empty() && c.as_str() != ALL_CATEGORIES)
            .cloned();

        let published_only = params
            .get("published")
            .map(|p| p.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Self {
            category,
            published_only,
        }
    }

    /// Conditions to AND together, in a stable order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(category) = &self.category {
            predicates.push(Predicate::eq(
                PostColumn::Category,
                PredicateValue::Text(category.clone()),
            ));
        }

        if self.published_only {
            predicates.push(Predicate::eq(
                PostColumn::Published,
                PredicateValue::Bool(true),
            ));
        }

        predicates
    }
}
