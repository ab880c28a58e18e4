//! Backend-neutral predicate built from parsed filters.
//!
//! A [`Predicate`] is a conjunction of [`Clause`]s. It knows nothing about the
//! store; [`super::conditions`] translates it for Sea-ORM, and
//! [`Predicate::matches`] evaluates it against an in-memory [`Property`].

use std::cmp::Ordering;

use super::query_parser::{FilterField, FilterOperator, FilterSet, FilterValue};
use crate::models::Property;

/// Comparison applied by a single clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl From<FilterOperator> for Comparison {
    fn from(operator: FilterOperator) -> Self {
        match operator {
            FilterOperator::Eq => Self::Equal,
            FilterOperator::Not => Self::NotEqual,
            FilterOperator::Gt => Self::GreaterThan,
            FilterOperator::Lt => Self::LessThan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: FilterField,
    pub comparison: Comparison,
    pub value: FilterValue,
}

/// All clauses must hold. An empty predicate matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The predicate with no constraint.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(mut self, field: FilterField, comparison: Comparison, value: FilterValue) -> Self {
        self.clauses.push(Clause {
            field,
            comparison,
            value,
        });
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate against a stored record.
    ///
    /// Follows SQL semantics: a clause on a `NULL` column never holds, not
    /// even `NotEqual`.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        self.clauses.iter().all(|clause| clause.matches(property))
    }
}

impl Clause {
    fn matches(&self, property: &Property) -> bool {
        let ordering = match (&self.value, self.field) {
            (FilterValue::Text(expected), FilterField::Address) => {
                Some(property.address.as_str().cmp(expected.as_str()))
            }
            (FilterValue::Text(expected), FilterField::Type) => property
                .property_type
                .as_deref()
                .map(|actual| actual.cmp(expected.as_str())),
            (FilterValue::Integer(expected), FilterField::Price) => Some(property.price.cmp(expected)),
            (FilterValue::Integer(expected), FilterField::Bedrooms) => {
                Some(i64::from(property.bedrooms).cmp(expected))
            }
            (FilterValue::Integer(expected), FilterField::Bathrooms) => property
                .bathrooms
                .map(|actual| i64::from(actual).cmp(expected)),
            // a value of the wrong kind for the field cannot come out of the parser
            _ => None,
        };

        ordering.is_some_and(|ordering| match self.comparison {
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::NotEqual => ordering != Ordering::Equal,
            Comparison::GreaterThan => ordering == Ordering::Greater,
            Comparison::LessThan => ordering == Ordering::Less,
        })
    }
}

/// Map each parsed criterion to a clause. Fields without a criterion add no
/// constraint.
#[must_use]
pub fn build_predicate(filters: &FilterSet) -> Predicate {
    filters
        .iter()
        .fold(Predicate::all(), |predicate, (field, criterion)| {
            predicate.and(*field, criterion.operator.into(), criterion.value.clone())
        })
}
