use sea_orm::{ColumnTrait, Condition, sea_query::SimpleExpr};

use super::predicate::{Clause, Comparison, Predicate};
use super::query_parser::{FilterField, FilterValue};
use crate::entity::property::Column;

/// Column backing a filterable field.
#[must_use]
pub fn column_for(field: FilterField) -> Column {
    match field {
        FilterField::Address => Column::Address,
        FilterField::Price => Column::Price,
        FilterField::Bedrooms => Column::Bedrooms,
        FilterField::Bathrooms => Column::Bathrooms,
        FilterField::Type => Column::PropertyType,
    }
}

fn clause_expr(clause: &Clause) -> SimpleExpr {
    let column = column_for(clause.field);
    let value: sea_orm::Value = match &clause.value {
        FilterValue::Text(text) => text.clone().into(),
        FilterValue::Integer(number) => (*number).into(),
    };
    match clause.comparison {
        Comparison::Equal => column.eq(value),
        Comparison::NotEqual => column.ne(value),
        Comparison::GreaterThan => column.gt(value),
        Comparison::LessThan => column.lt(value),
    }
}

/// Translate a predicate into a Sea-ORM condition (`AND` of every clause).
#[must_use]
pub fn to_condition(predicate: &Predicate) -> Condition {
    predicate
        .clauses()
        .iter()
        .fold(Condition::all(), |condition, clause| {
            condition.add(clause_expr(clause))
        })
}
