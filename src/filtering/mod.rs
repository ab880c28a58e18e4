//! # Filtering & Pagination
//!
//! Query-string to store-query translation for `GET /properties`.
//!
//! ```text
//! GET /properties?price=gt:500000&type=not:Condo&bedrooms=3&page=2&limit=20
//! ```
//!
//! 1. [`parse_query`] validates the raw query map, splits off `page`/`limit`
//!    and produces one `(operator, value)` criterion per filtered field.
//! 2. [`build_predicate`] maps the criteria onto a backend-neutral
//!    [`Predicate`].
//! 3. [`to_condition`] renders that predicate as a Sea-ORM `Condition`.
//! 4. [`Pagination::window`] turns `page`/`limit` into `limit`/`offset`.
//!
//! | Field       | Operators         | Value                  |
//! |-------------|-------------------|------------------------|
//! | `address`   | `eq`              | text, trimmed          |
//! | `type`      | `eq`, `not`       | text                   |
//! | `price`     | `eq`, `gt`, `lt`  | non-negative integer   |
//! | `bedrooms`  | `eq`, `gt`, `lt`  | non-negative integer   |
//! | `bathrooms` | `eq`, `gt`, `lt`  | non-negative integer   |
//!
//! A value without an operator prefix means `eq`.

pub mod conditions;
pub mod pagination;
pub mod predicate;
pub mod query_parser;

pub use conditions::{column_for, to_condition};
pub use pagination::{
    DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MAX_OFFSET, MAX_PAGE, PageWindow, Pagination,
};
pub use predicate::{Clause, Comparison, Predicate, build_predicate};
pub use query_parser::{
    FilterCriterion, FilterField, FilterOperator, FilterSet, FilterValue, ListQuery, parse_query,
};
