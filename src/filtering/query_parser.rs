//! Query-string parsing for `GET /properties`.
//!
//! Turns the raw query map into pagination controls plus one
//! [`FilterCriterion`] per filtered field. Every problem found is reported,
//! not just the first.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::pagination::{DEFAULT_PAGE, MAX_LIMIT, MAX_PAGE, Pagination};
use crate::validation::{ValidationError, ValidationErrors};

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";

/// Longest filter value accepted, in characters.
pub const MAX_FILTER_VALUE_LENGTH: usize = 10_000;

/// Operators of the `<operator>:<value>` grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Not,
    Gt,
    Lt,
}

impl FilterOperator {
    pub const ALL: [Self; 4] = [Self::Eq, Self::Not, Self::Gt, Self::Lt];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Not => "not",
            Self::Gt => "gt",
            Self::Lt => "lt",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operator '{s}'"))
    }
}

/// Whether a field holds text or whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
}

/// Fields a listing can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    Address,
    Price,
    Bedrooms,
    Bathrooms,
    Type,
}

impl FilterField {
    pub const ALL: [Self; 5] = [
        Self::Address,
        Self::Price,
        Self::Bedrooms,
        Self::Bathrooms,
        Self::Type,
    ];

    /// Query-parameter name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Price => "price",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::Type => "type",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Address | Self::Type => ValueKind::Text,
            Self::Price | Self::Bedrooms | Self::Bathrooms => ValueKind::Integer,
        }
    }

    /// Operators this field accepts.
    #[must_use]
    pub fn allowed_operators(self) -> &'static [FilterOperator] {
        match self {
            Self::Address => &[FilterOperator::Eq],
            Self::Type => &[FilterOperator::Eq, FilterOperator::Not],
            Self::Price | Self::Bedrooms | Self::Bathrooms => {
                &[FilterOperator::Eq, FilterOperator::Gt, FilterOperator::Lt]
            }
        }
    }

    #[must_use]
    pub fn allows(self, operator: FilterOperator) -> bool {
        self.allowed_operators().contains(&operator)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A filter operand, typed per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(number) => write!(f, "{number}"),
        }
    }
}

/// One `(operator, value)` constraint on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterCriterion {
    #[must_use]
    pub fn new(operator: FilterOperator, value: FilterValue) -> Self {
        Self { operator, value }
    }

    /// Parse a raw query value for `field`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the field when the operator is
    /// unknown or not allowed for the field, or the value is empty, too long
    /// or of the wrong type.
    pub fn parse(field: FilterField, raw: &str) -> Result<Self, ValidationError> {
        let (operator, value) = split_operator(field, raw)?;

        if !field.allows(operator) {
            let allowed = field
                .allowed_operators()
                .iter()
                .map(|op| op.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ValidationError::new(
                field.name(),
                format!("Invalid operator '{operator}' for {field} filter, expected one of: {allowed}"),
            ));
        }

        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::new(
                field.name(),
                format!("Missing value for {field} filter"),
            ));
        }
        if value.chars().count() > MAX_FILTER_VALUE_LENGTH {
            return Err(ValidationError::new(
                field.name(),
                format!("Value for {field} filter exceeds {MAX_FILTER_VALUE_LENGTH} characters"),
            ));
        }

        let value = match field.kind() {
            ValueKind::Text => FilterValue::Text(value.to_string()),
            ValueKind::Integer => match value.parse::<i64>() {
                Ok(number) if number >= 0 => FilterValue::Integer(number),
                _ => {
                    return Err(ValidationError::new(
                        field.name(),
                        format!(
                            "Invalid value for {field} filter, expected a non-negative integer as <value> or <operator>:<value>"
                        ),
                    ));
                }
            },
        };

        Ok(Self { operator, value })
    }
}

/// Serializes back to the `<operator>:<value>` query grammar.
impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operator, self.value)
    }
}

/// Split `raw` into operator and value.
///
/// Numeric fields always treat a `:` prefix as the operator. Text fields only
/// do so when the prefix names a known operator, so a literal colon in an
/// address survives.
fn split_operator(field: FilterField, raw: &str) -> Result<(FilterOperator, &str), ValidationError> {
    let Some((prefix, rest)) = raw.split_once(':') else {
        return Ok((FilterOperator::Eq, raw));
    };

    match (prefix.parse::<FilterOperator>(), field.kind()) {
        (Ok(operator), _) => Ok((operator, rest)),
        (Err(_), ValueKind::Text) => Ok((FilterOperator::Eq, raw)),
        (Err(message), ValueKind::Integer) => Err(ValidationError::new(
            field.name(),
            format!("{message} for {field} filter"),
        )),
    }
}

/// Parsed filters keyed by field; at most one criterion per field.
pub type FilterSet = BTreeMap<FilterField, FilterCriterion>;

/// Everything `GET /properties` needs from its query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub pagination: Pagination,
    pub filters: FilterSet,
}

/// Validate and parse the query pairs of a list request, in the order they
/// appeared in the query string.
///
/// `page` and `limit` become pagination controls; the remaining parameters
/// must be filterable fields. Each parameter may appear at most once.
///
/// # Errors
///
/// Returns every failure found: unknown or repeated parameters, malformed
/// filters, and out-of-range `page`/`limit`.
pub fn parse_query(params: &[(String, String)]) -> Result<ListQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut query = ListQuery::default();

    // sorted so errors come back in a stable order; repeats keep their order
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_by_key(|&(key, _)| key);

    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();

    for (key, raw) in pairs {
        if !seen.insert(key) {
            if repeated.insert(key) {
                errors.add(ValidationError::new(
                    key,
                    format!("Duplicate parameter: {key}"),
                ));
            }
            continue;
        }

        match key {
            PAGE_PARAM => match parse_bounded(raw, DEFAULT_PAGE, Some(MAX_PAGE)) {
                Some(page) => query.pagination.page = page,
                None => errors.add(ValidationError::new(
                    PAGE_PARAM,
                    format!("Invalid page number, expected an integer from 1 to {MAX_PAGE}"),
                )),
            },
            LIMIT_PARAM => match parse_bounded(raw, 1, Some(MAX_LIMIT)) {
                Some(limit) => query.pagination.limit = limit,
                None => errors.add(ValidationError::new(
                    LIMIT_PARAM,
                    format!("Invalid limit number, expected an integer from 1 to {MAX_LIMIT}"),
                )),
            },
            name => match FilterField::from_name(name) {
                Some(field) => match FilterCriterion::parse(field, raw) {
                    Ok(criterion) => {
                        query.filters.insert(field, criterion);
                    }
                    Err(error) => errors.add(error),
                },
                None => errors.add(ValidationError::new(
                    name,
                    format!("Invalid parameter: {name}"),
                )),
            },
        }
    }

    errors.result().map(|()| query)
}

fn parse_bounded(raw: &str, min: u64, max: Option<u64>) -> Option<u64> {
    let value = raw.trim().parse::<u64>().ok()?;
    (value >= min && max.is_none_or(|max| value <= max)).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn criterion(field: FilterField, raw: &str) -> FilterCriterion {
        FilterCriterion::parse(field, raw).unwrap()
    }

    // ===== OPERATOR GRAMMAR =====

    #[test]
    fn test_operator_prefix_is_parsed() {
        assert_eq!(
            criterion(FilterField::Price, "gt:500000"),
            FilterCriterion::new(FilterOperator::Gt, FilterValue::Integer(500_000))
        );
        assert_eq!(
            criterion(FilterField::Bedrooms, "lt:4"),
            FilterCriterion::new(FilterOperator::Lt, FilterValue::Integer(4))
        );
        assert_eq!(
            criterion(FilterField::Type, "not:house"),
            FilterCriterion::new(FilterOperator::Not, FilterValue::Text("house".to_string()))
        );
    }

    #[test]
    fn test_missing_operator_defaults_to_eq() {
        assert_eq!(
            criterion(FilterField::Bathrooms, "2"),
            FilterCriterion::new(FilterOperator::Eq, FilterValue::Integer(2))
        );
        assert_eq!(
            criterion(FilterField::Type, "MultiFamily"),
            FilterCriterion::new(FilterOperator::Eq, FilterValue::Text("MultiFamily".to_string()))
        );
    }

    #[test]
    fn test_criterion_display_round_trips() {
        let cases = [
            (FilterField::Price, "gt:500000"),
            (FilterField::Price, "lt:10"),
            (FilterField::Bedrooms, "eq:3"),
            (FilterField::Type, "not:Condo"),
            (FilterField::Type, "eq:MultiFamily"),
            (FilterField::Address, "eq:6201 15th Ave"),
        ];
        for (field, raw) in cases {
            let parsed = criterion(field, raw);
            assert_eq!(parsed.to_string(), raw);
            assert_eq!(criterion(field, &parsed.to_string()), parsed);
        }
    }

    #[test]
    fn test_address_keeps_literal_colon() {
        assert_eq!(
            criterion(FilterField::Address, "Unit 4: Main St"),
            FilterCriterion::new(FilterOperator::Eq, FilterValue::Text("Unit 4: Main St".to_string()))
        );
    }

    #[test]
    fn test_address_is_trimmed() {
        assert_eq!(
            criterion(FilterField::Address, "  San Francisco "),
            FilterCriterion::new(FilterOperator::Eq, FilterValue::Text("San Francisco".to_string()))
        );
    }

    #[test]
    fn test_disallowed_operators_are_rejected() {
        for (field, raw) in [
            (FilterField::Address, "not:San Francisco"),
            (FilterField::Address, "gt:1"),
            (FilterField::Type, "gt:Condo"),
            (FilterField::Price, "not:5"),
            (FilterField::Bedrooms, "not:3"),
        ] {
            let err = FilterCriterion::parse(field, raw).unwrap_err();
            assert_eq!(err.field, field.name());
            assert!(err.message.contains("Invalid operator"), "{raw}: {}", err.message);
        }
    }

    #[test]
    fn test_unknown_operator_on_numeric_field() {
        let err = FilterCriterion::parse(FilterField::Price, "gte:5").unwrap_err();
        assert_eq!(err.field, "price");
        assert!(err.message.contains("Unknown operator 'gte'"));
    }

    #[test]
    fn test_numeric_value_must_be_non_negative_integer() {
        for raw in ["abc", "gt:abc", "-5", "lt:-1", "2.5", "gt:1e6"] {
            let err = FilterCriterion::parse(FilterField::Price, raw).unwrap_err();
            assert_eq!(err.field, "price");
            assert!(err.message.contains("non-negative integer"), "{raw}");
        }
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let err = FilterCriterion::parse(FilterField::Price, "gt:").unwrap_err();
        assert!(err.message.contains("Missing value"));
        let err = FilterCriterion::parse(FilterField::Address, "   ").unwrap_err();
        assert_eq!(err.field, "address");
    }

    #[test]
    fn test_overlong_value_is_rejected() {
        let at_limit = "a".repeat(MAX_FILTER_VALUE_LENGTH);
        assert!(FilterCriterion::parse(FilterField::Address, &at_limit).is_ok());

        let too_long = "a".repeat(MAX_FILTER_VALUE_LENGTH + 1);
        for field in [FilterField::Address, FilterField::Type] {
            let err = FilterCriterion::parse(field, &too_long).unwrap_err();
            assert_eq!(err.field, field.name());
            assert!(err.message.contains("exceeds"), "{}", err.message);
        }
        let err = FilterCriterion::parse(FilterField::Price, &"9".repeat(MAX_FILTER_VALUE_LENGTH + 1)).unwrap_err();
        assert_eq!(err.field, "price");
    }

    // ===== QUERY MAP =====

    #[test]
    fn test_empty_query_uses_defaults() {
        let parsed = parse_query(&[]).unwrap();
        assert_eq!(parsed.pagination.page, 1);
        assert_eq!(parsed.pagination.limit, 10);
        assert!(parsed.filters.is_empty());
    }

    #[test]
    fn test_pagination_keys_are_not_filters() {
        let parsed = parse_query(&query(&[("page", "3"), ("limit", "20"), ("bedrooms", "gt:3")])).unwrap();
        assert_eq!(parsed.pagination.page, 3);
        assert_eq!(parsed.pagination.limit, 20);
        assert_eq!(parsed.filters.len(), 1);
        assert!(parsed.filters.contains_key(&FilterField::Bedrooms));
    }

    #[test]
    fn test_all_fields_parse_together() {
        let parsed = parse_query(&query(&[
            ("address", "6201 15th Ave"),
            ("price", "lt:2000000"),
            ("bedrooms", "3"),
            ("bathrooms", "gt:1"),
            ("type", "not:Condo"),
        ]))
        .unwrap();
        assert_eq!(parsed.filters.len(), 5);
        assert_eq!(
            parsed.filters[&FilterField::Price],
            FilterCriterion::new(FilterOperator::Lt, FilterValue::Integer(2_000_000))
        );
    }

    #[test]
    fn test_unknown_parameter_is_named() {
        let errors = parse_query(&query(&[("color", "red")])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "color");
        assert_eq!(errors.errors()[0].message, "Invalid parameter: color");
    }

    #[test]
    fn test_any_unknown_key_fails_and_is_named() {
        for key in ["cursor", "sort", "id", "Price", "per_page", ""] {
            let errors = parse_query(&query(&[("price", "gt:1"), (key, "x")])).unwrap_err();
            assert!(
                errors.errors().iter().any(|e| e.field == key),
                "expected '{key}' to be reported"
            );
        }
    }

    #[test]
    fn test_limit_bounds() {
        for bad in ["0", "51", "-1", "ten", "1.5", ""] {
            let errors = parse_query(&query(&[("limit", bad)])).unwrap_err();
            assert_eq!(errors.errors()[0].field, "limit", "{bad}");
        }
        assert_eq!(parse_query(&query(&[("limit", "50")])).unwrap().pagination.limit, 50);
        assert_eq!(parse_query(&query(&[("limit", "1")])).unwrap().pagination.limit, 1);
    }

    #[test]
    fn test_page_bounds() {
        for bad in ["0", "-2", "first"] {
            let errors = parse_query(&query(&[("page", bad)])).unwrap_err();
            assert_eq!(errors.errors()[0].field, "page", "{bad}");
        }
        assert_eq!(parse_query(&query(&[("page", "1")])).unwrap().pagination.page, 1);
    }

    #[test]
    fn test_page_above_max_is_rejected() {
        let max = MAX_PAGE.to_string();
        assert_eq!(parse_query(&query(&[("page", &max)])).unwrap().pagination.page, MAX_PAGE);

        let beyond = (MAX_PAGE + 1).to_string();
        for bad in [beyond.as_str(), "18446744073709551615", "18446744073709551616"] {
            let errors = parse_query(&query(&[("page", bad), ("limit", "50")])).unwrap_err();
            assert_eq!(errors.len(), 1, "{bad}");
            assert_eq!(errors.errors()[0].field, "page", "{bad}");
        }
    }

    #[test]
    fn test_repeated_parameter_is_reported_once() {
        let errors = parse_query(&query(&[
            ("price", "gt:500"),
            ("bedrooms", "2"),
            ("price", "lt:50"),
            ("price", "eq:7"),
        ]))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "price");
        assert_eq!(errors.errors()[0].message, "Duplicate parameter: price");
    }

    #[test]
    fn test_repeated_pagination_key_is_reported() {
        let errors = parse_query(&query(&[("page", "1"), ("limit", "5"), ("page", "2")])).unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["page"]);
    }

    #[test]
    fn test_errors_are_collected_not_short_circuited() {
        let errors = parse_query(&query(&[
            ("page", "0"),
            ("limit", "500"),
            ("price", "not:5"),
            ("bedrooms", "many"),
            ("color", "red"),
        ]))
        .unwrap_err();

        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["bedrooms", "color", "limit", "page", "price"]);
    }
}
