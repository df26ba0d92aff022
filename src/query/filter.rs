//! Dolibarr `sqlfilters` expressions.
//!
//! Filters are kept as opaque strings in the remote system's own syntax, e.g.
//! `(t.lastname:like:'%dupont%') OR (t.email:like:'%dupont%')` or
//! `t.datep >= '2024-05-01 00:00:00'`. Nothing here parses or validates them:
//! caller-supplied terms are interpolated verbatim and Dolibarr decides what
//! is valid. Quotes inside a search term are *not* escaped.

use std::fmt;

/// Comparison operators used in date-bound filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Ge,
    Gt,
    Eq,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
            Comparison::Gt => ">",
            Comparison::Eq => "=",
        }
    }
}

/// An opaque Dolibarr filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression(String);

impl FilterExpression {
    /// Wrap an already-built expression without looking at it.
    pub fn raw(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// `(column:like:'%term%')`
    pub fn like(column: &str, term: &str) -> Self {
        Self(format!("({}:like:'%{}%')", column, term))
    }

    /// `column <op> 'value'`
    pub fn compare(column: &str, op: Comparison, value: &str) -> Self {
        Self(format!("{} {} '{}'", column, op.as_sql(), value))
    }

    /// Join two expressions with `AND`.
    pub fn and(self, other: FilterExpression) -> Self {
        Self(format!("{} AND {}", self.0, other.0))
    }

    /// Join two expressions with `OR`.
    pub fn or(self, other: FilterExpression) -> Self {
        Self(format!("{} OR {}", self.0, other.0))
    }

    /// `(c1:like:'%term%') OR (c2:like:'%term%') ...` over every column.
    ///
    /// Returns `None` for an empty term or an empty column list.
    pub fn any_like(columns: &[&str], term: &str) -> Option<Self> {
        if term.is_empty() {
            return None;
        }
        columns
            .iter()
            .map(|column| Self::like(column, term))
            .reduce(Self::or)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Percent-encoded form for the `sqlfilters` query parameter.
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like() {
        let filter = FilterExpression::like("t.name", "Acme");
        assert_eq!(filter.as_str(), "(t.name:like:'%Acme%')");
    }

    #[test]
    fn test_any_like_contact_columns() {
        let filter =
            FilterExpression::any_like(&["t.lastname", "t.firstname", "t.email"], "dupont")
                .unwrap();
        assert_eq!(
            filter.as_str(),
            "(t.lastname:like:'%dupont%') OR (t.firstname:like:'%dupont%') OR (t.email:like:'%dupont%')"
        );
    }

    #[test]
    fn test_any_like_empty_term_is_none() {
        assert!(FilterExpression::any_like(&["t.name"], "").is_none());
        assert!(FilterExpression::any_like(&[], "acme").is_none());
    }

    #[test]
    fn test_compare_and() {
        let filter = FilterExpression::compare("t.datep", Comparison::Ge, "2024-01-01 00:00:00")
            .and(FilterExpression::compare(
                "t.datep",
                Comparison::Le,
                "2024-01-01 23:59:59",
            ));
        assert_eq!(
            filter.as_str(),
            "t.datep >= '2024-01-01 00:00:00' AND t.datep <= '2024-01-01 23:59:59'"
        );
    }

    #[test]
    fn test_quotes_pass_through_unescaped() {
        let filter = FilterExpression::like("t.name", "O'Brien");
        assert_eq!(filter.as_str(), "(t.name:like:'%O'Brien%')");
    }

    #[test]
    fn test_encoded() {
        let filter = FilterExpression::compare("t.datep", Comparison::Lt, "2024-01-01 10:00:00");
        assert_eq!(
            filter.encoded(),
            "t.datep%20%3C%20%272024-01-01%2010%3A00%3A00%27"
        );
    }
}
