//! Query string construction for Dolibarr list endpoints.
//!
//! Dolibarr list endpoints accept `limit`, `sortorder`, `sortfield` and
//! `sqlfilters` query parameters. [`QueryBuilder`] applies the configured
//! defaults and the encoding rules shared by every list tool.

pub mod filter;
pub mod window;

pub use filter::{Comparison, FilterExpression};
pub use window::{upcoming_filter, TimeWindow, WindowBounds};

use crate::config::Config;
use crate::models::Resource;

/// Per-call list parameters. `None` means "use the builder's default".
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Maximum number of records; `Some(0)` omits the limit entirely
    pub limit: Option<u32>,

    /// Sort direction, case-insensitive `ASC` or `DESC`
    pub sort_order: Option<String>,

    /// Column to sort on, e.g. `t.lastname`
    pub sort_field: Option<String>,

    /// Filter sent as `sqlfilters`
    pub filter: Option<FilterExpression>,
}

impl QueryParams {
    pub fn new(limit: Option<u32>, sort_order: Option<String>) -> Self {
        Self {
            limit,
            sort_order,
            ..Default::default()
        }
    }

    pub fn sort_field(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    pub fn filter(mut self, filter: Option<FilterExpression>) -> Self {
        self.filter = filter;
        self
    }
}

/// Builds query strings with the process-wide list defaults.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    default_limit: u32,
    default_sort_order: String,
}

impl QueryBuilder {
    pub fn new(default_limit: u32, default_sort_order: impl Into<String>) -> Self {
        Self {
            default_limit,
            default_sort_order: default_sort_order.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.default_limit, config.default_sort_order.clone())
    }

    /// Build the query string for a list call on `resource`.
    ///
    /// Returns `?limit=..&sortorder=..&sortfield=..&sqlfilters=..` with only the
    /// parameters that apply, or an empty string when none do.
    pub fn build(&self, resource: Resource, params: &QueryParams) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);

        let limit = params.limit.unwrap_or(self.default_limit);
        if limit > 0 {
            parts.push(format!("limit={}", limit));
        }

        let sort_order = params
            .sort_order
            .as_deref()
            .unwrap_or(&self.default_sort_order)
            .to_uppercase();
        if sort_order == "ASC" || sort_order == "DESC" {
            parts.push(format!("sortorder={}", sort_order));

            let sort_field = params
                .sort_field
                .as_deref()
                .or_else(|| resource.fallback_sort_field());
            if let Some(field) = sort_field {
                parts.push(format!("sortfield={}", field));
            }
        }

        if let Some(filter) = params.filter.as_ref().filter(|f| !f.is_empty()) {
            parts.push(format!("sqlfilters={}", filter.encoded()));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder {
        QueryBuilder::new(100, "DESC")
    }

    #[test]
    fn test_defaults_applied() {
        let query = builder().build(
            Resource::Contact,
            &QueryParams::default().sort_field("t.lastname"),
        );
        assert_eq!(query, "?limit=100&sortorder=DESC&sortfield=t.lastname");
    }

    #[test]
    fn test_zero_limit_omitted() {
        for resource in [Resource::Contact, Resource::Ticket, Resource::AgendaEvent] {
            let query = builder().build(resource, &QueryParams::new(Some(0), None));
            assert!(!query.contains("limit"), "unexpected limit in {}", query);
        }
    }

    #[test]
    fn test_positive_limit_emitted_once() {
        for limit in [1u32, 7, 100, 5000] {
            let query = builder().build(Resource::Proposal, &QueryParams::new(Some(limit), None));
            let expected = format!("limit={}", limit);
            assert_eq!(query.matches("limit=").count(), 1);
            assert!(query.starts_with(&format!("?{}", expected)));
        }
    }

    #[test]
    fn test_sort_order_case_insensitive() {
        let query = builder().build(
            Resource::Company,
            &QueryParams::new(Some(10), Some("asc".to_string())).sort_field("t.name"),
        );
        assert_eq!(query, "?limit=10&sortorder=ASC&sortfield=t.name");
    }

    #[test]
    fn test_invalid_sort_order_disables_sorting() {
        for order in ["random", "", "ascending", "DES"] {
            let query = builder().build(
                Resource::AgendaEvent,
                &QueryParams::new(Some(5), Some(order.to_string())).sort_field("t.datep"),
            );
            assert!(!query.contains("sortorder"), "{} -> {}", order, query);
            assert!(!query.contains("sortfield"), "{} -> {}", order, query);
            assert_eq!(query, "?limit=5");
        }
    }

    #[test]
    fn test_invalid_default_sort_order_disables_sorting() {
        let query = QueryBuilder::new(100, "newest").build(Resource::Ticket, &QueryParams::default());
        assert_eq!(query, "?limit=100");
    }

    #[test]
    fn test_agenda_falls_back_to_event_date() {
        let query = builder().build(Resource::AgendaEvent, &QueryParams::new(Some(3), None));
        assert_eq!(query, "?limit=3&sortorder=DESC&sortfield=t.datep");
    }

    #[test]
    fn test_other_resources_have_no_fallback_field() {
        let query = builder().build(Resource::Ticket, &QueryParams::new(Some(3), None));
        assert_eq!(query, "?limit=3&sortorder=DESC");
    }

    #[test]
    fn test_filter_encoded() {
        let params = QueryParams::new(Some(0), Some("none".to_string()))
            .filter(Some(FilterExpression::like("t.name", "Acme & Co")));
        let query = builder().build(Resource::Company, &params);
        assert_eq!(
            query,
            "?sqlfilters=%28t.name%3Alike%3A%27%25Acme%20%26%20Co%25%27%29"
        );
    }

    #[test]
    fn test_empty_filter_ignored() {
        let params = QueryParams::new(Some(0), Some("x".to_string()))
            .filter(Some(FilterExpression::raw("")));
        assert_eq!(builder().build(Resource::Contact, &params), "");
    }

    #[test]
    fn test_nothing_to_emit_is_empty_string() {
        let query = builder().build(
            Resource::Proposal,
            &QueryParams::new(Some(0), Some("unsorted".to_string())),
        );
        assert_eq!(query, "");
    }
}
