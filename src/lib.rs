//! Dolibarr MCP Server - a Model Context Protocol server for the Dolibarr ERP/CRM REST API.
//!
//! This library exposes Dolibarr contacts, companies (third parties), commercial
//! proposals, agenda events and support tickets as MCP tools.
//!
//! # Architecture
//!
//! - **query**: query-string builder, filter expressions and agenda time windows
//! - **client**: blocking HTTP client for the Dolibarr API and its async wrapper
//! - **repositories**: one repository per Dolibarr resource
//! - **tools**: tool arguments and result rendering
//! - **server**: MCP protocol server over stdio
//! - **models**: resource kinds, creation-response normalization, agenda defaults
//! - **config** / **error** / **metrics**: ambient plumbing

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod repositories;
pub mod server;
pub mod tools;

pub use client::{AsyncDolibarrClient, AsyncDolibarrClientImpl, DolibarrClient, Method};
pub use config::Config;
pub use error::{ConfigError, DolibarrApiError, DolibarrApiResult};
pub use metrics::{HttpTimer, MethodSummary, Metrics, MetricsSummary};
pub use models::{CreationResult, Record, Resource};
pub use query::{FilterExpression, QueryBuilder, QueryParams, TimeWindow};
pub use repositories::Repositories;
pub use server::DolibarrMcpServer;
