//! Data structures shared by the client, repositories and tools.
//!
//! Dolibarr records are not modelled field by field: they travel as open JSON
//! objects ([`Record`]) and only the few fields this server touches are named.

pub mod agenda_event;
pub mod creation;
pub mod resource;

pub use agenda_event::apply_event_defaults;
pub use creation::CreationResult;
pub use resource::Resource;

/// A Dolibarr record: field name to value, untyped at this layer.
pub type Record = serde_json::Map<String, serde_json::Value>;
