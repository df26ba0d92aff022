//! Domain value objects.
//!
//! Type-safe wrappers validated at construction time, so an invalid value
//! never reaches a request path.

pub mod errors;
pub mod record_id;

pub use errors::ValidationError;
pub use record_id::RecordId;
