//! Rejections raised while building domain values from tool arguments.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank or whitespace-only record identifier.
    #[error("ID cannot be empty")]
    EmptyId,
}
