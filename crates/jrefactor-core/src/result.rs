//! Result type alias for jrefactor operations

use crate::error::RefactorError;

/// Standard Result type for jrefactor operations
pub type Result<T> = std::result::Result<T, RefactorError>;
