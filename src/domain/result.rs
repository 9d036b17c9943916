//! Result type alias for hkmask

use super::errors::HkMaskError;

/// Result type alias for hkmask operations
///
/// Convenience alias that uses `HkMaskError` as the error type.
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, HkMaskError>;
