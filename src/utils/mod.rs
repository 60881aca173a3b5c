// Utility functions

pub mod payload;

use crate::types::*;

/// Validates a value against a constraint and returns an error if it fails
pub fn validate<T, F>(
    value: T,
    constraint: F,
    error_message: impl Into<String>,
) -> ApiResult<T>
where
    F: FnOnce(&T) -> bool,
{
    if constraint(&value) {
        Ok(value)
    } else {
        Err(ApiError::InvalidParameter(error_message.into()))
    }
}

/// Validates a string against common constraints
pub struct StringValidator;

impl StringValidator {
    /// Validates that a string is not empty or whitespace
    pub fn not_empty(value: impl Into<String>, param_name: &str) -> ApiResult<String> {
        let value = value.into();
        validate(
            value,
            |s| !s.trim().is_empty(),
            format!("{} cannot be empty", param_name),
        )
    }

    /// Validates that a string can be used as a single URL path segment
    pub fn path_segment(value: impl Into<String>, param_name: &str) -> ApiResult<String> {
        let value = Self::not_empty(value, param_name)?;
        validate(
            value,
            |s| !s.contains(['/', '?', '#', '\\']) && s != "." && s != "..",
            format!("{} must be a single path segment", param_name),
        )
    }
}
