//! Validation Utilities

use std::str::FromStr;

use validator::ValidationErrors;

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    // HashMap iteration order is unstable
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    AppError::Validation(field_errors)
}

/// Parse a path segment as a strictly positive identifier.
///
/// `label` is the human name used in the error, e.g. `"User ID"`.
pub fn parse_id<T>(raw: &str, label: &str) -> Result<T, AppError>
where
    T: FromStr + PartialOrd + Default,
{
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|id| *id > T::default())
        .ok_or_else(|| AppError::BadRequest(format!("{} must be a positive integer", label)))
}
