//! Constraint violation translation.
//!
//! Repositories pass every write error through [`translate`] so that the
//! services only ever see `AppError::ConstraintViolation` for rejected data,
//! never a raw driver error.

use sqlx::error::ErrorKind;

use crate::shared::error::AppError;

/// Map unique and foreign-key violations to `ConstraintViolation`, carrying
/// the constraint name. Everything else stays a database error.
pub fn translate(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err)
            if matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation
            ) =>
        {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            tracing::debug!(%constraint, "Write rejected by constraint");
            AppError::ConstraintViolation(constraint)
        }
        _ => AppError::Database(err),
    }
}
