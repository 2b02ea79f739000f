//! Repository error type

/// SQLSTATE class 23: integrity constraint violation.
const INTEGRITY_CONSTRAINT_CLASS: &str = "23";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Duplicate key, missing foreign key, failed CHECK, NOT NULL.
    #[error("constraint violation ({constraint}): {message}")]
    Constraint { constraint: String, message: String },
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let is_constraint = db_err
                .code()
                .is_some_and(|code| code.starts_with(INTEGRITY_CONSTRAINT_CLASS));

            if is_constraint {
                return Self::Constraint {
                    constraint: db_err.constraint().unwrap_or("unknown").to_owned(),
                    message: db_err.message().to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
