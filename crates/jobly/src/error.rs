//! Error types for jobly

use thiserror::Error;

/// Result type alias for jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

/// Error types for clause building and record access
#[derive(Debug, Error)]
pub enum JoblyError {
    /// Partial update called without any field to set
    #[error("No data: update requires at least one field")]
    EmptyInput,

    /// Filter key with no entry in the predicate table
    #[error("Untranslated filter field: {0}")]
    UntranslatedField(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record with the same key already exists
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Migration error
    #[cfg(feature = "migrate")]
    #[error("Migration error: {0}")]
    Migration(String),
}

impl JoblyError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is a unique violation on `constraint`.
    pub fn is_unique_violation_on(&self, constraint: &str) -> bool {
        matches!(self, Self::UniqueViolation(msg) if msg.split(':').next() == Some(constraint))
    }

    /// Whether the caller's input caused this error.
    ///
    /// `UntranslatedField` is deliberately excluded: it means a filter key got past the
    /// allow-list without a predicate template, which is a server configuration defect.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::NotFound(_)
                | Self::Duplicate(_)
                | Self::Validation(_)
                | Self::UniqueViolation(_)
                | Self::ForeignKeyViolation(_)
                | Self::CheckViolation(_)
        )
    }

    /// Parse a tokio_postgres error into a more specific JoblyError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for JoblyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(feature = "migrate")]
impl From<refinery::Error> for JoblyError {
    fn from(err: refinery::Error) -> Self {
        Self::Migration(err.to_string())
    }
}
