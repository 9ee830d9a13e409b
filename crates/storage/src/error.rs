use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Machine-readable reason, stable across message wording changes.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Migration(_) => "database",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Forbidden(_) => "forbidden",
            Self::Duplicate(_) => "duplicate",
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Turns a unique-constraint failure into `Duplicate`, leaving other errors untouched.
    pub(crate) fn on_unique_violation(error: sqlx::Error, message: &str) -> Self {
        let error = Self::from(error);
        if error.is_unique_violation() {
            Self::Duplicate(message.to_string())
        } else if error.is_foreign_key_violation() {
            Self::Validation("Referenced record does not exist".to_string())
        } else {
            error
        }
    }
}
