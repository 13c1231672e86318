use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Duplicate record: {0}")]
    Conflict(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    #[error("Database error: {0}")]
    SqlxError(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    /// Pool exhaustion and broken connections surface as [`DatabaseError::ConnectionFailed`]
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionFailed(error.to_string())
            }
            other => Self::SqlxError(other),
        }
    }
}

impl DatabaseError {
    /// Map a sqlx error, turning unique-constraint violations into [`DatabaseError::Conflict`]
    pub fn from_write(error: sqlx::Error, what: &str) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(format!("{what} already exists"))
            }
            _ => Self::from(error),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
