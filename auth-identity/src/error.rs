use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("JWT error: {0}")]
    JwtError(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
