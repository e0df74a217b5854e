use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;
