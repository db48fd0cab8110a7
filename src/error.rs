use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the backing document (I/O or encoding).
    pub fn is_storage(&self) -> bool {
        matches!(self, StoreError::Storage(_) | StoreError::Serialization(_))
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] dialoguer::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Input(#[from] InputError),
}
