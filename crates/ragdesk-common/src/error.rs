use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagdeskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload rejected: {0}")]
    Upload(String),
}

impl RagdeskError {
    /// True for errors caused by what the user submitted rather than by the
    /// environment; these render as warnings instead of errors.
    pub fn is_user_error(&self) -> bool {
        matches!(self, RagdeskError::Upload(_))
    }
}

pub type Result<T> = std::result::Result<T, RagdeskError>;
