use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CareError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] diabp_types::TextError),

    #[error("chat session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("chat session store lock was poisoned")]
    SessionLockPoisoned,

    #[error("failed to parse landmark frame at {path}: {message}")]
    FrameParse { path: String, message: String },

    #[error("failed to build PDF: {0}")]
    Pdf(String),
    #[error("failed to write file {path}: {source}", path = path.display())]
    FileWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CareResult<T> = std::result::Result<T, CareError>;
