use thiserror::Error;

#[derive(Error, Debug)]
pub enum CssLoaderError {
    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Binding is detached from its state container")]
    Detached,

    #[error("A theme install is already in progress")]
    InstallInProgress,

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
}

impl CssLoaderError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }
}
