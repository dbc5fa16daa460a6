use thiserror::Error;

#[derive(Debug, Error)]
pub enum EquityError {
    #[error("Path resolution failed: '{path}' has no '{segment}'")]
    PathResolution { path: String, segment: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input for {field}: {reason}")]
    InputValidation { field: String, reason: String },

    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Document does not match the equity schema: {0}")]
    Schema(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EquityError {
    /// HTTP status attached to a transport failure, when the endpoint answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            EquityError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_path_resolution(&self) -> bool {
        matches!(self, EquityError::PathResolution { .. })
    }
}

impl From<serde_json::Error> for EquityError {
    fn from(e: serde_json::Error) -> Self {
        EquityError::Serialization(e.to_string())
    }
}

#[cfg(feature = "extract")]
impl From<reqwest::Error> for EquityError {
    fn from(e: reqwest::Error) -> Self {
        EquityError::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
