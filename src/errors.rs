use thiserror::Error;

/// Errors that can occur while building or querying the track graphs.
#[derive(Error, Debug)]
pub enum TrackLinkError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("track not found: {name}")]
    UnknownTrack { name: String },

    #[error("both endpoints must be tracks: {name}")]
    NotATrack { name: String },

    #[error("unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("malformed command: {message}")]
    MalformedCommand { message: String },

    #[error("dataset error: {message} (path: {path}, line: {line:?})")]
    Dataset {
        message: String,
        path: String,
        line: Option<usize>,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackLinkError {
    /// Shorthand for an [`TrackLinkError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        TrackLinkError::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Convenience alias for results using `TrackLinkError`.
pub type Result<T> = std::result::Result<T, TrackLinkError>;
