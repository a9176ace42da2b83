use std::fmt;
use thiserror::Error;

/// Which side of the like/dislike relation an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Item,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Item => write!(f, "item"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SibylError {
    #[error("Unknown {kind}: {id}")]
    UnknownEntity { kind: EntityKind, id: String },

    #[error("Undefined comparison: {message}")]
    UndefinedComparison { message: String },

    #[error("Invalid argument '{field}' = '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked about something the engine has never seen.
    Lookup,
    /// The relation holds no signal for the requested ratio.
    NoSignal,
    Input,
    Configuration,
    System,
}

impl SibylError {
    pub fn unknown_user(id: impl fmt::Display) -> Self {
        SibylError::UnknownEntity {
            kind: EntityKind::User,
            id: id.to_string(),
        }
    }

    pub fn unknown_item(id: impl fmt::Display) -> Self {
        SibylError::UnknownEntity {
            kind: EntityKind::Item,
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SibylError::UnknownEntity { .. } => ErrorCategory::Lookup,
            SibylError::UndefinedComparison { .. } => ErrorCategory::NoSignal,
            SibylError::InvalidArgument { .. } | SibylError::CsvError(_) => ErrorCategory::Input,
            SibylError::ConfigError { .. } => ErrorCategory::Configuration,
            SibylError::IoError(_) | SibylError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => {
                "Record at least one like or dislike for this id before querying it"
            }
            ErrorCategory::NoSignal => {
                "The users share no rated items yet; collect more feedback"
            }
            ErrorCategory::Input => "Check the feedback rows for empty ids or unknown actions",
            ErrorCategory::Configuration => "Check the TOML configuration and CLI flags",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SibylError::UnknownEntity { kind, id } => {
                format!("No feedback has been recorded for {} '{}'", kind, id)
            }
            SibylError::UndefinedComparison { message } => {
                format!("Not enough feedback to compute a score ({})", message)
            }
            SibylError::InvalidArgument { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SibylError>;
