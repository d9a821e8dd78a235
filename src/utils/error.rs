use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("{resource} '{name}' not found")]
    NotFound { resource: String, name: String },

    #[error("Provider returned status {status} for {url}")]
    Provider { status: u16, url: String },

    #[error("Malformed payload: {message}")]
    Payload { message: String },

    #[error("Move '{identifier}' is not in the current move pool")]
    UnknownMove { identifier: String },

    #[error("Card model is incomplete, missing: {}", .missing.join(", "))]
    IncompleteModel { missing: Vec<&'static str> },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {message}")]
    Image { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Lookup,
    Selection,
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CardError::Api(_) | CardError::Provider { .. } => ErrorCategory::Network,
            CardError::NotFound { .. } | CardError::Payload { .. } => ErrorCategory::Lookup,
            CardError::UnknownMove { .. } => ErrorCategory::Selection,
            CardError::IncompleteModel { .. } | CardError::Validation { .. } => {
                ErrorCategory::Input
            }
            CardError::Config { .. } => ErrorCategory::Configuration,
            CardError::Io(_) | CardError::Serialization(_) | CardError::Image { .. } => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CardError::UnknownMove { .. } => ErrorSeverity::Low,
            CardError::Api(_) | CardError::Provider { .. } => ErrorSeverity::Medium,
            CardError::NotFound { .. }
            | CardError::Payload { .. }
            | CardError::IncompleteModel { .. }
            | CardError::Validation { .. } => ErrorSeverity::High,
            CardError::Config { .. }
            | CardError::Io(_)
            | CardError::Serialization(_)
            | CardError::Image { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CardError::Api(_) => "Could not reach the data provider".to_string(),
            CardError::NotFound { resource, name } => {
                format!("No {} called '{}' was found", resource, name)
            }
            CardError::Provider { status, .. } => {
                format!("The data provider answered with status {}", status)
            }
            CardError::Payload { .. } => "The data provider sent data we could not read".to_string(),
            CardError::UnknownMove { identifier } => {
                format!("'{}' is not a move this creature can learn", identifier)
            }
            CardError::IncompleteModel { .. } => {
                "No creature has been loaded yet, so there is no card to build".to_string()
            }
            CardError::Validation { field, reason, .. } => format!("{}: {}", field, reason),
            CardError::Config { message } => format!("Configuration problem: {}", message),
            CardError::Io(e) => format!("File system error: {}", e),
            CardError::Serialization(_) => "Could not serialize the card".to_string(),
            CardError::Image { message } => format!("Could not draw the card: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the provider base URL, then retry",
            ErrorCategory::Lookup => "Check the spelling of the creature or move name",
            ErrorCategory::Selection => "Use --list-moves to see the moves available for this creature",
            ErrorCategory::Input => "Provide a creature name, HP and the damage for every selected move",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Output => "Make sure the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
