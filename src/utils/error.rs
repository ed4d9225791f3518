use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unknown card field: '{field}'")]
    UnknownField { field: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Text generation service error{}: {message}", status_suffix(.status))]
    ExternalServiceError { status: Option<u16>, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Programming,
    ExternalService,
    Configuration,
    Io,
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
            CardError::InvalidArgument { .. } => ErrorCategory::Input,
            CardError::UnknownField { .. } => ErrorCategory::Programming,
            CardError::ApiError(_) | CardError::ExternalServiceError { .. } => {
                ErrorCategory::ExternalService
            }
            CardError::IoError(_) | CardError::SerializationError(_) => ErrorCategory::Io,
            CardError::ConfigError { .. }
            | CardError::ConfigValidationError { .. }
            | CardError::InvalidConfigValueError { .. }
            | CardError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::ExternalService => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Programming => ErrorSeverity::Critical,
        }
    }

    /// Whether the text generation service is the origin of the failure.
    pub fn is_external(&self) -> bool {
        self.category() == ErrorCategory::ExternalService
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CardError::InvalidArgument { .. } => "Provide a non-empty card concept",
            CardError::UnknownField { .. } => {
                "Use one of: concept, name, mana_cost, card_type, rules_text, power_toughness, flavor_text"
            }
            CardError::ApiError(_) => "Check network connectivity and the provider endpoint",
            CardError::ExternalServiceError { status: Some(401 | 403), .. } => {
                "Check that the API key is set and valid"
            }
            CardError::ExternalServiceError { status: Some(429), .. } => {
                "The provider is rate limiting or out of quota; wait and try again"
            }
            CardError::ExternalServiceError { .. } => {
                "Check the model name and the provider status, then retry"
            }
            CardError::IoError(_) => "Check that the output directory exists and is writable",
            CardError::SerializationError(_) => "Report this as a bug",
            CardError::ConfigError { .. }
            | CardError::ConfigValidationError { .. }
            | CardError::InvalidConfigValueError { .. }
            | CardError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The card could not be started: {}", self),
            ErrorCategory::Programming => format!("Internal error: {}", self),
            ErrorCategory::ExternalService => {
                format!("The text generation service failed: {}", self)
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("Could not save the card: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
