use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{service} request failed: {message}")]
    Upstream { service: String, message: String },

    #[error("No relevant messages found for '{item}'")]
    NoMatch { item: String },

    #[error("Malformed model response: {message}")]
    MalformedResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// 錯誤類別，供 HTTP 層與 CLI 對應狀態碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Upstream,
    NoMatch,
    MalformedResponse,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::NoMatch => "no_match",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Config => "config_error",
        }
    }
}

impl ResolverError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ResolverError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        ResolverError::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ResolverError::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolverError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ResolverError::Upstream { .. } => ErrorKind::Upstream,
            ResolverError::NoMatch { .. } => ErrorKind::NoMatch,
            ResolverError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            ResolverError::ConfigError { .. }
            | ResolverError::MissingConfigError { .. }
            | ResolverError::InvalidConfigValueError { .. }
            | ResolverError::IoError(_) => ErrorKind::Config,
        }
    }

    /// Request-level failures are reportable to the caller; configuration
    /// failures stop the process.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Config)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ResolverError::InvalidInput { .. } => "Missing item name".to_string(),
            ResolverError::NoMatch { item } => format!("No price data found for '{}'", item),
            ResolverError::Upstream { service, .. } => {
                format!("{} is unavailable right now", service)
            }
            ResolverError::MalformedResponse { .. } => {
                "The price model returned an unreadable answer".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidInput => "Pass a non-empty item name",
            ErrorKind::Upstream => "Check credentials and network access, then try again",
            ErrorKind::NoMatch => "Try a shorter or differently spelled item name",
            ErrorKind::MalformedResponse => "Review the system instruction and model version",
            ErrorKind::Config => "Check the environment variables or the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
