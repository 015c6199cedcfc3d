use thiserror::Error;

#[derive(Error, Debug)]
pub enum VegError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Feed endpoint {url} responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed feed: {message}")]
    MalformedFeed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Rendering,
    System,
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VegError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VegError::ApiError(_) | VegError::HttpStatus { .. } => ErrorCategory::Network,
            VegError::MalformedFeed { .. } | VegError::SerializationError(_) => ErrorCategory::Data,
            VegError::TemplateError(_) => ErrorCategory::Rendering,
            VegError::ConfigValidationError { .. }
            | VegError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            VegError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 上游暫時故障，稍後重跑即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration | ErrorCategory::Rendering => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            VegError::ApiError(_) => {
                "Check network connectivity and that the feed endpoint is reachable".to_string()
            }
            VegError::HttpStatus { status, .. } if *status >= 500 => {
                "The menu service is failing; try again later".to_string()
            }
            VegError::HttpStatus { .. } => {
                "Verify the --endpoint URL points at the menus JSON document".to_string()
            }
            VegError::MalformedFeed { .. } | VegError::SerializationError(_) => {
                "The feed format may have changed; inspect the raw response (see vegfi-archive)"
                    .to_string()
            }
            VegError::TemplateError(_) => {
                "Fix the template syntax or point --template at a valid file".to_string()
            }
            VegError::IoError(_) => {
                "Check that the template exists and the output directory is writable".to_string()
            }
            VegError::ConfigValidationError { field, .. }
            | VegError::InvalidConfigValueError { field, .. } => {
                format!("Correct the '{}' setting and run again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch the menu feed: {}", self),
            ErrorCategory::Data => format!("The menu feed could not be read: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Rendering => format!("Could not render the menu page: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, VegError>;
