use std::io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to start '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Failed to load env file '{path}': {message}")]
    EnvFileError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Process,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LaunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LaunchError::SpawnError { .. } => ErrorCategory::Process,
            LaunchError::IoError(_) | LaunchError::SerializationError(_) => ErrorCategory::System,
            LaunchError::ConfigValidationError { .. }
            | LaunchError::InvalidConfigValueError { .. }
            | LaunchError::MissingConfigError { .. }
            | LaunchError::EnvFileError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Process => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit code reported when the launcher itself fails before the server
    /// produced one. 126/127 match what `sh` reports for the same failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::SpawnError { source, .. } => match source.kind() {
                ErrorKind::NotFound => 127,
                ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            LaunchError::IoError(_) | LaunchError::SerializationError(_) => 1,
            _ => 2,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LaunchError::SpawnError { program, source } => match source.kind() {
                ErrorKind::NotFound => format!(
                    "Install '{}' or make sure it is on your PATH (e.g. `pip install streamlit`)",
                    program
                ),
                ErrorKind::PermissionDenied => {
                    format!("Check that '{}' is executable", program)
                }
                _ => "Check the server command and try again".to_string(),
            },
            LaunchError::IoError(_) => "Check file permissions and available disk space".to_string(),
            LaunchError::SerializationError(_) => "Report this as a bug".to_string(),
            LaunchError::ConfigValidationError { .. } => {
                "Check the launcher config file for syntax errors".to_string()
            }
            LaunchError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the launcher config", field)
            }
            LaunchError::MissingConfigError { field } => {
                format!("Add '{}' to the launcher config", field)
            }
            LaunchError::EnvFileError { path, .. } => {
                format!("Make sure '{}' exists and uses KEY=VALUE lines", path)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LaunchError::SpawnError { program, source } if source.kind() == ErrorKind::NotFound => {
                format!("{}: command not found", program)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
