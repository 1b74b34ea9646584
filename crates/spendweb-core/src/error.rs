//! Error types for spendweb-core
//!
//! Form-level failures never escape a view: they are turned into the view's
//! error message. `CoreError` is what the form operations return so callers
//! can tell a validation rejection from a refused duplicate submission.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Field failed local validation
    ValidationError,
    /// A submission for this view is already in flight
    SubmissionInFlight,
    /// A store slice of the same type is already registered
    DuplicateSlice,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::SubmissionInFlight => write!(f, "SUBMISSION_IN_FLIGHT"),
            ErrorCode::DuplicateSlice => write!(f, "DUPLICATE_SLICE"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self { code, message, suggestions: vec![] }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for spendweb-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{message}")]
    Validation { message: String },

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Store slice already registered: {name}")]
    DuplicateSlice { name: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::SubmissionInFlight => ErrorCode::SubmissionInFlight,
            CoreError::DuplicateSlice { .. } => ErrorCode::DuplicateSlice,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Validation { .. } => ErrorSeverity::Info,
            CoreError::SubmissionInFlight => ErrorSeverity::Warning,
            CoreError::DuplicateSlice { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());
        match self {
            CoreError::SubmissionInFlight => details.with_suggestion(
                "Wait for the current submission to finish.".to_string()
            ),
            CoreError::DuplicateSlice { name } => details.with_suggestion(
                format!("Register '{}' once at startup.", name)
            ),
            _ => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// View the error happened in
    pub view_id: Option<String>,
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>) -> Self {
        Self { view_id: None, operation: operation.into() }
    }

    /// Add view ID
    pub fn with_view_id(mut self, view_id: impl Into<String>) -> Self {
        self.view_id = Some(view_id.into());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error according to its severity
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Info => log::Level::Debug,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        };
        log::log!(
            target: "spendweb::error",
            level,
            "{} - Operation: {} - View: {:?}",
            error.to_details(),
            context.operation,
            context.view_id
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "spendweb::error",
            "WARNING: {} - Operation: {} - View: {:?}",
            message,
            context.operation,
            context.view_id
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::SubmissionInFlight.to_string(), "SUBMISSION_IN_FLIGHT");
    }

    #[test]
    fn test_validation_error_displays_bare_message() {
        let error = CoreError::Validation { message: "Please select a category".to_string() };
        assert_eq!(error.to_string(), "Please select a category");
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_in_flight_details_have_suggestion() {
        let details = CoreError::SubmissionInFlight.to_details();
        assert_eq!(details.code, ErrorCode::SubmissionInFlight);
        assert_eq!(details.suggestions.len(), 1);
        assert!(details.to_string().starts_with("[SUBMISSION_IN_FLIGHT]"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("submit_category").with_view_id("abc");
        assert_eq!(context.operation, "submit_category");
        assert_eq!(context.view_id.as_deref(), Some("abc"));
    }
}
