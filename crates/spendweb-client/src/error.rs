//! Error types for spendweb-client

use thiserror::Error;

/// Failure to obtain an envelope from the expense API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to initialize HTTP client: {message}")]
    Build { message: String },

    #[error("{message}")]
    Network { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Unexpected response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },
}

impl ClientError {
    /// Text suitable for showing inline next to a form.
    ///
    /// `None` when the error carries nothing a user could act on.
    pub fn user_message(&self) -> Option<String> {
        let message = self.to_string();
        if message.trim().is_empty() {
            None
        } else {
            Some(message)
        }
    }

    /// True when no response was received at all
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network { .. } | ClientError::Timeout { .. })
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
