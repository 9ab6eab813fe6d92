//! Application error types

use crate::core::error_handling::ContextualError;
use crate::queue::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    #[error("{role} thread {index} panicked")]
    WorkerPanicked { role: &'static str, index: usize },

    #[error("Verification failed: {message}")]
    Verification { message: String },
}

impl AppError {
    pub(crate) fn verification(message: impl Into<String>) -> Self {
        AppError::Verification {
            message: message.into(),
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Verification { .. })
    }

    fn user_message(&self) -> Option<String> {
        if self.is_user_actionable() {
            Some(self.to_string())
        } else {
            None
        }
    }
}

/// Result type for application commands
pub type AppResult<T> = Result<T, AppError>;
