//! Generic error handling utilities
//!
//! Lets startup report any application error the same way: messages a user
//! can act on are shown verbatim, everything else gets a generic line with
//! the detail pushed down to debug level.

/// Errors that can tell user-actionable failures from system failures
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// True for failures the user can fix (bad configuration, bad arguments)
    fn is_user_actionable(&self) -> bool;

    /// Message to show the user when the error is actionable
    fn user_message(&self) -> Option<String>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// # Examples
/// ```rust,no_run
/// # use handoff::core::error_handling::log_error_with_context;
/// # use handoff::app::AppError;
/// let err = AppError::Verification { message: "3 items lost".to_string() };
/// log_error_with_context(&err, "Stress run");
/// // Logs: "FATAL: Stress run failed verification: 3 items lost"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => {
            log::error!("FATAL: {}", user_msg);
        }
        _ => {
            log::error!("FATAL: {}", operation_context);
        }
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
