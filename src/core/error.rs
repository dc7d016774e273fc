use thiserror::Error;

/// Centralized error types for the application
///
/// Errors that escape a single pipeline stage end up here. Stage failures that
/// the admin should see as a diagnostic are modelled separately in
/// [`crate::telegram::handlers::PipelineError`].
///
/// # Example
///
/// ```no_run
/// use lulurelay::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
