use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error types.
///
/// This enum represents the errors that can occur while importing files into
/// a CKAN portal. Per-file API rejections are *not* errors: they are reported
/// as [`PublishOutcome::Failure`](crate::publish::PublishOutcome) values.
/// `AppError` covers validation problems detected before any remote call and
/// transport-level failures raised by a [`CkanApi`](crate::traits::CkanApi)
/// implementation.
///
/// # Error Conversion
///
/// `std::io::Error` converts automatically into `AppError::Io` via `#[from]`.
///
/// # Examples
///
/// ```no_run
/// use ckan_import_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::Generic("Something went wrong".to_string()))
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client request failed.
    ///
    /// This error occurs when a request cannot be built or its response
    /// cannot be read.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// URL parsing failed.
    ///
    /// This error occurs when the CKAN base URL is malformed or an action
    /// endpoint cannot be joined onto it.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network or connection error.
    ///
    /// This error occurs when a network request fails due to connectivity issues,
    /// DNS resolution failures, or the remote server being unreachable.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Local I/O failed, typically while reading a resource file for upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset directory passed on the command line does not exist or is
    /// not a directory.
    #[error("invalid dataset directory path (got {})", .0.display())]
    InvalidDirectory(PathBuf),

    /// The visibility flag is not one of the accepted literals.
    #[error("private must be True or False (got {0})")]
    InvalidVisibility(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic application error for cases not covered by specific variants.
    ///
    /// Use this sparingly - prefer creating specific error variants
    /// for better error handling and debugging.
    #[error("Error: {0}")]
    Generic(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidUrl(url) => {
                format!(
                    "Invalid CKAN base URL: {}\n   Example: http://myckan.site/",
                    url
                )
            }
            AppError::NetworkError(msg) => {
                format!("Network error: {}\n   Check your internet connection.", msg)
            }
            AppError::Timeout(secs) => {
                format!("Request timed out after {} seconds.\n   Try again later.", secs)
            }
            AppError::InvalidDirectory(path) => format!(
                "ERROR: invalid dataset directory path (got {})",
                path.display()
            ),
            AppError::InvalidVisibility(value) => {
                format!("ERROR: private must be True or False (got {})", value)
            }
            _ => self.to_string(),
        }
    }
}
