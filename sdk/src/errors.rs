//! Error types and handling
//!
//! This module provides the error types shared by the add-on engine and its
//! callers. All errors implement the `AddonErrorExt` trait which provides
//! user-friendly hints and indicates whether errors are recoverable.
//!
//! # Security
//!
//! Hints never echo the wrapped detail string, so descriptor contents and
//! filesystem paths stay out of user-facing output.

use thiserror::Error;

/// Trait for add-on error extensions
///
/// This trait provides additional context for errors, including user-friendly
/// hints and recoverability information. All engine errors implement this trait.
pub trait AddonErrorExt {
    /// Returns a user-friendly hint for the error
    fn user_hint(&self) -> &str;

    /// Returns whether the error is recoverable
    ///
    /// Recoverable errors can be retried or worked around (for example by
    /// installing the add-on first). Non-recoverable errors require fixing the
    /// input or the configuration.
    fn is_recoverable(&self) -> bool;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Configuration**: Invalid or missing configuration
/// - **Descriptor**: Malformed add-on descriptor input
/// - **Policy**: Lifecycle operations against add-ons that are not installed
///
/// # Examples
///
/// ```
/// use sdk::errors::{AddonErrorExt, EngineError};
///
/// let error = EngineError::AddonNotSupported("local_ssh".to_string());
/// println!("Hint: {}", error.user_hint());
/// assert!(error.is_recoverable());
///
/// let fatal_error = EngineError::Descriptor("unknown role".to_string());
/// assert!(!fatal_error.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Descriptor errors
    #[error("Invalid add-on descriptor: {0}")]
    Descriptor(String),

    // Policy errors
    #[error("Add-on {0} is not installed")]
    AddonNotSupported(String),
}

impl AddonErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Config(_) => "Check your config.toml file for errors",
            Self::Descriptor(_) => "Add-on descriptor is malformed. Check its enumerated fields",
            Self::AddonNotSupported(_) => "Install the add-on before running this operation",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_) | Self::Descriptor(_) => false,
            Self::AddonNotSupported(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_supported_message_names_slug() {
        let err = EngineError::AddonNotSupported("samba".to_string());
        assert_eq!(err.to_string(), "Add-on samba is not installed");
    }

    #[test]
    fn test_hint_does_not_leak_detail() {
        let err = EngineError::Descriptor("/secret/path/addon.json".to_string());
        assert!(!err.user_hint().contains("/secret/path"));
    }

    #[test]
    fn test_recoverability() {
        assert!(EngineError::AddonNotSupported("ssh".to_string()).is_recoverable());
        assert!(!EngineError::Config("bad".to_string()).is_recoverable());
    }
}
