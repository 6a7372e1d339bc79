//! Error types for toolreq operations.
//!
//! This module defines [`ToolreqError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ToolreqError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ToolreqError::Other`) for unexpected errors
//! - Both domain errors are deterministic functions of their input; nothing
//!   is transient, so nothing is retried
//! - All errors should name the tool or the offending string so callers can
//!   fail a build with a clear message

use thiserror::Error;

/// Core error type for toolreq operations.
#[derive(Debug, Error)]
pub enum ToolreqError {
    /// No requirement is declared for the requested tool name.
    ///
    /// Never silently defaulted: the caller decides whether an undeclared
    /// tool means "unconstrained" or "unsupported".
    #[error("No version requirement declared for tool '{name}'")]
    ToolNotFound { name: String },

    /// A version string matches none of the accepted shapes.
    #[error("Malformed version string: '{version}'")]
    MalformedVersion { version: String },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolreq operations.
pub type Result<T> = std::result::Result<T, ToolreqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_displays_name() {
        let err = ToolreqError::ToolNotFound {
            name: "verilator".into(),
        };
        assert!(err.to_string().contains("verilator"));
    }

    #[test]
    fn malformed_version_displays_offending_string() {
        let err = ToolreqError::MalformedVersion {
            version: "not-a-version!!".into(),
        };
        assert!(err.to_string().contains("not-a-version!!"));
    }

    #[test]
    fn other_wraps_anyhow() {
        let err: ToolreqError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, ToolreqError::Other(_)));
        assert!(err.to_string().contains("unexpected"));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ToolreqError::ToolNotFound {
                name: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
