//! Unified error types for amdctl
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use crate::sysfs::DevInfoType;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Status returned for an attribute/operation pair with no handler
pub const STATUS_UNSUPPORTED: i32 = -1;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a device attribute access
    #[error("Device attribute error: {0}")]
    DevInfo(#[from] DevInfoError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Device directory does not exist
    #[error("GPU device not found at {0}")]
    DeviceNotFound(PathBuf),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from reading or writing a device attribute file
#[derive(Error, Debug)]
pub enum DevInfoError {
    /// Resolved path exists but is not a plain file, or could not be stat'ed
    #[error("Not a regular file: {}", path.display())]
    NotARegularFile { path: PathBuf },

    /// Opening the attribute file failed
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing an already opened attribute file failed
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The attribute has no handler for this kind of access
    #[error("Operation '{op}' not supported for attribute {attr:?}")]
    Unsupported { attr: DevInfoType, op: &'static str },

    /// The attribute has no file name; callers must never ask for its path
    #[error("Attribute {0:?} has no sysfs file")]
    MissingTableEntry(DevInfoType),

    /// Value cannot be represented in the attribute's on-disk format
    #[error("Invalid value for attribute {attr:?}: {value}")]
    InvalidValue { attr: DevInfoType, value: String },

    /// File content could not be parsed as the requested type
    #[error("Cannot parse '{content}' from attribute {attr:?}")]
    Parse { attr: DevInfoType, content: String },

    /// Binary attribute was shorter than the requested block
    #[error("Short read on {}: expected {expected} bytes", path.display())]
    ShortRead { path: PathBuf, expected: usize },
}

impl DevInfoError {
    /// Integer status code for this failure
    ///
    /// Zero is never returned; success has no error value. OS failures carry
    /// their errno, a missing regular file reports `EISDIR` and an unwired
    /// attribute/operation pair reports [`STATUS_UNSUPPORTED`].
    pub fn status(&self) -> i32 {
        match self {
            Self::NotARegularFile { .. } => libc::EISDIR,
            Self::Open { source, .. } | Self::Io { source, .. } => {
                source.raw_os_error().unwrap_or(libc::EIO)
            }
            Self::Unsupported { .. } => STATUS_UNSUPPORTED,
            Self::MissingTableEntry(_) | Self::InvalidValue { .. } => libc::EINVAL,
            Self::Parse { .. } => libc::EINVAL,
            Self::ShortRead { .. } => libc::ENOENT,
        }
    }

    /// Whether the failure means the driver does not expose the attribute
    ///
    /// Callers typically treat this as "feature absent" rather than an error.
    pub fn is_not_exposed(&self) -> bool {
        match self {
            Self::NotARegularFile { .. } | Self::Unsupported { .. } => true,
            Self::Open { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Over-drive percentage outside 0-20
    #[error("Invalid over-drive level: {0}% (must be 0-20)")]
    InvalidOverDriveLevel(u32),

    /// Clock level selection is empty or references a missing level
    #[error("Invalid clock level selection: {0}")]
    InvalidClockLevel(String),

    /// Power profile index not present in the table
    #[error("Invalid power profile index: {0}")]
    InvalidPowerProfile(u32),

    /// Unrecognized performance level token
    #[error("Unknown performance level: {0}")]
    UnknownPerformanceLevel(String),

    /// A table line could not be parsed
    #[error("Malformed table line: '{0}'")]
    MalformedLine(String),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Attribute access failed
    #[error("Attribute access failed: {0}")]
    DevInfo(#[from] DevInfoError),

    /// Domain validation failed
    #[error("Validation failed: {0}")]
    Domain(#[from] DomainError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::DevInfo(e) => AppError::DevInfo(e),
            ServiceError::Domain(e) => AppError::Domain(e),
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::InvalidOverDriveLevel(25);
        assert_eq!(
            err.to_string(),
            "Invalid over-drive level: 25% (must be 0-20)"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: AppError = io::Error::from(io::ErrorKind::BrokenPipe).into();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_status_codes() {
        let err = DevInfoError::NotARegularFile {
            path: PathBuf::from("/sys/class/drm/card0/device"),
        };
        assert_eq!(err.status(), libc::EISDIR);

        let err = DevInfoError::Unsupported {
            attr: DevInfoType::DevId,
            op: "write_u64",
        };
        assert_eq!(err.status(), STATUS_UNSUPPORTED);

        let err = DevInfoError::Open {
            path: PathBuf::from("x"),
            source: io::Error::from_raw_os_error(libc::EACCES),
        };
        assert_eq!(err.status(), libc::EACCES);
    }

    #[test]
    fn test_not_exposed() {
        let err = DevInfoError::NotARegularFile {
            path: PathBuf::from("x"),
        };
        assert!(err.is_not_exposed());

        let err = DevInfoError::Parse {
            attr: DevInfoType::Usage,
            content: "abc".to_string(),
        };
        assert!(!err.is_not_exposed());
    }

    #[test]
    fn test_error_conversion() {
        let domain_err = DomainError::InvalidOverDriveLevel(30);
        let app_err: AppError = domain_err.into();
        assert!(matches!(app_err, AppError::Domain(_)));

        let service_err = ServiceError::DevInfo(DevInfoError::MissingTableEntry(
            DevInfoType::GpuReset,
        ));
        let app_err: AppError = service_err.into();
        assert!(matches!(app_err, AppError::DevInfo(_)));
    }
}
