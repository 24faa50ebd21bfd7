//! Error types for taskdesk
//!
//! Domain-specific error enums using thiserror. Transport failures are split
//! into "never reached the backend" and "backend said no"; client-side form
//! checks have their own enum and are never sent anywhere.

use std::path::PathBuf;

/// Failure of a single backend round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never reached the backend (connect, TLS, timeout).
    #[error("network: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// A 2xx body that does not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 4xx other than 401: the backend rejected what we sent.
    pub fn is_rejection(&self) -> bool {
        matches!(self.status(), Some(s) if (400..500).contains(&s) && s != 401)
    }
}

/// Client-side form constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username must be at least {min} characters long")]
    UsernameTooShort { min: usize },
    #[error("Username must be at most {max} characters long")]
    UsernameTooLong { max: usize },
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("No changes to save")]
    NoChanges,
    #[error("Title is required")]
    EmptyTitle,
    /// The backend refused a well-formed request (e.g. username taken).
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Error slot of the resource stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read token file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write token file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove token file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{key} must be an http(s) or ws(s) URL, got {value:?}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("no home directory; pass --token-file and --config explicitly")]
    NoHomeDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_detected_by_status() {
        let err = ApiError::Api {
            status: 401,
            message: "Could not validate credentials".into(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_rejection());
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn rejection_covers_client_errors_only() {
        let bad = ApiError::Api { status: 400, message: "taken".into() };
        let server = ApiError::Api { status: 500, message: "boom".into() };
        assert!(bad.is_rejection());
        assert!(!server.is_rejection());
    }

    #[test]
    fn api_error_displays_backend_message() {
        let err = ApiError::Api { status: 404, message: "Task not found".into() };
        assert_eq!(err.to_string(), "Task not found");
    }

    #[test]
    fn validation_messages_name_the_limit() {
        assert_eq!(
            ValidationError::PasswordTooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters long"
        );
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
    }

    #[test]
    fn storage_error_preserves_io_error_kind() {
        let error = StorageError::Write {
            path: PathBuf::from("/test/token"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = error.to_string();
        assert!(display.contains("/test/token"));

        let source_err = std::error::Error::source(&error).unwrap();
        let io_err = source_err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io_err.kind(), std::io::ErrorKind::PermissionDenied);
    }
}
