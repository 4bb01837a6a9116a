use thiserror::Error;

/// Unified error type for vertag operations
///
/// Push failures are classified at the git boundary into transport,
/// credential, and ref-refusal variants so callers can decide how to
/// report each case.
#[derive(Error, Debug)]
pub enum VertagError {
    #[error("Repository access failed: {0}")]
    RepositoryAccess(String),

    #[error("Tag '{0}' already exists")]
    TagAlreadyExists(String),

    #[error("Network error during push: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Remote rejected ref: {0}")]
    RemoteRejected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in vertag
pub type Result<T> = std::result::Result<T, VertagError>;

impl VertagError {
    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        VertagError::RepositoryAccess(msg.into())
    }

    /// Create a network error with context
    pub fn network(msg: impl Into<String>) -> Self {
        VertagError::Network(msg.into())
    }

    /// Create an authentication error with context
    pub fn auth(msg: impl Into<String>) -> Self {
        VertagError::Auth(msg.into())
    }

    /// Create a remote-rejection error with context
    pub fn remote_rejected(msg: impl Into<String>) -> Self {
        VertagError::RemoteRejected(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VertagError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VertagError::config("bad toml");
        assert_eq!(err.to_string(), "Configuration error: bad toml");
    }

    #[test]
    fn test_tag_already_exists_names_the_tag() {
        let err = VertagError::TagAlreadyExists("ver42".to_string());
        assert_eq!(err.to_string(), "Tag 'ver42' already exists");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VertagError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        let error_pairs = vec![
            (VertagError::repository("x"), "Repository access failed"),
            (VertagError::network("x"), "Network error during push"),
            (VertagError::auth("x"), "Authentication failed"),
            (VertagError::remote_rejected("x"), "Remote rejected ref"),
            (VertagError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
