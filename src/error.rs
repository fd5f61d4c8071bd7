//! Error types for the SSH session helper

use std::path::Path;

use thiserror::Error;

/// Main error type for SSH invocation and temporary key handling
#[derive(Debug, Error)]
pub enum SshError {
    /// Key material and a key file path were both supplied
    #[error("private_key and private_key_path are mutually exclusive")]
    ConflictingKeys,

    /// Temporary key directory could not be created
    #[error("failed to create temporary key directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// Key material could not be written to the temporary file
    #[error("failed to write key file {path}: {source}")]
    KeyWrite {
        path: String,
        source: std::io::Error,
    },

    /// Key file permissions could not be restricted to the owner
    #[error("failed to restrict permissions on {path}: {source}")]
    KeyPermissions {
        path: String,
        source: std::io::Error,
    },

    /// The `ssh` client could not be spawned
    #[error("failed to launch ssh: {0}")]
    Spawn(#[source] std::io::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using SshError
pub type Result<T> = std::result::Result<T, SshError>;

impl SshError {
    /// Create a key-write error for `path`
    pub(crate) fn key_write(path: &Path, source: std::io::Error) -> Self {
        SshError::KeyWrite {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a permission-change error for `path`
    pub(crate) fn key_permissions(path: &Path, source: std::io::Error) -> Self {
        SshError::KeyPermissions {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SshError::ConflictingKeys;
        assert_eq!(
            err.to_string(),
            "private_key and private_key_path are mutually exclusive"
        );

        let err = SshError::key_write(
            Path::new("/tmp/keydir/id_rsa"),
            std::io::Error::other("disk full"),
        );
        assert_eq!(
            err.to_string(),
            "failed to write key file /tmp/keydir/id_rsa: disk full"
        );
    }
}
