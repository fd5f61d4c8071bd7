//! Temporary private key materialization
//!
//! Renders secret key material to a file inside a fresh uniquely-named
//! temporary directory, and removes the whole directory again when the
//! value is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Result, SshError};

/// A secret written to `<tmpdir>/<filename>`, removed on drop.
///
/// The directory and the key inside it are deleted however the owning
/// scope ends: normal return, `?` propagation, or unwinding.
pub struct TempKeyFile {
    path: PathBuf,
    // Held for its Drop impl, which removes the directory recursively.
    dir: TempDir,
}

impl TempKeyFile {
    /// Write `content` to a fresh temporary file named `filename`.
    ///
    /// With `owner_only`, the file is restricted to mode `0o600` on
    /// platforms with POSIX permission bits; on Windows the restriction
    /// is skipped and the directory location stands in for it.
    ///
    /// Directory creation, write, and permission-change failures all
    /// propagate before the value is returned.
    pub fn materialize(filename: &str, content: &str, owner_only: bool) -> Result<Self> {
        let dir = match local_tmp() {
            Some(parent) => TempDir::new_in(parent),
            None => TempDir::new(),
        }
        .map_err(SshError::TempDir)?;

        let path = dir.path().join(filename);
        debug!("creating file {}", path.display());
        fs::write(&path, content).map_err(|source| SshError::key_write(&path, source))?;

        if owner_only {
            set_owner_only(&path)?;
        }

        Ok(Self { path, dir })
    }

    /// Path of the materialized key file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        debug!("cleaning up file {}", self.path.display());
    }
}

impl std::fmt::Debug for TempKeyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TempKeyFile")
            .field("path", &self.path)
            .field("dir", &self.dir.path())
            .finish()
    }
}

#[cfg(unix)]
fn set_owner_only(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|source| SshError::key_permissions(path, source))
}

#[cfg(not(unix))]
fn set_owner_only(_path: &Path) -> Result<()> {
    Ok(())
}

/// Prefer `%LOCALAPPDATA%\temp` on Windows; the default temp directory
/// there frequently carries ACLs too permissive for SSH keys.
fn local_tmp() -> Option<PathBuf> {
    if !cfg!(windows) {
        return None;
    }

    let local_app_data = std::env::var_os("LOCALAPPDATA")?;
    let dir = PathBuf::from(local_app_data).join("temp");
    dir.is_dir().then_some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_writes_content() {
        let key = TempKeyFile::materialize("id_rsa", "SECRET", false).unwrap();

        assert_eq!(key.path().file_name().unwrap(), "id_rsa");
        assert_eq!(fs::read_to_string(key.path()).unwrap(), "SECRET");
    }

    #[test]
    fn test_removed_on_drop() {
        let path = {
            let key = TempKeyFile::materialize("id_rsa", "SECRET", true).unwrap();
            assert!(key.path().exists());
            key.path().to_path_buf()
        };

        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let key = TempKeyFile::materialize("id_rsa", "SECRET", true).unwrap();
        let mode = fs::metadata(key.path()).unwrap().permissions().mode();

        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_each_materialization_gets_its_own_directory() {
        let a = TempKeyFile::materialize("id_rsa", "A", false).unwrap();
        let b = TempKeyFile::materialize("id_rsa", "B", false).unwrap();

        assert_ne!(a.path(), b.path());
        assert_eq!(fs::read_to_string(a.path()).unwrap(), "A");
        assert_eq!(fs::read_to_string(b.path()).unwrap(), "B");
    }
}
