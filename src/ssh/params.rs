//! SSH connection parameters
//!
//! Builder-style parameters for a single `ssh` invocation against a
//! provisioned VM.

use std::path::PathBuf;

use crate::error::{Result, SshError};

/// The account provisioned on every fuzzing VM
pub const SSH_USER: &str = "onefuzz";

/// Parameters for one `ssh` invocation
#[derive(Debug, Clone, Default)]
pub struct SshParams {
    /// Target hostname or IP address
    pub ip: String,

    /// SSH port (`-p`); ssh's own default applies when unset
    pub port: Option<u16>,

    /// Local port-forward spec passed to `-L`, e.g. `8080:localhost:80`
    pub proxy: Option<String>,

    /// Private key material (not a path). Rendered to a temporary
    /// owner-only file for the duration of the invocation.
    pub private_key: Option<String>,

    /// Path to an existing private key file
    pub private_key_path: Option<PathBuf>,

    /// Remote command; an interactive shell when unset
    pub command: Option<String>,

    /// Append `-v` to mirror connection diagnostics into the logs
    pub verbose: bool,
}

impl SshParams {
    /// Create parameters for the given target address
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the local port-forward spec
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set private key material (key content, not a path)
    pub fn with_private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Set the path to an existing private key file
    pub fn with_private_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.private_key_path = Some(path.into());
        self
    }

    /// Set the remote command to run instead of an interactive shell
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set whether `-v` is appended to the invocation
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject conflicting key sources.
    ///
    /// Called before any side effect of an invocation; supplying both
    /// key material and a key path is a caller usage error.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.private_key.is_some() && self.private_key_path.is_some() {
            return Err(SshError::ConflictingKeys);
        }
        Ok(())
    }
}
