//! Managed SSH session
//!
//! Owns the spawned `ssh` child process and, when key material was
//! rendered to disk, the temporary key file. The child is killed when
//! the session is dropped, whether or not the caller stopped it first.

use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::debug;

use super::keyfile::TempKeyFile;
use crate::error::{Result, SshError};

/// A running `ssh` child with piped stdin/stdout/stderr
pub struct SshSession {
    child: Child,
    // Keeps the key on disk for the lifetime of the connection attempt;
    // removed together with the session.
    key: Option<TempKeyFile>,
}

impl SshSession {
    /// Spawn `args` with all three stdio streams piped.
    ///
    /// The child is registered for kill-on-drop, so scope exit
    /// terminates it even if [`kill`](Self::kill) is never called.
    pub(crate) fn spawn(args: &[String], key: Option<TempKeyFile>) -> Result<Self> {
        let child = Command::new(&args[0])
            .args(&args[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(SshError::Spawn)?;

        Ok(Self { child, key })
    }

    /// OS process id, if the child has not been reaped yet
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Take the child's stdin pipe. Returns `None` on repeated calls.
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    /// Take the child's stdout pipe. Returns `None` on repeated calls.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Take the child's stderr pipe. Returns `None` on repeated calls.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Wait for the child to exit
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        Ok(self.child.wait().await?)
    }

    /// Exit status if the child has already exited
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Kill the child and reap it.
    ///
    /// Best-effort and idempotent: a child that already exited is not
    /// an error, and calling this twice is safe.
    pub async fn kill(&mut self) {
        if let Err(err) = self.child.start_kill() {
            debug!("ssh child already gone: {err}");
        }

        match self.child.wait().await {
            Ok(status) => debug!("ssh child exited: {status}"),
            Err(err) => debug!("failed to reap ssh child: {err}"),
        }
    }
}

impl std::fmt::Debug for SshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshSession")
            .field("pid", &self.child.id())
            .field("has_temp_key", &self.key.is_some())
            .finish()
    }
}
