//! `ssh` invocation
//!
//! Assembles the argument vector for the external `ssh` client and runs
//! it, either blocking until exit or as a managed session with piped I/O.
//!
//! Host-key checking is disabled on purpose: fuzzing VMs are short-lived
//! and their host keys are regenerated on every provisioning.

use std::path::Path;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::info;

use super::keyfile::TempKeyFile;
use super::params::{SshParams, SSH_USER};
use super::session::SshSession;
use crate::error::{Result, SshError};

/// Assemble the full argument vector, `"ssh"` included.
///
/// Flag order is fixed so launch logs and tests stay deterministic:
/// user-host first, then the identity file, the two host-key safety
/// options, the forward spec, the port, verbosity, and the remote
/// command last.
///
/// # Arguments
/// * `params` - Connection parameters for the invocation
/// * `key_path` - Resolved identity file, whether caller-supplied or a
///   materialized temporary key
pub fn build_args(params: &SshParams, key_path: Option<&Path>) -> Vec<String> {
    let mut args = vec!["ssh".to_string(), format!("{SSH_USER}@{}", params.ip)];

    if let Some(key_path) = key_path {
        args.push("-i".to_string());
        args.push(key_path.display().to_string());
    }

    args.push("-o".to_string());
    args.push("UserKnownHostsFile=/dev/null".to_string());
    args.push("-o".to_string());
    args.push("StrictHostKeyChecking=no".to_string());

    if let Some(proxy) = &params.proxy {
        args.push("-L".to_string());
        args.push(proxy.clone());
    }

    if let Some(port) = params.port {
        args.push("-p".to_string());
        args.push(port.to_string());
    }

    if params.verbose {
        args.push("-v".to_string());
    }

    if let Some(command) = &params.command {
        args.push(command.clone());
    }

    args
}

/// Render key material to an owner-only temporary file when supplied.
///
/// Fails before touching the filesystem if both key sources are set.
fn materialize_key(params: &SshParams) -> Result<Option<TempKeyFile>> {
    params.validate()?;

    params
        .private_key
        .as_deref()
        .map(|content| TempKeyFile::materialize("id_rsa", content, true))
        .transpose()
}

fn resolved_args(params: &SshParams, key: Option<&TempKeyFile>) -> Vec<String> {
    let key_path = key
        .map(TempKeyFile::path)
        .or(params.private_key_path.as_deref());
    build_args(params, key_path)
}

/// Run `ssh` to completion with inherited stdio and return its exit
/// status.
///
/// A temporary key, if one was materialized, is removed before this
/// returns.
pub async fn call(params: &SshParams) -> Result<ExitStatus> {
    let key = materialize_key(params)?;
    let args = resolved_args(params, key.as_ref());

    info!("launching ssh: {}", args.join(" "));
    let status = Command::new(&args[0])
        .args(&args[1..])
        .status()
        .await
        .map_err(SshError::Spawn)?;

    Ok(status)
}

/// Spawn `ssh` as a managed session with piped stdin/stdout/stderr.
///
/// The returned session owns the child and the temporary key (if any);
/// dropping it kills the child and removes the key.
pub fn connect(params: &SshParams) -> Result<SshSession> {
    let key = materialize_key(params)?;
    let args = resolved_args(params, key.as_ref());

    info!("launching ssh: {}", args.join(" "));
    SshSession::spawn(&args, key)
}
