//! CLI argument parsing
//!
//! Maps command-line arguments (with `ONEFUZZ_SSH_*` environment
//! fallbacks) onto [`SshParams`].

use clap::Parser;
use std::path::PathBuf;

use crate::ssh::SshParams;

/// Connect to a provisioned fuzzing VM over SSH
#[derive(Parser, Debug, Clone)]
#[command(name = "onefuzz-ssh")]
#[command(version)]
#[command(about = "Connect to a provisioned fuzzing VM over SSH")]
pub struct Args {
    /// Hostname or IP address of the VM
    pub ip: String,

    /// SSH port on the VM
    #[arg(long, env = "ONEFUZZ_SSH_PORT")]
    pub port: Option<u16>,

    /// Local port-forward spec, e.g. 8080:localhost:80
    #[arg(long, env = "ONEFUZZ_SSH_PROXY")]
    pub proxy: Option<String>,

    /// Path to the private key for the VM
    #[arg(long, env = "ONEFUZZ_SSH_KEY")]
    pub key: Option<PathBuf>,

    /// Command to run on the VM instead of an interactive shell
    pub command: Option<String>,
}

impl Args {
    /// Build invocation parameters.
    ///
    /// `verbose` is decided by the caller from its effective log level.
    pub fn into_params(self, verbose: bool) -> SshParams {
        let mut params = SshParams::new(self.ip).with_verbose(verbose);

        if let Some(port) = self.port {
            params = params.with_port(port);
        }
        if let Some(proxy) = self.proxy {
            params = params.with_proxy(proxy);
        }
        if let Some(key) = self.key {
            params = params.with_private_key_path(key);
        }
        if let Some(command) = self.command {
            params = params.with_command(command);
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_args_minimal() {
        let args = Args::try_parse_from(["onefuzz-ssh", "10.0.0.5"]).unwrap();
        let params = args.into_params(false);

        assert_eq!(params.ip, "10.0.0.5");
        assert!(params.port.is_none());
        assert!(params.proxy.is_none());
        assert!(params.private_key.is_none());
        assert!(params.private_key_path.is_none());
        assert!(params.command.is_none());
        assert!(!params.verbose);
    }

    #[test]
    fn test_args_full() {
        let args = Args::try_parse_from([
            "onefuzz-ssh",
            "10.0.0.5",
            "--port",
            "2222",
            "--proxy",
            "8080:localhost:80",
            "--key",
            "/tmp/id_rsa",
            "uname -a",
        ])
        .unwrap();
        let params = args.into_params(true);

        assert_eq!(params.ip, "10.0.0.5");
        assert_eq!(params.port, Some(2222));
        assert_eq!(params.proxy.as_deref(), Some("8080:localhost:80"));
        assert_eq!(params.private_key_path.as_deref(), Some(Path::new("/tmp/id_rsa")));
        assert_eq!(params.command.as_deref(), Some("uname -a"));
        assert!(params.verbose);
    }

    #[test]
    fn test_missing_ip_is_rejected() {
        assert!(Args::try_parse_from(["onefuzz-ssh"]).is_err());
    }
}
