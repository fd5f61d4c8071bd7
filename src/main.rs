//! onefuzz-ssh - Entry point
//!
//! Parses connection parameters, initializes logging, and runs a
//! blocking `ssh` invocation against the target VM, exiting with the
//! child's exit code.

use clap::Parser;
use tracing::{enabled, info, Level};
use tracing_subscriber::EnvFilter;

use onefuzz_ssh::config::Args;
use onefuzz_ssh::error::Result;
use onefuzz_ssh::ssh;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the terminal session owns stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // With debug logging active, ssh -v mirrors connection diagnostics
    // into our own logs.
    let params = args.into_params(enabled!(Level::DEBUG));

    info!("connecting to {}@{}", ssh::SSH_USER, params.ip);

    let status = ssh::call(&params).await?;
    std::process::exit(status.code().unwrap_or(1));
}
