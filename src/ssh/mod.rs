//! SSH sessions against provisioned VMs
//!
//! This module provides argument assembly, temporary key
//! materialization, and subprocess lifecycle for sessions driven
//! through the external `ssh` client.

pub mod command;
pub mod keyfile;
pub mod params;
pub mod session;

// Re-exports
pub use command::{build_args, call, connect};
pub use keyfile::TempKeyFile;
pub use params::{SshParams, SSH_USER};
pub use session::SshSession;
