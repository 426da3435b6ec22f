//! Running commands on a device under test.

use std::process::Output;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::timeout;

pub mod local;
pub mod ssh;

pub use local::LocalRunner;
pub use ssh::SshRunner;

use crate::error::CommandError;

/// Handle to a device under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dut {
    pub hostname: String,
    /// Address used for both SSH and SNMP
    pub mgmt_ip: String,
    #[serde(default)]
    pub ssh_user: Option<String>,
}

/// Captured result of a shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Runs a shell command on a DUT and returns its output.
///
/// Implementations fail with [`CommandError::NonZeroExit`] when the command
/// itself reports failure.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn shell(&self, dut: &Dut, command: &str) -> Result<CommandOutput, CommandError>;
}

/// Spawns `cmd`, waits at most `limit`, and maps the exit status.
pub(crate) async fn run_process(
    mut cmd: Command,
    command: &str,
    limit: Duration,
) -> Result<CommandOutput, CommandError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    cmd.kill_on_drop(true);

    let output: Output = match timeout(limit, cmd.output()).await {
        Ok(result) => result.map_err(|source| CommandError::Spawn { program, source })?,
        Err(_) => {
            return Err(CommandError::Timeout {
                command: command.to_string(),
                timeout: limit,
            });
        }
    };

    let result = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    };

    if !output.status.success() {
        return Err(CommandError::NonZeroExit {
            command: command.to_string(),
            code: result.exit_code,
            stderr: result.stderr.trim().to_string(),
        });
    }

    Ok(result)
}
