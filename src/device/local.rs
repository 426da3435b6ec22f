use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use super::{CommandOutput, CommandRunner, Dut, run_process};
use crate::error::CommandError;

/// Runs commands through `sh -c` on this host, for when the check runs on
/// the DUT itself.
#[derive(Debug, Clone)]
pub struct LocalRunner {
    timeout: Duration,
}

impl LocalRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for LocalRunner {
    async fn shell(&self, dut: &Dut, command: &str) -> Result<CommandOutput, CommandError> {
        debug!(dut = %dut.hostname, %command, "running local command");

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        run_process(cmd, command, self.timeout).await
    }
}
