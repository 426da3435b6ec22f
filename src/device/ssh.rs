use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use super::{CommandOutput, CommandRunner, Dut, run_process};
use crate::config::SshSettings;
use crate::error::CommandError;

/// Runs commands on a DUT through the system `ssh` client.
///
/// Authentication is left to the client (agent, keys, ssh_config); the
/// session runs in batch mode so a missing key fails instead of prompting.
#[derive(Debug, Clone)]
pub struct SshRunner {
    settings: SshSettings,
}

impl SshRunner {
    pub fn new(settings: SshSettings) -> Self {
        Self { settings }
    }

    fn build(&self, dut: &Dut, command: &str) -> Command {
        let user = dut
            .ssh_user
            .as_deref()
            .unwrap_or(&self.settings.default_user);

        let mut cmd = Command::new(&self.settings.binary);
        cmd.arg("-p")
            .arg(self.settings.port.to_string())
            .arg("-o")
            .arg("BatchMode=yes")
            .arg("-o")
            .arg(format!("ConnectTimeout={}", self.settings.connect_timeout));
        for option in &self.settings.options {
            cmd.arg("-o").arg(option);
        }
        cmd.arg(format!("{}@{}", user, dut.mgmt_ip)).arg(command);
        cmd
    }
}

impl CommandRunner for SshRunner {
    async fn shell(&self, dut: &Dut, command: &str) -> Result<CommandOutput, CommandError> {
        debug!(dut = %dut.hostname, host = %dut.mgmt_ip, %command, "running remote command");

        let cmd = self.build(dut, command);
        run_process(cmd, command, Duration::from_secs(self.settings.command_timeout)).await
    }
}
