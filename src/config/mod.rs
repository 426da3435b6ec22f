use anyhow::{Context, Result};
use std::env;
use std::path::Path;

pub mod settings;
pub mod testbed;

pub use settings::{Settings, SnmpSettings, SshSettings};
pub use testbed::{DutCredentials, Testbed};

/// Testbed file used when none is given on the command line.
pub const DEFAULT_TESTBED_PATH: &str = "./testbeds/testbed.yaml";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub testbed: Testbed,
    /// Effective settings: testbed values with environment overrides applied
    pub settings: Settings,
}

impl AppConfig {
    /// Loads the testbed file and applies `SNMP_*` environment overrides.
    pub fn load(testbed_path: impl AsRef<Path>) -> Result<Self> {
        let path = testbed_path.as_ref();
        let path = path
            .to_str()
            .with_context(|| format!("Testbed path is not valid UTF-8: {}", path.display()))?;
        let testbed = Testbed::load(path)?;

        Self::from_testbed(testbed, |key| env::var(key).ok())
    }

    /// Builds the configuration with `lookup` standing in for the environment.
    pub fn from_testbed(testbed: Testbed, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = testbed.settings.clone();

        if let Some(timeout) = lookup("SNMP_TIMEOUT") {
            settings.snmp.timeout = timeout
                .parse()
                .with_context(|| format!("SNMP_TIMEOUT is not a number of seconds: {}", timeout))?;
        }
        if let Some(port) = lookup("SNMP_PORT") {
            settings.snmp.port = port
                .parse()
                .with_context(|| format!("SNMP_PORT is not a valid port: {}", port))?;
        }

        Ok(Self { testbed, settings })
    }

    /// Read-only community for a DUT, `SNMP_COMMUNITY` taking precedence.
    pub fn community_for(&self, hostname: &str) -> Result<String> {
        self.community_with(hostname, |key| env::var(key).ok())
    }

    fn community_with(&self, hostname: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(community) = lookup("SNMP_COMMUNITY") {
            return Ok(community);
        }
        Ok(self.testbed.credentials_for(hostname)?.snmp_rocommunity.clone())
    }
}
