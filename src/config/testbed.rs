use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::Settings;
use crate::device::Dut;

/// Per-DUT secrets, keyed by hostname in the testbed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutCredentials {
    pub snmp_rocommunity: String,
}

/// The device collection and its credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testbed {
    pub name: String,
    /// Deployment topology, e.g. "t0"
    #[serde(default)]
    pub topology: Option<String>,
    pub duts: Vec<Dut>,
    #[serde(default)]
    pub credentials: HashMap<String, DutCredentials>,
    #[serde(default)]
    pub settings: Settings,
}

impl Testbed {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read testbed file: {}", path))?;

        Self::from_yaml_str(&content).with_context(|| format!("Invalid testbed file: {}", path))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let testbed: Testbed = serde_yml::from_str(content).context("Failed to parse YAML")?;

        if testbed.duts.is_empty() {
            anyhow::bail!("Testbed '{}' has no DUTs", testbed.name);
        }

        let mut seen = HashSet::new();
        for dut in &testbed.duts {
            if !seen.insert(dut.hostname.as_str()) {
                anyhow::bail!("Testbed '{}' lists DUT '{}' twice", testbed.name, dut.hostname);
            }
        }

        Ok(testbed)
    }

    pub fn dut(&self, hostname: &str) -> Option<&Dut> {
        self.duts.iter().find(|d| d.hostname == hostname)
    }

    /// Picks the named DUT, or a random one when no name is given.
    pub fn select_dut(&self, hostname: Option<&str>) -> Result<&Dut> {
        match hostname {
            Some(name) => self
                .dut(name)
                .with_context(|| format!("DUT '{}' is not part of testbed '{}'", name, self.name)),
            None => self
                .duts
                .choose(&mut rand::thread_rng())
                .with_context(|| format!("Testbed '{}' has no DUTs", self.name)),
        }
    }

    pub fn credentials_for(&self, hostname: &str) -> Result<&DutCredentials> {
        self.credentials
            .get(hostname)
            .with_context(|| format!("No credentials for DUT '{}'", hostname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snmp::SnmpVersion;

    const TESTBED: &str = r#"
name: vms-t0
topology: t0
duts:
  - hostname: vlab-01
    mgmt_ip: 10.250.0.101
    ssh_user: admin
  - hostname: vlab-02
    mgmt_ip: 10.250.0.102
credentials:
  vlab-01:
    snmp_rocommunity: public
settings:
  snmp:
    timeout: 3
"#;

    #[test]
    fn loads_duts_credentials_and_partial_settings() {
        let tb = Testbed::from_yaml_str(TESTBED).unwrap();
        assert_eq!(tb.name, "vms-t0");
        assert_eq!(tb.topology.as_deref(), Some("t0"));
        assert_eq!(tb.duts.len(), 2);
        assert_eq!(tb.dut("vlab-02").unwrap().ssh_user, None);
        assert_eq!(tb.credentials_for("vlab-01").unwrap().snmp_rocommunity, "public");
        assert!(tb.credentials_for("vlab-02").is_err());

        assert_eq!(tb.settings.snmp.timeout, 3);
        assert_eq!(tb.settings.snmp.port, 161);
        assert_eq!(tb.settings.snmp.version, SnmpVersion::V2c);
        assert_eq!(tb.settings.ssh.binary, "ssh");
    }

    #[test]
    fn selects_named_or_random_dut() {
        let tb = Testbed::from_yaml_str(TESTBED).unwrap();
        assert_eq!(tb.select_dut(Some("vlab-02")).unwrap().mgmt_ip, "10.250.0.102");
        assert!(tb.select_dut(Some("vlab-99")).is_err());

        let picked = tb.select_dut(None).unwrap();
        assert!(tb.dut(&picked.hostname).is_some());
    }

    #[test]
    fn rejects_empty_and_duplicate_inventories() {
        assert!(Testbed::from_yaml_str("name: x\nduts: []\n").is_err());

        let dup = "name: x\nduts:\n  - {hostname: a, mgmt_ip: 1.1.1.1}\n  - {hostname: a, mgmt_ip: 1.1.1.2}\n";
        let err = Testbed::from_yaml_str(dup).unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn rejects_unknown_snmp_version() {
        let bad = "name: x\nduts:\n  - {hostname: a, mgmt_ip: 1.1.1.1}\nsettings:\n  snmp:\n    version: \"3\"\n";
        assert!(Testbed::from_yaml_str(bad).is_err());
    }
}
