use serde::{Deserialize, Serialize};

use crate::snmp::SnmpVersion;

/// Transport defaults. Every section may be omitted from the testbed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snmp: SnmpSettings,
    pub ssh: SshSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpSettings {
    /// UDP port of the DUT's agent
    pub port: u16,
    pub version: SnmpVersion,
    /// Upper bound for a whole walk (seconds)
    pub timeout: u64,
    /// GETBULK max-repetitions
    pub max_repetitions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshSettings {
    /// ssh client executable
    pub binary: String,
    pub port: u16,
    /// Used when a DUT entry carries no `ssh_user`
    pub default_user: String,
    /// ConnectTimeout handed to the client (seconds)
    pub connect_timeout: u64,
    /// Upper bound for one remote command (seconds)
    pub command_timeout: u64,
    /// Extra `-o` options, e.g. `StrictHostKeyChecking=no`
    pub options: Vec<String>,
}

impl Default for SnmpSettings {
    fn default() -> Self {
        Self {
            port: 161,
            version: SnmpVersion::V2c,
            timeout: 10,
            max_repetitions: 10,
        }
    }
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            binary: "ssh".to_string(),
            port: 22,
            default_user: "admin".to_string(),
            connect_timeout: 10,
            command_timeout: 60,
            options: Vec::new(),
        }
    }
}
