use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info};

pub mod clients_enum;
pub mod device_profiles;
pub mod oid;
pub mod v1;
pub mod v2c;
pub mod value;

#[cfg(test)]
mod fake_agent;

pub use clients_enum::SnmpClient;
pub use device_profiles::{AgentDetector, AgentInfo};
pub use oid::{SYS_DESCR_KEY, SYSTEM_GROUP, oid_key, parse_oid};

use crate::config::{SnmpSettings, Testbed};
use crate::device::Dut;
use crate::error::SnmpError;

/// Protocol version used for a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SnmpVersion {
    V1,
    V2c,
}

impl FromStr for SnmpVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(SnmpVersion::V1),
            "2c" | "v2c" => Ok(SnmpVersion::V2c),
            other => Err(format!("unsupported SNMP version '{}'", other)),
        }
    }
}

impl TryFrom<String> for SnmpVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SnmpVersion> for String {
    fn from(v: SnmpVersion) -> Self {
        v.to_string()
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnmpVersion::V1 => write!(f, "1"),
            SnmpVersion::V2c => write!(f, "2c"),
        }
    }
}

/// OID -> value mapping produced by one walk, keyed in `iso.` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnmpResultSet(BTreeMap<String, String>);

impl SnmpResultSet {
    /// Looks a value up by OID. Numeric and `iso.` forms are equivalent.
    pub fn get(&self, oid: &str) -> Option<&str> {
        self.0.get(&oid_key(oid)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for SnmpResultSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (oid_key(k.as_ref()), v.into()))
                .collect(),
        )
    }
}

/// Performs an SNMP walk against a DUT.
#[allow(async_fn_in_trait)]
pub trait SnmpWalker {
    async fn snmpwalk(
        &self,
        duts: &Testbed,
        dut: &Dut,
        oid: &str,
        version: SnmpVersion,
        community: &str,
    ) -> Result<SnmpResultSet, SnmpError>;
}

/// Walks the DUT's own agent over UDP.
#[derive(Debug, Clone)]
pub struct AgentWalker {
    settings: SnmpSettings,
}

impl AgentWalker {
    pub fn new(settings: SnmpSettings) -> Self {
        Self { settings }
    }

    fn target(&self, duts: &Testbed, dut: &Dut) -> Result<String, SnmpError> {
        let entry = duts
            .dut(&dut.hostname)
            .ok_or_else(|| SnmpError::UnknownDut(dut.hostname.clone()))?;
        Ok(format!("{}:{}", entry.mgmt_ip, self.settings.port))
    }
}

impl SnmpWalker for AgentWalker {
    async fn snmpwalk(
        &self,
        duts: &Testbed,
        dut: &Dut,
        oid: &str,
        version: SnmpVersion,
        community: &str,
    ) -> Result<SnmpResultSet, SnmpError> {
        let root = parse_oid(oid).map_err(|e| SnmpError::InvalidOid(e.to_string()))?;
        let target = self.target(duts, dut)?;
        let limit = Duration::from_secs(self.settings.timeout);

        info!(%target, %oid, %version, "walking SNMP subtree");

        let work = async {
            let mut client = SnmpClient::connect(
                &target,
                version,
                community.as_bytes(),
                self.settings.max_repetitions,
            )
            .await?;
            client.walk(&root).await
        };

        let rows = match timeout(limit, work).await {
            Ok(rows) => rows?,
            Err(_) => {
                return Err(SnmpError::Timeout {
                    oid: oid.to_string(),
                    timeout: limit,
                });
            }
        };

        debug!(count = rows.len(), "SNMP walk finished");
        Ok(rows.into_iter().collect())
    }
}
