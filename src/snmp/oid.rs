use anyhow::{Context, Result};
use snmp2::Oid;

/// Root of the standard MIB-II "system" group.
pub const SYSTEM_GROUP: &str = "1.3.6.1.2.1.1";

/// sysDescr.0 as net-snmp prints it.
pub const SYS_DESCR_KEY: &str = "iso.3.6.1.2.1.1.1.0";
pub const SYS_OBJECT_ID_KEY: &str = "iso.3.6.1.2.1.1.2.0";
pub const SYS_UPTIME_KEY: &str = "iso.3.6.1.2.1.1.3.0";
pub const SYS_CONTACT_KEY: &str = "iso.3.6.1.2.1.1.4.0";
pub const SYS_NAME_KEY: &str = "iso.3.6.1.2.1.1.5.0";
pub const SYS_LOCATION_KEY: &str = "iso.3.6.1.2.1.1.6.0";

/// Parses a dotted OID. Accepts a leading dot and the textual `iso` arc.
pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let numeric = to_numeric(s);
    let parts: Result<Vec<u64>, _> = numeric
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.with_context(|| format!("Invalid OID: {}", s))?;
    if parts.len() < 2 {
        anyhow::bail!("Invalid OID: {} (needs at least two arcs)", s);
    }
    Oid::from(&parts).map_err(|e| anyhow::anyhow!("Failed to build OID from '{}': {:?}", s, e))
}

/// Renders a dotted OID the way net-snmp tools key their output:
/// `1.3.6.1.2.1.1.1.0` becomes `iso.3.6.1.2.1.1.1.0`.
pub fn oid_key(dotted: &str) -> String {
    let dotted = dotted.trim().trim_start_matches('.');
    if dotted == "1" {
        "iso".to_string()
    } else if let Some(rest) = dotted.strip_prefix("1.") {
        format!("iso.{}", rest)
    } else {
        dotted.to_string()
    }
}

/// Arcs of an OID, for ordering. Vectors of arcs compare the way agents
/// order OIDs for GETNEXT.
pub fn oid_arcs(oid: &Oid<'_>) -> Vec<u64> {
    oid.to_string()
        .split('.')
        .filter_map(|p| p.parse::<u64>().ok())
        .collect()
}

fn to_numeric(s: &str) -> String {
    let s = s.trim().trim_start_matches('.');
    if s == "iso" {
        "1".to_string()
    } else if let Some(rest) = s.strip_prefix("iso.") {
        format!("1.{}", rest)
    } else {
        s.to_string()
    }
}
