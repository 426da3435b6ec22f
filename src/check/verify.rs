use serde::Serialize;

use super::show_version::ExtractedFields;
use crate::error::VerificationError;
use crate::snmp::oid::{
    SYS_CONTACT_KEY, SYS_DESCR_KEY, SYS_LOCATION_KEY, SYS_NAME_KEY, SYS_OBJECT_ID_KEY,
    SYS_UPTIME_KEY,
};
use crate::snmp::{AgentDetector, AgentInfo, SnmpResultSet};

/// Checks that sysDescr is present and mentions both extracted fields.
/// Returns the sysDescr value on success.
pub fn verify_sysdescr<'a>(
    fields: &ExtractedFields,
    results: &'a SnmpResultSet,
) -> Result<&'a str, VerificationError> {
    let sys_descr = results
        .get(SYS_DESCR_KEY)
        .filter(|v| !v.is_empty())
        .ok_or(VerificationError::SysDescrMissing)?;

    if !sys_descr.contains(fields.hwsku.as_str()) {
        return Err(VerificationError::HwSkuMismatch {
            hwsku: fields.hwsku.clone(),
        });
    }
    if !sys_descr.contains(fields.sonic_version.as_str()) {
        return Err(VerificationError::SonicVersionMismatch {
            version: fields.sonic_version.clone(),
        });
    }

    Ok(sys_descr)
}

/// The scalars of the system group, as walked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemGroup {
    pub sys_descr: Option<String>,
    pub sys_object_id: Option<String>,
    pub sys_uptime: Option<String>,
    pub sys_contact: Option<String>,
    pub sys_name: Option<String>,
    pub sys_location: Option<String>,
    pub agent: Option<AgentInfo>,
}

impl SystemGroup {
    pub fn from_results(results: &SnmpResultSet) -> Self {
        let get = |key: &str| results.get(key).map(str::to_string);
        let sys_object_id = get(SYS_OBJECT_ID_KEY);

        Self {
            sys_descr: get(SYS_DESCR_KEY),
            agent: sys_object_id.as_deref().map(AgentDetector::detect),
            sys_object_id,
            sys_uptime: get(SYS_UPTIME_KEY),
            sys_contact: get(SYS_CONTACT_KEY),
            sys_name: get(SYS_NAME_KEY),
            sys_location: get(SYS_LOCATION_KEY),
        }
    }
}
