//! Failure taxonomy for the sysinfo check.
//!
//! Every step of the check converts its failure into one of these values and
//! stops. The `Display` text of [`CheckError`] is what gets reported.

use std::time::Duration;

use thiserror::Error;

/// The remote (or local) command could not produce usable output.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {code:?}: {stderr}")]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("'{command}' did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Errors raised by the SNMP transport.
#[derive(Error, Debug)]
pub enum SnmpError {
    #[error("invalid OID: {0}")]
    InvalidOid(String),

    #[error("DUT '{0}' is not part of the testbed")]
    UnknownDut(String),

    #[error("failed to open SNMP session to {target}: {source}")]
    Session {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SNMP request failed: {0}")]
    Request(String),

    #[error("agent returned status {status} at index {index}")]
    Agent { status: u32, index: u32 },

    #[error("SNMP walk of {oid} timed out after {timeout:?}")]
    Timeout { oid: String, timeout: Duration },
}

/// Expected label missing from the `show version` output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("HwSKU not found in 'show version' output")]
    HwSkuMissing,

    #[error("SONiC version not found in 'show version' output")]
    SonicVersionMissing,
}

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("SNMP walk returned no data")]
    NoData,

    #[error(transparent)]
    Transport(#[from] SnmpError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("sysDescr OID not found in SNMP data")]
    SysDescrMissing,

    #[error("HwSKU ({hwsku}) from 'show version' not in sysDescr")]
    HwSkuMismatch { hwsku: String },

    #[error("SONiC version ({version}) from 'show version' not in sysDescr")]
    SonicVersionMismatch { version: String },
}

/// Terminal outcome of a failed check.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("'show version' failed: {0}")]
    Command(#[from] CommandError),

    #[error("Error parsing 'show version': {0}")]
    Parse(#[from] ParseError),

    #[error("SNMP walk failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("SNMP data verification failed: {0}")]
    Verification(#[from] VerificationError),
}

impl CheckError {
    /// Short machine-readable name of the failing step.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Command(_) => "command",
            CheckError::Parse(_) => "parse",
            CheckError::Retrieval(_) => "retrieval",
            CheckError::Verification(_) => "verification",
        }
    }
}
