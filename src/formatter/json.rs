use serde::{Deserialize, Serialize};

use crate::check::{CheckMeta, CheckRun};
use crate::snmp::AgentInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

/// What one run of the check printed on stdout.
#[derive(Debug, Clone, Serialize)]
pub struct SysinfoReport {
    pub check: String,
    pub testbed: String,
    pub topology: Option<String>,
    pub dut: Option<String>,
    pub status: CheckStatus,
    pub failure_kind: Option<String>,
    pub message: Option<String>,
    pub hwsku: Option<String>,
    pub sonic_version: Option<String>,
    pub sys_descr: Option<String>,
    pub sys_name: Option<String>,
    pub agent: Option<AgentInfo>,
    pub walked_oids: usize,
    pub started_at: String,
    pub duration_ms: u64,
}

/// Where the report came from, independent of the outcome.
#[derive(Debug, Clone)]
pub struct RunInfo<'a> {
    pub meta: &'a CheckMeta,
    pub testbed: &'a str,
    pub topology: Option<&'a str>,
    pub dut: Option<&'a str>,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
}

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_report(run: &RunInfo<'_>, check: &CheckRun) -> SysinfoReport {
        let mut report = Self::base(run, CheckStatus::Passed);

        match &check.result {
            Ok(outcome) => {
                report.hwsku = Some(outcome.fields.hwsku.clone());
                report.sonic_version = Some(outcome.fields.sonic_version.clone());
                report.sys_descr = Some(outcome.sys_descr.clone());
                report.sys_name = outcome.system.sys_name.clone();
                report.agent = outcome.system.agent.clone();
                report.walked_oids = outcome.walked_oids;
            }
            Err(e) => {
                report.status = CheckStatus::Failed;
                report.failure_kind = Some(e.kind().to_string());
                report.message = Some(e.to_string());
                if let Some(fields) = &check.fields {
                    report.hwsku = Some(fields.hwsku.clone());
                    report.sonic_version = Some(fields.sonic_version.clone());
                }
                report.sys_descr = check.sys_descr.clone();
            }
        }

        report
    }

    pub fn format_skip(run: &RunInfo<'_>, reason: &str) -> SysinfoReport {
        let mut report = Self::base(run, CheckStatus::Skipped);
        report.message = Some(reason.to_string());
        report
    }

    pub fn to_json_string(report: &SysinfoReport) -> serde_json::Result<String> {
        serde_json::to_string_pretty(report)
    }

    fn base(run: &RunInfo<'_>, status: CheckStatus) -> SysinfoReport {
        SysinfoReport {
            check: run.meta.name.to_string(),
            testbed: run.testbed.to_string(),
            topology: run.topology.map(str::to_string),
            dut: run.dut.map(str::to_string),
            status,
            failure_kind: None,
            message: None,
            hwsku: None,
            sonic_version: None,
            sys_descr: None,
            sys_name: None,
            agent: None,
            walked_oids: 0,
            started_at: run.started_at.to_rfc3339(),
            duration_ms: run.duration_ms,
        }
    }
}
