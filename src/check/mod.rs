//! SNMP system information check.
//!
//! Runs `show version` on a DUT, walks the agent's system group, and checks
//! that sysDescr carries the HwSKU and SONiC version the device reports.
//! Each step is fail-fast; nothing is retried.

use serde::Serialize;
use tracing::{debug, info};

pub mod show_version;
pub mod verify;

pub use show_version::{ExtractedFields, SHOW_VERSION, parse_show_version};
pub use verify::{SystemGroup, verify_sysdescr};

use crate::config::Testbed;
use crate::device::{CommandRunner, Dut};
use crate::error::{CheckError, RetrievalError};
use crate::snmp::{SYS_DESCR_KEY, SYSTEM_GROUP, SnmpResultSet, SnmpVersion, SnmpWalker};

/// Selection metadata consumed by whatever decides which checks to run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckMeta {
    pub name: &'static str,
    pub topologies: &'static [&'static str],
    pub categories: &'static [&'static str],
}

impl CheckMeta {
    pub fn applies_to(&self, topology: &str) -> bool {
        self.topologies.contains(&topology)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.categories.contains(&category)
    }
}

pub const SYSINFO_CHECK: CheckMeta = CheckMeta {
    name: "test_snmp_system_info_matches_show_version",
    topologies: &["t0", "t1", "t2", "m0", "mx"],
    categories: &["snmp"],
};

/// Everything the check borrows for one run.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub testbed: &'a Testbed,
    pub dut: &'a Dut,
    pub community: &'a str,
    pub version: SnmpVersion,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub fields: ExtractedFields,
    pub sys_descr: String,
    pub system: SystemGroup,
    pub walked_oids: usize,
}

/// What one run produced: the outcome plus whatever was gathered before a
/// failing step, so reports can show what was compared.
#[derive(Debug)]
pub struct CheckRun {
    pub fields: Option<ExtractedFields>,
    pub sys_descr: Option<String>,
    pub result: Result<CheckOutcome, CheckError>,
}

#[derive(Debug, Default)]
struct Gathered {
    fields: Option<ExtractedFields>,
    sys_descr: Option<String>,
}

/// Runs the check once against `ctx.dut`.
pub async fn run_sysinfo_check<R, W>(
    ctx: &CheckContext<'_>,
    runner: &R,
    walker: &W,
) -> Result<CheckOutcome, CheckError>
where
    R: CommandRunner,
    W: SnmpWalker,
{
    execute_sysinfo_check(ctx, runner, walker).await.result
}

/// Like [`run_sysinfo_check`], keeping the parsed fields and sysDescr on
/// failure.
pub async fn execute_sysinfo_check<R, W>(
    ctx: &CheckContext<'_>,
    runner: &R,
    walker: &W,
) -> CheckRun
where
    R: CommandRunner,
    W: SnmpWalker,
{
    let mut gathered = Gathered::default();
    let result = sysinfo_steps(ctx, runner, walker, &mut gathered).await;

    CheckRun {
        fields: gathered.fields,
        sys_descr: gathered.sys_descr,
        result,
    }
}

async fn sysinfo_steps<R, W>(
    ctx: &CheckContext<'_>,
    runner: &R,
    walker: &W,
    gathered: &mut Gathered,
) -> Result<CheckOutcome, CheckError>
where
    R: CommandRunner,
    W: SnmpWalker,
{
    info!(dut = %ctx.dut.hostname, "running '{}'", SHOW_VERSION);
    let output = runner.shell(ctx.dut, SHOW_VERSION).await?;
    debug!("show version output:\n{}", output.stdout);

    let fields = parse_show_version(&output.stdout)?;
    info!(hwsku = %fields.hwsku, sonic_version = %fields.sonic_version, "parsed 'show version'");
    gathered.fields = Some(fields.clone());

    let results = walk_system_group(ctx, walker).await?;
    gathered.sys_descr = results.get(SYS_DESCR_KEY).map(str::to_string);

    let sys_descr = verify_sysdescr(&fields, &results)?.to_string();
    info!(%sys_descr, "sysDescr matches 'show version'");

    Ok(CheckOutcome {
        system: SystemGroup::from_results(&results),
        walked_oids: results.len(),
        fields,
        sys_descr,
    })
}

async fn walk_system_group<W: SnmpWalker>(
    ctx: &CheckContext<'_>,
    walker: &W,
) -> Result<SnmpResultSet, RetrievalError> {
    let results = walker
        .snmpwalk(ctx.testbed, ctx.dut, SYSTEM_GROUP, ctx.version, ctx.community)
        .await?;

    if results.is_empty() {
        return Err(RetrievalError::NoData);
    }
    Ok(results)
}
