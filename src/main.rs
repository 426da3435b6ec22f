use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use snmp_sysinfo::check::{CheckContext, SYSINFO_CHECK, execute_sysinfo_check};
use snmp_sysinfo::cli::Cli;
use snmp_sysinfo::config::AppConfig;
use snmp_sysinfo::device::{LocalRunner, SshRunner};
use snmp_sysinfo::formatter::{CheckStatus, JsonFormatter, RunInfo, SysinfoReport};
use snmp_sysinfo::logging::{LogConfig, init_logging};
use snmp_sysinfo::snmp::AgentWalker;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.log_level.clone(),
        json_format: cli.log_json,
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Failed to initialise logging: {:#}", e);
        return ExitCode::from(2);
    }

    match run(&cli).await {
        Ok(report) => {
            match JsonFormatter::to_json_string(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("JSON serialization failed: {}", e);
                    return ExitCode::from(2);
                }
            }
            match report.status {
                CheckStatus::Passed | CheckStatus::Skipped => ExitCode::SUCCESS,
                CheckStatus::Failed => ExitCode::FAILURE,
            }
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Loads the configuration and runs the check. Only configuration problems
/// surface as `Err`; check failures land in the report.
async fn run(cli: &Cli) -> Result<SysinfoReport> {
    let config = AppConfig::load(&cli.testbed)?;
    let testbed = &config.testbed;
    let started_at = chrono::Utc::now();
    let started = Instant::now();

    let mut run_info = RunInfo {
        meta: &SYSINFO_CHECK,
        testbed: &testbed.name,
        topology: testbed.topology.as_deref(),
        dut: None,
        started_at,
        duration_ms: 0,
    };

    if let Some(topology) = testbed.topology.as_deref()
        && !SYSINFO_CHECK.applies_to(topology)
    {
        let reason = format!("topology '{}' is not one of {:?}", topology, SYSINFO_CHECK.topologies);
        warn!("skipping: {}", reason);
        return Ok(JsonFormatter::format_skip(&run_info, &reason));
    }
    if let Some(category) = cli.category.as_deref()
        && !SYSINFO_CHECK.in_category(category)
    {
        let reason = format!("check is not in category '{}'", category);
        warn!("skipping: {}", reason);
        return Ok(JsonFormatter::format_skip(&run_info, &reason));
    }

    let dut = testbed.select_dut(cli.dut.as_deref())?;
    let community = config.community_for(&dut.hostname)?;
    run_info.dut = Some(&dut.hostname);

    let ctx = CheckContext {
        testbed,
        dut,
        community: &community,
        version: config.settings.snmp.version,
    };
    let walker = AgentWalker::new(config.settings.snmp.clone());

    info!(testbed = %testbed.name, dut = %dut.hostname, check = SYSINFO_CHECK.name, "starting check");
    let check = if cli.local {
        let runner = LocalRunner::new(Duration::from_secs(config.settings.ssh.command_timeout));
        execute_sysinfo_check(&ctx, &runner, &walker).await
    } else {
        let runner = SshRunner::new(config.settings.ssh.clone());
        execute_sysinfo_check(&ctx, &runner, &walker).await
    };

    match &check.result {
        Ok(_) => info!("check passed"),
        Err(e) => error!("check failed: {}", e),
    }

    run_info.duration_ms = started.elapsed().as_millis() as u64;
    Ok(JsonFormatter::format_report(&run_info, &check))
}
