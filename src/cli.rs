use clap::{ArgAction, Parser};

use crate::config::DEFAULT_TESTBED_PATH;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "snmp-sysinfo",
    version,
    about = "Check that SNMP sysDescr agrees with 'show version' on a SONiC DUT"
)]
pub struct Cli {
    /// Testbed YAML with DUTs, credentials and settings
    #[arg(short, long, default_value = DEFAULT_TESTBED_PATH)]
    pub testbed: String,

    /// DUT hostname; a random DUT from the testbed when omitted
    #[arg(short, long)]
    pub dut: Option<String>,

    /// Run 'show version' on this host instead of over SSH
    #[arg(long, action = ArgAction::SetTrue)]
    pub local: bool,

    /// Only run if the check carries this category
    #[arg(long)]
    pub category: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, action = ArgAction::SetTrue)]
    pub log_json: bool,
}
