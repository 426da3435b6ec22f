//! Consistency check between a SONiC device's SNMP system group and its
//! `show version` output.

pub mod check;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod snmp;
