use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;

/// Command whose output the SNMP agent is compared against.
pub const SHOW_VERSION: &str = "show version";

static HWSKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HwSKU:\s+(\S+)").expect("HwSKU pattern compiles"));
static SONIC_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SONiC Software Version:\s+(\S+)").expect("SONiC version pattern compiles")
});

/// The two identifiers pulled out of `show version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    pub hwsku: String,
    pub sonic_version: String,
}

/// Extracts HwSKU and SONiC version, each the first whitespace-delimited
/// token after its label. HwSKU is looked for first.
pub fn parse_show_version(output: &str) -> Result<ExtractedFields, ParseError> {
    let hwsku = first_token(&HWSKU_RE, output).ok_or(ParseError::HwSkuMissing)?;
    let sonic_version =
        first_token(&SONIC_VERSION_RE, output).ok_or(ParseError::SonicVersionMissing)?;

    Ok(ExtractedFields {
        hwsku: hwsku.to_string(),
        sonic_version: sonic_version.to_string(),
    })
}

fn first_token<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
