pub mod json;

pub use json::{CheckStatus, JsonFormatter, RunInfo, SysinfoReport};
