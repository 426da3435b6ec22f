use snmp2::{AsyncSession, Oid, Value};
use tracing::{trace, warn};

use super::oid::oid_arcs;
use super::value::{is_exception, render_value};
use crate::error::SnmpError;

pub struct SnmpClientV2c {
    session: AsyncSession,
    max_repetitions: u32,
}

impl SnmpClientV2c {
    pub async fn new(target: &str, community: &[u8], max_repetitions: u32) -> Result<Self, SnmpError> {
        let session = AsyncSession::new_v2c(target, community, 0)
            .await
            .map_err(|source| SnmpError::Session {
                target: target.to_string(),
                source,
            })?;

        Ok(Self {
            session,
            max_repetitions: max_repetitions.max(1),
        })
    }

    /// Walks everything under `start_oid` with GETBULK.
    ///
    /// Stops at the first varbind outside the subtree, on `endOfMibView`, or
    /// when the agent returns an OID that does not sort after the previous one.
    pub async fn walk(&mut self, start_oid: &Oid<'_>) -> Result<Vec<(String, String)>, SnmpError> {
        let mut results = Vec::new();
        let mut current_oid = start_oid.to_owned();
        let mut last_arcs = oid_arcs(start_oid);

        'outer: loop {
            let resp = self
                .session
                .getbulk(&[&current_oid], 0, self.max_repetitions)
                .await
                .map_err(|e| SnmpError::Request(e.to_string()))?;

            if resp.error_status != 0 {
                return Err(SnmpError::Agent {
                    status: resp.error_status,
                    index: resp.error_index,
                });
            }

            let mut advanced = false;
            for (oid, value) in resp.varbinds {
                if !oid.starts_with(start_oid) || matches!(value, Value::EndOfMibView) {
                    break 'outer;
                }

                let arcs = oid_arcs(&oid);
                if arcs <= last_arcs {
                    warn!(oid = %oid, previous = %current_oid, "OID not increasing, stopping walk");
                    break 'outer;
                }

                trace!(oid = %oid, "getbulk varbind");
                if !is_exception(&value) {
                    results.push((oid.to_string(), render_value(&value)));
                }
                current_oid = oid.to_owned();
                last_arcs = arcs;
                advanced = true;
            }

            if !advanced {
                break;
            }
        }

        Ok(results)
    }
}
