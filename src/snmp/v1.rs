use snmp2::{AsyncSession, Oid};
use tracing::{trace, warn};

use super::oid::oid_arcs;
use super::value::{is_exception, render_value};
use crate::error::SnmpError;

/// v1 noSuchName, which is how v1 agents report the end of the view.
const NO_SUCH_NAME: u32 = 2;

pub struct SnmpClientV1 {
    session: AsyncSession,
}

impl SnmpClientV1 {
    pub async fn new(target: &str, community: &[u8]) -> Result<Self, SnmpError> {
        let session = AsyncSession::new_v1(target, community, 0)
            .await
            .map_err(|source| SnmpError::Session {
                target: target.to_string(),
                source,
            })?;

        Ok(Self { session })
    }

    /// Walks everything under `start_oid` one GETNEXT at a time.
    pub async fn walk(&mut self, start_oid: &Oid<'_>) -> Result<Vec<(String, String)>, SnmpError> {
        let mut results = Vec::new();
        let mut current_oid = start_oid.to_owned();
        let mut last_arcs = oid_arcs(start_oid);

        loop {
            let resp = self
                .session
                .getnext(&current_oid)
                .await
                .map_err(|e| SnmpError::Request(e.to_string()))?;

            match resp.error_status {
                0 => {}
                NO_SUCH_NAME => break,
                status => {
                    return Err(SnmpError::Agent {
                        status,
                        index: resp.error_index,
                    });
                }
            }

            let mut varbinds = resp.varbinds;
            let Some((oid, value)) = varbinds.next() else {
                break;
            };
            if !oid.starts_with(start_oid) {
                break;
            }

            let arcs = oid_arcs(&oid);
            if arcs <= last_arcs {
                warn!(oid = %oid, previous = %current_oid, "OID not increasing, stopping walk");
                break;
            }

            trace!(oid = %oid, "getnext varbind");
            if !is_exception(&value) {
                results.push((oid.to_string(), render_value(&value)));
            }
            current_oid = oid.to_owned();
            last_arcs = arcs;
        }

        Ok(results)
    }
}
