use snmp2::Oid;

use super::v1::SnmpClientV1;
use super::v2c::SnmpClientV2c;
use super::SnmpVersion;
use crate::error::SnmpError;

pub enum SnmpClient {
    V1(SnmpClientV1),
    V2c(SnmpClientV2c),
}

impl SnmpClient {
    pub async fn connect(
        target: &str,
        version: SnmpVersion,
        community: &[u8],
        max_repetitions: u32,
    ) -> Result<Self, SnmpError> {
        match version {
            SnmpVersion::V1 => Ok(SnmpClient::V1(SnmpClientV1::new(target, community).await?)),
            SnmpVersion::V2c => Ok(SnmpClient::V2c(
                SnmpClientV2c::new(target, community, max_repetitions).await?,
            )),
        }
    }

    pub async fn walk(&mut self, root_oid: &Oid<'_>) -> Result<Vec<(String, String)>, SnmpError> {
        match self {
            SnmpClient::V1(client) => client.walk(root_oid).await,
            SnmpClient::V2c(client) => client.walk(root_oid).await,
        }
    }
}
