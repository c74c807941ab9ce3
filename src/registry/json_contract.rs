use serde::{Deserialize, Serialize};

use crate::core::ChartConfiguration;
use crate::error::{SyncError, SyncResult};

use super::{ChartRegistry, RegistrySnapshot};

pub const CHART_CONFIGURATION_JSON_SCHEMA_V1: u32 = 1;
pub const REGISTRY_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigurationJsonContractV1 {
    pub schema_version: u32,
    pub configuration: ChartConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: RegistrySnapshot,
}

impl ChartConfiguration {
    pub fn to_json_contract_v1_pretty(&self) -> SyncResult<String> {
        let payload = ChartConfigurationJsonContractV1 {
            schema_version: CHART_CONFIGURATION_JSON_SCHEMA_V1,
            configuration: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SyncError::InvalidData(format!(
                "failed to serialize chart configuration contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare configuration or a versioned envelope.
    pub fn from_json_compat_str(input: &str) -> SyncResult<Self> {
        if let Ok(configuration) = serde_json::from_str::<ChartConfiguration>(input) {
            return Ok(configuration);
        }
        let payload: ChartConfigurationJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                SyncError::InvalidData(format!("failed to parse chart configuration payload: {e}"))
            })?;
        if payload.schema_version != CHART_CONFIGURATION_JSON_SCHEMA_V1 {
            return Err(SyncError::InvalidData(format!(
                "unsupported chart configuration schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.configuration)
    }
}

impl RegistrySnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SyncResult<String> {
        let payload = RegistrySnapshotJsonContractV1 {
            schema_version: REGISTRY_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SyncError::InvalidData(format!("failed to serialize registry snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> SyncResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<RegistrySnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: RegistrySnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SyncError::InvalidData(format!("failed to parse registry snapshot payload: {e}"))
        })?;
        if payload.schema_version != REGISTRY_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(SyncError::InvalidData(format!(
                "unsupported registry snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<T> ChartRegistry<T>
where
    T: Send + Sync + 'static,
{
    pub fn snapshot_json_contract_v1_pretty(&self) -> SyncResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }

    /// Decodes a configuration payload and registers it under its own id.
    pub fn register_chart_from_json(&self, input: &str) -> SyncResult<()> {
        let configuration = ChartConfiguration::from_json_compat_str(input)?;
        self.register_configuration(configuration);
        Ok(())
    }
}
