use serde::{Deserialize, Serialize};

use crate::charts::ChartId;
use crate::error::{ChartError, ChartResult};
use crate::render::ChartDescriptor;

pub const CHART_DESCRIPTOR_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope written by static exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptorJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartId,
    pub descriptor: ChartDescriptor,
}

impl ChartDescriptorJsonContractV1 {
    #[must_use]
    pub fn new(chart: ChartId, descriptor: ChartDescriptor) -> Self {
        Self {
            schema_version: CHART_DESCRIPTOR_JSON_SCHEMA_V1,
            chart,
            descriptor,
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize descriptor contract v1: {e}"))
        })
    }

    pub fn to_json_compact(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize descriptor contract v1: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::Serialization(format!("failed to parse descriptor contract payload: {e}"))
        })?;
        if payload.schema_version != CHART_DESCRIPTOR_JSON_SCHEMA_V1 {
            return Err(ChartError::Serialization(format!(
                "unsupported descriptor schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

impl ChartDescriptor {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Serialization(format!("failed to serialize descriptor: {e}")))
    }

    /// Accepts either a bare descriptor or a v1 contract envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(descriptor) = serde_json::from_str::<ChartDescriptor>(input) {
            return Ok(descriptor);
        }
        ChartDescriptorJsonContractV1::from_json_str(input).map(|payload| payload.descriptor)
    }
}

impl ChartId {
    /// Produces this chart wrapped in the v1 export envelope.
    #[must_use]
    pub fn export_contract_v1(self) -> ChartDescriptorJsonContractV1 {
        ChartDescriptorJsonContractV1::new(self, self.produce())
    }
}
