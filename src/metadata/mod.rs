use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Where the provisioning process drops the host metadata
pub const DEFAULT_METADATA_PATH: &str = "/etc/infra-k8s/host-metadata.json";

/// Host metadata as written by the provisioning process.
///
/// Fields are kept as raw JSON values so that nothing is validated or
/// normalized at load time. Unknown top-level keys are ignored, and a
/// repeated key keeps its last value.
#[derive(Debug)]
pub struct HostMetadata {
    pub node_role: Option<Value>,
    pub cluster_name: Option<Value>,

    // Not an Option: an explicit `null` has to reach the flag builder as a shape error
    pub extra_labels: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl HostMetadata {
    pub fn from_json(contents: &str) -> Result<Self> {
        // Only a top-level object is accepted; arrays are not read positionally
        let mut fields: Map<String, Value> =
            serde_json::from_str(contents).context("Host metadata is not a valid JSON object")?;

        Ok(Self {
            node_role: fields.remove("node_role"),
            cluster_name: fields.remove("cluster_name"),
            extra_labels: fields.remove("extra_labels").unwrap_or_else(empty_object),
        })
    }
}

pub fn load(path: &Path) -> Result<HostMetadata> {
    info!("Loading host metadata from {}", path.display());

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read host metadata: {}", path.display()))?;

    let metadata = HostMetadata::from_json(&contents)
        .with_context(|| format!("Failed to parse host metadata: {}", path.display()))?;

    debug!("Host metadata: {:?}", metadata);
    Ok(metadata)
}
