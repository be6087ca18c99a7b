use crate::metadata::HostMetadata;
use crate::utils::{json_type_name, render_value};
use anyhow::{anyhow, Result};
use log::debug;
use std::fmt;

/// Prefix of the labels every BYOH host carries
pub const LABEL_PREFIX: &str = "byoh.infrastructure.cluster.x-k8s.io";
pub const BOOTSTRAP_KUBECONFIG_PATH: &str = "/etc/infra-k8s/kubeconfig";
pub const NAMESPACE_PREFIX: &str = "capi-cluster-";
pub const METRICS_BIND_ADDRESS: &str = ":8081";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub key: String,
    pub value: String,
}

impl Label {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered agent command-line tokens. Built once by [`build`], read-only after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagList {
    tokens: Vec<String>,
}

impl FlagList {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// The three labels derived from host identity, in the order the agent expects them
pub fn common_labels(metadata: &HostMetadata, hostname: &str) -> Vec<Label> {
    vec![
        Label::new(
            format!("{}/type", LABEL_PREFIX),
            render_value(metadata.node_role.as_ref()),
        ),
        Label::new(
            format!("{}/cluster", LABEL_PREFIX),
            render_value(metadata.cluster_name.as_ref()),
        ),
        Label::new(format!("{}/hostname", LABEL_PREFIX), hostname),
    ]
}

/// Operator-supplied labels, in the order they appear in the metadata file
pub fn extra_labels(metadata: &HostMetadata) -> Result<Vec<Label>> {
    let entries = metadata.extra_labels.as_object().ok_or_else(|| {
        anyhow!(
            "extra_labels must be an object of key/value pairs, found {}",
            json_type_name(&metadata.extra_labels)
        )
    })?;

    Ok(entries
        .iter()
        .map(|(key, value)| Label::new(key.as_str(), render_value(Some(value))))
        .collect())
}

/// Build the full agent flag list for this host
pub fn build(metadata: &HostMetadata, hostname: &str) -> Result<FlagList> {
    let mut labels = common_labels(metadata, hostname);
    labels.extend(extra_labels(metadata)?);

    let mut tokens = Vec::with_capacity(labels.len() * 2 + 7);
    for label in &labels {
        tokens.push(String::from("--label"));
        tokens.push(label.to_string());
    }

    tokens.push(String::from("--bootstrap-kubeconfig"));
    tokens.push(String::from(BOOTSTRAP_KUBECONFIG_PATH));
    tokens.push(String::from("--skip-installation"));
    tokens.push(String::from("--namespace"));
    tokens.push(format!(
        "{}{}",
        NAMESPACE_PREFIX,
        render_value(metadata.cluster_name.as_ref())
    ));
    tokens.push(String::from("--metricsbindaddress"));
    tokens.push(String::from(METRICS_BIND_ADDRESS));

    debug!("Agent flags: {:?}", tokens);
    Ok(FlagList { tokens })
}
