use std::collections::{BTreeMap, BTreeSet};

use cumulus_sdk::{StackOutputs, Urn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stack state, persisted to `<state_dir>/<project>/<stack>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackState {
    pub project: String,
    pub stack: String,

    /// Every resource the last apply registered, keyed by URN.
    pub resources: BTreeMap<Urn, ResourceState>,

    /// Stack outputs from the last apply.
    #[serde(default)]
    pub outputs: StackOutputs,
}

/// State for a single managed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceState {
    pub type_token: String,
    pub id: String,
    pub status: ResourceStatus,
    pub inputs: Map<String, Value>,
    pub outputs: Map<String, Value>,
    #[serde(default)]
    pub dependencies: BTreeSet<Urn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Created,
    /// Already in state from an earlier apply; id kept.
    Same,
}
