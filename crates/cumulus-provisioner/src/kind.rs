use serde_json::{Map, Value};

use crate::error::ProvisionerError;
use crate::validate::Fields;

/// Where the local engine pretends to provision.
#[derive(Debug, Clone)]
pub struct ProviderEnv {
    pub region: String,
    pub account_id: String,
    /// Id of the account's default resource group.
    pub default_resource_group: String,
}

impl Default for ProviderEnv {
    fn default() -> Self {
        Self {
            region: "us-south".into(),
            account_id: "0123456789abcdef0123456789abcdef".into(),
            default_resource_group: "d3f4u17d3f4u17d3f4u17d3f4u17d3f4".into(),
        }
    }
}

/// One impl per provider resource type the engine understands.
pub trait ResourceKind: Send + Sync {
    /// e.g. "ibmcloud:index/isVpc:IsVpc"
    fn type_token(&self) -> &'static str;

    /// Short label for logs, e.g. "VPC"
    fn label(&self) -> &'static str;

    /// Reject inputs the provider API would refuse.
    fn validate(&self, fields: &Fields<'_>) -> Result<(), ProvisionerError>;

    /// Values the provider fills in when the program leaves them out.
    /// Known during preview as well.
    fn defaults(&self, _inputs: &Map<String, Value>, _env: &ProviderEnv) -> Map<String, Value> {
        Map::new()
    }

    /// Fresh provider-assigned id.
    fn new_id(&self, inputs: &Map<String, Value>, env: &ProviderEnv) -> String;

    /// Attributes the provider computes on create. Unknown during preview.
    fn computed(
        &self,
        id: &str,
        inputs: &Map<String, Value>,
        env: &ProviderEnv,
    ) -> Map<String, Value>;

    /// Computed attributes that keep their earlier value once created.
    fn stable_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Every key [`ResourceKind::computed`] may produce.
    fn computed_keys(&self) -> &'static [&'static str];
}
