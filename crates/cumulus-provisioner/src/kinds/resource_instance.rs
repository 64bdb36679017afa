use cumulus_sdk::resources::resource_instance::TYPE_TOKEN;
use serde_json::{Map, Value, json};

use crate::error::ProvisionerError;
use crate::kind::{ProviderEnv, ResourceKind};
use crate::validate::Fields;

pub struct ResourceInstanceKind;

impl ResourceInstanceKind {
    fn crn(inputs: &Map<String, Value>, env: &ProviderEnv, guid: &str) -> String {
        let field = |key: &str| inputs.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        format!(
            "crn:v1:bluemix:public:{}:{}:a/{}:{guid}::",
            field("service"),
            field("location"),
            env.account_id
        )
    }
}

impl ResourceKind for ResourceInstanceKind {
    fn type_token(&self) -> &'static str {
        TYPE_TOKEN
    }

    fn label(&self) -> &'static str {
        "Service Instance"
    }

    fn validate(&self, fields: &Fields<'_>) -> Result<(), ProvisionerError> {
        fields.required_str("name")?;
        fields.required_str("service")?;
        fields.required_str("plan")?;
        fields.required_str("location")?;
        if fields.optional_str("resourceGroupId")?.is_some_and(str::is_empty) {
            return Err(fields.error("resourceGroupId", "must not be empty"));
        }
        fields.tags()
    }

    fn defaults(&self, inputs: &Map<String, Value>, env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        if !inputs.contains_key("resourceGroupId") {
            out.insert("resourceGroupId".into(), json!(env.default_resource_group));
        }
        out
    }

    /// Service instances are addressed by CRN.
    fn new_id(&self, inputs: &Map<String, Value>, env: &ProviderEnv) -> String {
        Self::crn(inputs, env, &uuid::Uuid::new_v4().to_string())
    }

    fn computed(&self, id: &str, _inputs: &Map<String, Value>, _env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert("crn".into(), json!(id));
        out.insert("state".into(), json!("active"));
        out
    }

    fn computed_keys(&self) -> &'static [&'static str] {
        &["crn", "state"]
    }
}
