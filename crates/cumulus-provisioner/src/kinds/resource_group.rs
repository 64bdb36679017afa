use cumulus_sdk::resources::resource_group::TYPE_TOKEN;
use serde_json::{Map, Value, json};

use crate::error::ProvisionerError;
use crate::kind::{ProviderEnv, ResourceKind};
use crate::validate::{self, Fields};

pub struct ResourceGroupKind;

impl ResourceKind for ResourceGroupKind {
    fn type_token(&self) -> &'static str {
        TYPE_TOKEN
    }

    fn label(&self) -> &'static str {
        "Resource Group"
    }

    fn validate(&self, fields: &Fields<'_>) -> Result<(), ProvisionerError> {
        let name = fields.required_str("name")?;
        fields.check("name", name, validate::resource_group_name)?;
        fields.tags()
    }

    fn new_id(&self, _inputs: &Map<String, Value>, _env: &ProviderEnv) -> String {
        // Resource manager ids are bare 32-digit hex.
        uuid::Uuid::new_v4().simple().to_string()
    }

    fn computed(&self, id: &str, _inputs: &Map<String, Value>, env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert(
            "crn".into(),
            json!(format!(
                "crn:v1:bluemix:public:resource-controller::a/{}::resource-group:{id}",
                env.account_id
            )),
        );
        out.insert("state".into(), json!("ACTIVE"));
        out
    }

    fn computed_keys(&self) -> &'static [&'static str] {
        &["crn", "state"]
    }
}
