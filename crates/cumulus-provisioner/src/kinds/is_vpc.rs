use cumulus_sdk::resources::is_vpc::TYPE_TOKEN;
use serde_json::{Map, Value, json};

use crate::error::ProvisionerError;
use crate::kind::{ProviderEnv, ResourceKind};
use crate::kinds::vpc_style_id;
use crate::validate::{self, Fields};

pub struct IsVpcKind;

impl ResourceKind for IsVpcKind {
    fn type_token(&self) -> &'static str {
        TYPE_TOKEN
    }

    fn label(&self) -> &'static str {
        "VPC"
    }

    fn validate(&self, fields: &Fields<'_>) -> Result<(), ProvisionerError> {
        let name = fields.required_str("name")?;
        fields.check("name", name, validate::vpc_name)?;
        if fields.optional_str("resourceGroup")?.is_some_and(str::is_empty) {
            return Err(fields.error("resourceGroup", "must not be empty"));
        }
        fields.tags()
    }

    fn defaults(&self, inputs: &Map<String, Value>, env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        if !inputs.contains_key("resourceGroup") {
            out.insert("resourceGroup".into(), json!(env.default_resource_group));
        }
        out
    }

    fn new_id(&self, _inputs: &Map<String, Value>, _env: &ProviderEnv) -> String {
        vpc_style_id("r006")
    }

    fn computed(&self, id: &str, _inputs: &Map<String, Value>, env: &ProviderEnv) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert(
            "crn".into(),
            json!(format!(
                "crn:v1:bluemix:public:is:{}:a/{}::vpc:{id}",
                env.region, env.account_id
            )),
        );
        out.insert("defaultSecurityGroup".into(), json!(vpc_style_id("r006")));
        out.insert("status".into(), json!("available"));
        out
    }

    fn stable_keys(&self) -> &'static [&'static str] {
        &["defaultSecurityGroup"]
    }

    fn computed_keys(&self) -> &'static [&'static str] {
        &["crn", "defaultSecurityGroup", "status"]
    }
}
